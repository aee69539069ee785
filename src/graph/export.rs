//! Renderer export
//!
//! Flat snapshot of a laid-out model in the shape a graph renderer consumes:
//! positioned nodes plus directed edges referencing them by id.

use serde::Serialize;

use crate::error::{ProcessGraphError, Result};

use super::types::{Classification, Metadata, Model};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub classification: Classification,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderGraph {
    /// Always `"directed"`; processes flow from input to output
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderGraph {
    /// Snapshot `model`; every node must already carry coordinates.
    pub fn from_model(model: &Model) -> Result<Self> {
        let nodes = model
            .nodes
            .values()
            .map(|node| {
                let (x, y) = node
                    .position()
                    .ok_or_else(|| ProcessGraphError::LayoutNotComputed {
                        id: node.id.clone(),
                    })?;
                Ok(RenderNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    classification: node.classification,
                    x,
                    y,
                    metadata: node.metadata.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = model
            .edges
            .values()
            .map(|edge| RenderEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                label: edge.label.clone(),
                metadata: edge.metadata.clone(),
            })
            .collect();

        Ok(Self {
            kind: "directed",
            nodes,
            edges,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
