//! Graph types for the lab-process view
//!
//! These types are the model handed to the renderer and the navigation index.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Display metadata: flat name -> value pairs in source order
pub type Metadata = IndexMap<String, String>;

/// Closed set of endpoint classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Classification {
    Source,
    Sample,
    File,
    #[default]
    Unknown,
}

impl Classification {
    /// Map a type local name onto the closed set; anything else is `Unknown`.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Source" => Classification::Source,
            "Sample" => Classification::Sample,
            "File" => Classification::File,
            _ => Classification::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Source => "Source",
            Classification::Sample => "Sample",
            Classification::File => "File",
            Classification::Unknown => "Unknown",
        }
    }
}

/// An input or output entity of one or more processes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub classification: Classification,
    pub metadata: Metadata,

    // =========================================================================
    // LAYOUT FIELDS - written once by the layout engine
    // =========================================================================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Layer index (0 = leftmost)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, classification: Classification, metadata: Metadata) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            classification,
            metadata,
            x: None,
            y: None,
            rank: None,
        }
    }

    /// Both coordinates, if layout has run.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

/// One process, drawn from its first input to its first output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Id of the originating process entity
    pub id: String,
    pub label: String,
    pub source: String,
    pub target: String,
    pub metadata: Metadata,
}

/// Node and edge maps, keyed by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub nodes: IndexMap<String, GraphNode>,
    pub edges: IndexMap<String, GraphEdge>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether every node has coordinates (vacuously true when empty).
    pub fn is_laid_out(&self) -> bool {
        self.nodes.values().all(|n| n.position().is_some())
    }
}
