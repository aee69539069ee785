//! Navigation index
//!
//! Read-only view over a laid-out [`Model`] that answers "where is X" for a
//! location picker. Camera state (zoom, pan, animation) belongs to the
//! renderer; this only supplies the target coordinates.

use serde::Serialize;

use crate::error::{ProcessGraphError, Result};

use super::types::{GraphNode, Model};

/// A position in normalized layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// What a location id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationKind {
    Node,
    Edge,
}

/// Axis-aligned box around all laid-out nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NavigationIndex<'a> {
    model: &'a Model,
}

impl<'a> NavigationIndex<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Coordinate to centre the view on.
    ///
    /// Nodes resolve to their own position, edges to the midpoint of their
    /// endpoints. Node ids are checked before edge ids.
    pub fn zoom_target(&self, id: &str) -> Result<Point> {
        if let Some(node) = self.model.node(id) {
            return node_point(node);
        }

        if let Some(edge) = self.model.edge(id) {
            let source = self.endpoint(&edge.source)?;
            let target = self.endpoint(&edge.target)?;
            return Ok(source.midpoint(target));
        }

        tracing::debug!(id, "zoom target not found");
        Err(ProcessGraphError::LocationNotFound { id: id.to_string() })
    }

    /// Node ids in insertion order, then (optionally) edge ids in insertion order.
    pub fn list_locations(&self, include_edges: bool) -> Vec<&'a str> {
        let nodes = self.model.nodes.keys().map(String::as_str);
        if include_edges {
            nodes
                .chain(self.model.edges.keys().map(String::as_str))
                .collect()
        } else {
            nodes.collect()
        }
    }

    pub fn location_kind(&self, id: &str) -> Option<LocationKind> {
        if self.model.nodes.contains_key(id) {
            Some(LocationKind::Node)
        } else if self.model.edges.contains_key(id) {
            Some(LocationKind::Edge)
        } else {
            None
        }
    }

    /// Extent of all positioned nodes; `None` when nothing is laid out.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.model.nodes.values().filter_map(GraphNode::position);
        let (x, y) = positions.next()?;
        let mut bounds = Bounds {
            min: Point::new(x, y),
            max: Point::new(x, y),
        };
        for (x, y) in positions {
            bounds.min.x = bounds.min.x.min(x);
            bounds.min.y = bounds.min.y.min(y);
            bounds.max.x = bounds.max.x.max(x);
            bounds.max.y = bounds.max.y.max(y);
        }
        Some(bounds)
    }

    fn endpoint(&self, id: &str) -> Result<Point> {
        match self.model.node(id) {
            Some(node) => node_point(node),
            None => Err(ProcessGraphError::LayoutNotComputed { id: id.to_string() }),
        }
    }
}

fn node_point(node: &GraphNode) -> Result<Point> {
    node.position()
        .map(|(x, y)| Point::new(x, y))
        .ok_or_else(|| ProcessGraphError::LayoutNotComputed {
            id: node.id.clone(),
        })
}
