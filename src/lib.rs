//! Lab-process graph construction and navigation
//!
//! Turns a linked-data description of laboratory work (samples, sources,
//! files and the lab processes connecting them) into a directed, laid-out
//! graph that a renderer can draw and a location picker can navigate.
//!
//! ```
//! use lab_process_graph::{Context, EngineConfig, Entity, LdGraph, ProcessGraph};
//!
//! let context = Context::new()
//!     .with_vocab("http://schema.org/")
//!     .with_alias("LabProcess", "https://bioschemas.org/LabProcess");
//!
//! let graph = LdGraph::new(
//!     vec![
//!         Entity::new("#source/leaf", &["Sample"]).with_property("additionalType", "Source"),
//!         Entity::new("#sample/extract", &["Sample"]),
//!         Entity::new("#process/extraction", &["LabProcess"])
//!             .with_property("name", "extraction")
//!             .with_refs("object", &["#source/leaf"])
//!             .with_refs("result", &["#sample/extract"]),
//!     ],
//!     Some(context),
//! );
//!
//! let pg = ProcessGraph::construct(&graph, &EngineConfig::default()).unwrap();
//! let target = pg.navigation().zoom_target("#process/extraction").unwrap();
//! assert_eq!((target.x, target.y), (0.5, 0.0));
//! ```

mod error;

pub mod config;
pub mod graph;
pub mod ld;
pub mod pipeline;
pub mod telemetry;

#[cfg(test)]
mod fixtures;

pub use config::{EngineConfig, LayoutConfig};
pub use error::{ProcessGraphError, Result};
pub use graph::{
    Bounds, Classification, GraphEdge, GraphNode, LayoutEngine, LayoutResult, LocationKind,
    Metadata, Model, NavigationIndex, Point, RenderGraph,
};
pub use ld::{Context, Entity, LdGraph, PropertyResolver};
pub use pipeline::ProcessGraph;
