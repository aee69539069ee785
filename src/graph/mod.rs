//! Lab-process graph construction and layout
//!
//! # Architecture
//!
//! ```text
//! LdGraph (entities + context)
//!        │
//!        ▼
//! find_processes (LabProcess + name, object/result endpoints)
//!        │
//!        ▼
//! GraphModelBuilder ──► MetadataProjector (per-type display pairs)
//!        │
//!        ▼
//! Model (node map + edge map, insertion ordered)
//!        │
//!        ▼
//! LayoutEngine (ranks, barycenter ordering, normalized x/y)
//!        │
//!        ├──► NavigationIndex (zoom targets, location list)
//!        │
//!        └──► RenderGraph (flat snapshot for the renderer)
//! ```

pub mod builder;
pub mod export;
pub mod extract;
pub mod layout;
pub mod metadata;
pub mod navigation;
pub mod types;

pub use builder::GraphModelBuilder;
pub use export::{RenderEdge, RenderGraph, RenderNode};
pub use extract::{find_processes, is_process, ProcessCandidate, ProtocolRef, LAB_PROCESS_TYPE};
pub use layout::{LayoutEngine, LayoutResult};
pub use metadata::{EntityKind, MetadataProjector};
pub use navigation::{Bounds, LocationKind, NavigationIndex, Point};
pub use types::*;
