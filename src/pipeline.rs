//! End-to-end construction: extract, build, lay out.

use crate::config::EngineConfig;
use crate::error::{ProcessGraphError, Result};
use crate::graph::{
    find_processes, GraphModelBuilder, LayoutEngine, LayoutResult, Model, NavigationIndex,
    RenderGraph,
};
use crate::ld::{LdGraph, PropertyResolver};

/// A laid-out process graph.
///
/// The model is never mutated after construction, so a shared reference can
/// be handed to any number of readers.
#[derive(Debug, Clone)]
pub struct ProcessGraph {
    model: Model,
    layout: LayoutResult,
}

impl ProcessGraph {
    /// Build and lay out the process graph for `graph`.
    ///
    /// Any failure aborts the whole construction; no partial model escapes.
    pub fn construct(graph: &LdGraph, config: &EngineConfig) -> Result<Self> {
        if config.require_context && graph.context().is_none() {
            return Err(ProcessGraphError::MissingContext);
        }
        if graph.context().is_none() {
            tracing::debug!("no context; resolving properties by raw key variants");
        }

        let resolver = PropertyResolver::new(graph.context());
        let processes = find_processes(graph, &resolver);

        let mut model = GraphModelBuilder::new(graph, resolver).build(&processes)?;
        let layout = LayoutEngine::with_config(config.layout.clone()).layout(&mut model);

        tracing::info!(
            entities = graph.len(),
            processes = processes.len(),
            nodes = model.nodes.len(),
            edges = model.edges.len(),
            ranks = layout.rank_count,
            crossings = layout.crossings,
            "process graph constructed"
        );

        Ok(Self { model, layout })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn layout_result(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn navigation(&self) -> NavigationIndex<'_> {
        NavigationIndex::new(&self.model)
    }

    pub fn render_graph(&self) -> Result<RenderGraph> {
        RenderGraph::from_model(&self.model)
    }

    pub fn into_model(self) -> Model {
        self.model
    }
}
