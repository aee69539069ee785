//! Graph model builder - nodes and edges from extracted processes
//!
//! Each accepted process contributes one edge keyed by the process id and up
//! to two nodes. Node insertion is idempotent: the first process that
//! mentions an entity fixes its classification and metadata.

use indexmap::map::Entry;

use crate::error::Result;
use crate::ld::{keys, local_name, Entity, LdGraph, PropertyResolver};

use super::extract::ProcessCandidate;
use super::metadata::{EntityKind, MetadataProjector};
use super::types::{Classification, GraphEdge, GraphNode, Model};

/// Builds a fresh [`Model`] per call.
pub struct GraphModelBuilder<'a> {
    resolver: PropertyResolver<'a>,
    projector: MetadataProjector<'a>,
}

impl<'a> GraphModelBuilder<'a> {
    pub fn new(graph: &'a LdGraph, resolver: PropertyResolver<'a>) -> Self {
        Self {
            resolver,
            projector: MetadataProjector::new(graph, resolver),
        }
    }

    /// Assemble the node and edge maps.
    ///
    /// Processes without an input or output are skipped. Any metadata failure
    /// aborts the build; no partial model is returned.
    pub fn build(&self, processes: &[ProcessCandidate<'_>]) -> Result<Model> {
        let mut model = Model::new();

        for candidate in processes {
            let Some((input, output)) = candidate.endpoints() else {
                tracing::debug!(
                    process = candidate.id(),
                    inputs = candidate.inputs.len(),
                    outputs = candidate.outputs.len(),
                    "process without input or output dropped"
                );
                continue;
            };

            self.insert_node(&mut model, input)?;
            self.insert_node(&mut model, output)?;

            let edge = GraphEdge {
                id: candidate.id().to_string(),
                label: candidate.edge_label(),
                source: input.id.clone(),
                target: output.id.clone(),
                metadata: self
                    .projector
                    .project_as(candidate.process, EntityKind::LabProcess),
            };
            model.edges.insert(edge.id.clone(), edge);
        }

        Ok(model)
    }

    fn insert_node(&self, model: &mut Model, entity: &Entity) -> Result<()> {
        if let Entry::Vacant(slot) = model.nodes.entry(entity.id.clone()) {
            let metadata = self.projector.project(entity)?;
            slot.insert(GraphNode::new(
                entity.id.clone(),
                self.classify(entity),
                metadata,
            ));
        }
        Ok(())
    }

    /// First `additionalType`, else first type, mapped onto the closed set.
    pub fn classify(&self, entity: &Entity) -> Classification {
        let type_name = self
            .resolver
            .resolve(entity, &keys::ADDITIONAL_TYPE)
            .or_else(|| entity.types.first().cloned());
        match type_name {
            Some(name) => Classification::from_type_name(local_name(&name)),
            None => Classification::Unknown,
        }
    }
}
