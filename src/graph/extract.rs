//! Process extraction
//!
//! A process is any entity typed `LabProcess` (anywhere in its type list)
//! that carries a `name`. For each one the extractor resolves its inputs
//! (`object`), outputs (`result`) and optional executed protocol.

use crate::ld::{keys, Entity, LdGraph, PropertyResolver};

/// Type local name identifying a process entity
pub const LAB_PROCESS_TYPE: &str = "LabProcess";

/// The protocol a process executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolRef<'g> {
    pub id: &'g str,
    /// Human-readable name, when the protocol entity exists and has one
    pub name: Option<String>,
}

/// A process entity with its resolved endpoints
#[derive(Debug, Clone)]
pub struct ProcessCandidate<'g> {
    pub process: &'g Entity,
    pub inputs: Vec<&'g Entity>,
    pub outputs: Vec<&'g Entity>,
    pub protocol: Option<ProtocolRef<'g>>,
}

impl<'g> ProcessCandidate<'g> {
    pub fn id(&self) -> &'g str {
        &self.process.id
    }

    /// Only processes with at least one input and one output become edges.
    pub fn is_accepted(&self) -> bool {
        !self.inputs.is_empty() && !self.outputs.is_empty()
    }

    /// Endpoints used for the edge; multi-input/output processes collapse to index 0.
    pub fn endpoints(&self) -> Option<(&'g Entity, &'g Entity)> {
        Some((*self.inputs.first()?, *self.outputs.first()?))
    }

    /// Protocol name, else protocol id, else the process id.
    pub fn edge_label(&self) -> String {
        match &self.protocol {
            Some(ProtocolRef {
                name: Some(name), ..
            }) => name.clone(),
            Some(ProtocolRef { id, name: None }) => id.to_string(),
            None => self.process.id.clone(),
        }
    }
}

/// Whether `entity` has the process shape.
pub fn is_process(entity: &Entity, resolver: &PropertyResolver<'_>) -> bool {
    resolver.has_type(entity, LAB_PROCESS_TYPE) && resolver.lookup(entity, &keys::NAME).is_some()
}

/// Find all process candidates in graph order.
pub fn find_processes<'g>(
    graph: &'g LdGraph,
    resolver: &PropertyResolver<'_>,
) -> Vec<ProcessCandidate<'g>> {
    graph
        .entities()
        .iter()
        .filter(|entity| is_process(entity, resolver))
        .map(|process| {
            let inputs = resolver.resolve_entities(process, &keys::OBJECT, graph);
            let outputs = resolver.resolve_entities(process, &keys::RESULT, graph);
            let protocol = resolver
                .references(process, &keys::EXECUTES_LAB_PROTOCOL)
                .first()
                .map(|&id| ProtocolRef {
                    id,
                    name: graph
                        .get(id)
                        .and_then(|protocol| resolver.resolve(protocol, &keys::NAME)),
                });

            tracing::debug!(
                process = %process.id,
                inputs = inputs.len(),
                outputs = outputs.len(),
                has_protocol = protocol.is_some(),
                "process candidate"
            );

            ProcessCandidate {
                process,
                inputs,
                outputs,
                protocol,
            }
        })
        .collect()
}
