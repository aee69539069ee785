//! Metadata projection - flat display properties per entity kind.

use crate::error::{ProcessGraphError, Result};
use crate::ld::{keys, Entity, LdGraph, PropertyResolver, SemanticKey};

use super::types::Metadata;

/// Entity kinds the projector knows how to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// `additionalProperty` name/value pairs
    Sample,
    /// `parameterValue` name/value pairs
    LabProcess,
    /// No displayed metadata
    File,
}

impl EntityKind {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Sample" => Some(EntityKind::Sample),
            "LabProcess" => Some(EntityKind::LabProcess),
            "File" => Some(EntityKind::File),
            _ => None,
        }
    }

    fn pairs_key(&self) -> Option<&'static SemanticKey> {
        match self {
            EntityKind::Sample => Some(&keys::ADDITIONAL_PROPERTY),
            EntityKind::LabProcess => Some(&keys::PARAMETER_VALUE),
            EntityKind::File => None,
        }
    }
}

/// Projects entities into display metadata.
#[derive(Debug, Clone, Copy)]
pub struct MetadataProjector<'a> {
    graph: &'a LdGraph,
    resolver: PropertyResolver<'a>,
}

impl<'a> MetadataProjector<'a> {
    pub fn new(graph: &'a LdGraph, resolver: PropertyResolver<'a>) -> Self {
        Self { graph, resolver }
    }

    /// Project `entity` according to its primary (first) type.
    ///
    /// Fails with `UnsupportedEntityType` for anything other than
    /// `Sample`, `LabProcess` or `File`.
    pub fn project(&self, entity: &Entity) -> Result<Metadata> {
        let type_name = self.resolver.primary_type(entity).unwrap_or_default();
        let kind = EntityKind::from_type_name(&type_name).ok_or_else(|| {
            tracing::debug!(entity = %entity.id, types = ?entity.types, "no metadata projection");
            ProcessGraphError::UnsupportedEntityType {
                entity_id: entity.id.clone(),
                type_name,
            }
        })?;
        Ok(self.project_as(entity, kind))
    }

    /// Project `entity` as `kind`, ignoring its declared types.
    pub fn project_as(&self, entity: &Entity, kind: EntityKind) -> Metadata {
        let Some(key) = kind.pairs_key() else {
            return Metadata::new();
        };

        let mut metadata = Metadata::new();
        for pair in self.resolver.resolve_entities(entity, key, self.graph) {
            let Some(name) = self.resolver.resolve(pair, &keys::NAME) else {
                tracing::debug!(entity = %entity.id, pair = %pair.id, "unnamed pair skipped");
                continue;
            };
            let value = self.resolver.resolve_or(pair, &keys::VALUE, "");
            metadata.insert(name, value);
        }
        metadata
    }
}
