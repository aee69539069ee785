//! Linked-data input model.
//!
//! The semantic-graph parser lives outside this crate; these types are the
//! read-only view of its output that extraction works against.

pub mod context;
pub mod entity;
pub mod resolver;

pub use context::{local_name, Context};
pub use entity::Entity;
pub use resolver::{keys, PropertyResolver, SemanticKey, BIOSCHEMAS_NS, SCHEMA_NS};

use std::collections::HashMap;

/// An ordered entity set plus its optional alias context.
#[derive(Debug, Clone, Default)]
pub struct LdGraph {
    entities: Vec<Entity>,
    /// id -> position in `entities` (first occurrence)
    index: HashMap<String, usize>,
    context: Option<Context>,
}

impl LdGraph {
    pub fn new(entities: Vec<Entity>, context: Option<Context>) -> Self {
        let mut index = HashMap::with_capacity(entities.len());
        for (i, entity) in entities.iter().enumerate() {
            index.entry(entity.id.clone()).or_insert(i);
        }
        Self {
            entities,
            index,
            context,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
