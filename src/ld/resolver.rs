//! Property resolver - context-aware property access on entities.
//!
//! Resolution runs in two stages:
//! 1. **Alias normalization**: a [`SemanticKey`] is turned into the ordered list
//!    of raw keys an entity may use for it (context terms, compact IRIs, full IRI).
//! 2. **Typed lookup**: the first raw key present on the entity is read as a
//!    scalar, a list of references, or a list of referenced entities.
//!
//! Absence is never an error here; callers decide whether it is fatal.

use serde_json::Value;

use super::context::{local_name, Context};
use super::entity::Entity;
use super::LdGraph;

pub const SCHEMA_NS: &str = "http://schema.org/";
pub const BIOSCHEMAS_NS: &str = "https://bioschemas.org/";

/// A fully-qualified property key, split into namespace and local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticKey {
    /// Conventional prefix used when no context is available
    pub prefix: &'static str,
    pub namespace: &'static str,
    pub local: &'static str,
}

impl SemanticKey {
    pub const fn schema(local: &'static str) -> Self {
        Self {
            prefix: "schema",
            namespace: SCHEMA_NS,
            local,
        }
    }

    pub const fn bioschemas(local: &'static str) -> Self {
        Self {
            prefix: "bioschemas",
            namespace: BIOSCHEMAS_NS,
            local,
        }
    }

    pub fn iri(&self) -> String {
        format!("{}{}", self.namespace, self.local)
    }
}

/// Property keys read by the extraction pipeline.
pub mod keys {
    use super::SemanticKey;

    pub const NAME: SemanticKey = SemanticKey::schema("name");
    pub const VALUE: SemanticKey = SemanticKey::schema("value");
    pub const OBJECT: SemanticKey = SemanticKey::schema("object");
    pub const RESULT: SemanticKey = SemanticKey::schema("result");
    pub const ADDITIONAL_TYPE: SemanticKey = SemanticKey::schema("additionalType");
    pub const ADDITIONAL_PROPERTY: SemanticKey = SemanticKey::schema("additionalProperty");
    pub const EXECUTES_LAB_PROTOCOL: SemanticKey = SemanticKey::bioschemas("executesLabProtocol");
    pub const PARAMETER_VALUE: SemanticKey = SemanticKey::bioschemas("parameterValue");
}

/// Resolves semantic property access against an optional alias context.
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'a> {
    context: Option<&'a Context>,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(context: Option<&'a Context>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> Option<&'a Context> {
        self.context
    }

    // =========================================================================
    // STAGE 1: ALIAS NORMALIZATION
    // =========================================================================

    /// Raw keys to probe for `key`, most preferred first, without duplicates.
    pub fn candidate_keys(&self, key: &SemanticKey) -> Vec<String> {
        let iri = key.iri();
        let mut candidates: Vec<String> = Vec::new();
        let mut push = |candidate: String| {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };

        match self.context {
            Some(context) => {
                for term in context.terms_for(&iri) {
                    push(term.to_string());
                }
                for prefix in context.prefixes_for(key.namespace) {
                    push(format!("{prefix}:{}", key.local));
                }
                if context.vocab() == Some(key.namespace) {
                    push(key.local.to_string());
                }
                push(iri);
            }
            None => {
                push(key.local.to_string());
                push(format!("{}:{}", key.prefix, key.local));
                push(iri);
            }
        }
        candidates
    }

    // =========================================================================
    // STAGE 2: TYPED LOOKUP
    // =========================================================================

    /// Raw value of the first candidate key present on `entity`.
    pub fn lookup<'e>(&self, entity: &'e Entity, key: &SemanticKey) -> Option<&'e Value> {
        self.candidate_keys(key)
            .iter()
            .find_map(|candidate| entity.property(candidate))
    }

    /// First scalar value of `key`, rendered as a string.
    pub fn resolve(&self, entity: &Entity, key: &SemanticKey) -> Option<String> {
        self.lookup(entity, key).and_then(scalar)
    }

    /// Like [`Self::resolve`] with a declared default for absent values.
    pub fn resolve_or(&self, entity: &Entity, key: &SemanticKey, default: &str) -> String {
        self.resolve(entity, key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Ids referenced by `key` (`{"@id": ...}` objects), in order.
    pub fn references<'e>(&self, entity: &'e Entity, key: &SemanticKey) -> Vec<&'e str> {
        match self.lookup(entity, key) {
            Some(Value::Array(items)) => items.iter().filter_map(reference).collect(),
            Some(value) => reference(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Entities referenced by `key`, looked up in `graph`.
    ///
    /// References that do not resolve to an entity are skipped.
    pub fn resolve_entities<'g>(
        &self,
        entity: &Entity,
        key: &SemanticKey,
        graph: &'g LdGraph,
    ) -> Vec<&'g Entity> {
        self.references(entity, key)
            .into_iter()
            .filter_map(|id| {
                let found = graph.get(id);
                if found.is_none() {
                    tracing::debug!(
                        entity = %entity.id,
                        property = key.local,
                        target = id,
                        "dangling reference skipped"
                    );
                }
                found
            })
            .collect()
    }

    // =========================================================================
    // TYPES
    // =========================================================================

    /// Local name of a raw type string, as written (prefix or namespace stripped).
    pub fn type_name(&self, raw: &str) -> String {
        local_name(raw).to_string()
    }

    /// Local name of the entity's first (most specific) type.
    pub fn primary_type(&self, entity: &Entity) -> Option<String> {
        entity.types.first().map(|t| self.type_name(t))
    }

    /// Whether any of the entity's types is `type_local`, either as written
    /// or after context expansion.
    pub fn has_type(&self, entity: &Entity, type_local: &str) -> bool {
        entity.types.iter().any(|t| {
            local_name(t) == type_local
                || self
                    .context
                    .is_some_and(|context| local_name(&context.expand(t)) == type_local)
        })
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items.iter().find_map(scalar),
        Value::Object(map) => map.get("@value").and_then(scalar),
        Value::Null => None,
    }
}

fn reference(value: &Value) -> Option<&str> {
    value.as_object()?.get("@id")?.as_str()
}
