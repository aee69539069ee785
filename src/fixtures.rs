//! Shared entity builders for unit tests.

use crate::ld::{Context, Entity, LdGraph, BIOSCHEMAS_NS, SCHEMA_NS};

/// Context shaped like the RO-Crate 1.1 / ARC profile contexts.
pub(crate) fn context() -> Context {
    Context::new()
        .with_vocab(SCHEMA_NS)
        .with_alias("schema", SCHEMA_NS)
        .with_alias("bioschemas", BIOSCHEMAS_NS)
        .with_alias("File", "http://schema.org/MediaObject")
        .with_alias("LabProcess", "bioschemas:LabProcess")
        .with_alias("LabProtocol", "bioschemas:LabProtocol")
        .with_alias("executesLabProtocol", "bioschemas:executesLabProtocol")
        .with_alias("parameterValue", "bioschemas:parameterValue")
}

pub(crate) fn graph(entities: Vec<Entity>) -> LdGraph {
    LdGraph::new(entities, Some(context()))
}

pub(crate) fn process(id: &str, inputs: &[&str], outputs: &[&str]) -> Entity {
    Entity::new(id, &["LabProcess"])
        .with_property("name", id)
        .with_refs("object", inputs)
        .with_refs("result", outputs)
}

pub(crate) fn sample(id: &str) -> Entity {
    Entity::new(id, &["Sample"]).with_property("additionalType", "Sample")
}

pub(crate) fn source(id: &str) -> Entity {
    Entity::new(id, &["Sample"]).with_property("additionalType", "Source")
}

pub(crate) fn file(id: &str) -> Entity {
    Entity::new(id, &["File"])
}

pub(crate) fn property_value(id: &str, name: &str, value: &str) -> Entity {
    Entity::new(id, &["PropertyValue"])
        .with_property("name", name)
        .with_property("value", value)
}
