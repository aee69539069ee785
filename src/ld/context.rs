//! Alias context: short property names to fully-qualified IRIs.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Immutable term → IRI alias table.
///
/// Terms may map to full IRIs (`"name": "http://schema.org/name"`) or to
/// compact IRIs through a prefix term (`"bioschemas": "https://bioschemas.org/"`,
/// `"LabProcess": "bioschemas:LabProcess"`). An `@vocab` entry supplies the
/// namespace for bare terms that have no alias of their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    aliases: IndexMap<String, String>,
    vocab: Option<String>,
}

/// Nesting limit for term → compact IRI → IRI chains.
const MAX_EXPANSION_DEPTH: usize = 4;

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, term: impl Into<String>, iri: impl Into<String>) -> Self {
        self.aliases.insert(term.into(), iri.into());
        self
    }

    pub fn with_vocab(mut self, vocab: impl Into<String>) -> Self {
        self.vocab = Some(vocab.into());
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.vocab.is_none()
    }

    /// Expand a term or compact IRI to a full IRI.
    ///
    /// Values that match neither a term nor a known prefix are returned unchanged.
    pub fn expand(&self, value: &str) -> String {
        let mut current = value.to_string();
        for _ in 0..MAX_EXPANSION_DEPTH {
            match self.expand_once(&current) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        current
    }

    fn expand_once(&self, value: &str) -> Option<String> {
        if let Some(iri) = self.aliases.get(value) {
            return Some(iri.clone());
        }
        if let Some((prefix, local)) = value.split_once(':') {
            if local.starts_with("//") {
                return None;
            }
            return self
                .aliases
                .get(prefix)
                .map(|namespace| format!("{namespace}{local}"));
        }
        self.vocab.as_ref().map(|vocab| format!("{vocab}{value}"))
    }

    /// Terms whose expansion is exactly `iri`, in declaration order.
    pub fn terms_for<'a>(&'a self, iri: &str) -> impl Iterator<Item = &'a str> + 'a {
        let iri = iri.to_string();
        self.aliases
            .keys()
            .filter(move |term| self.expand(term) == iri)
            .map(String::as_str)
    }

    /// Prefix terms bound to `namespace`, in declaration order.
    pub fn prefixes_for<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, iri)| iri.as_str() == namespace)
            .map(|(term, _)| term.as_str())
    }

    pub fn vocab(&self) -> Option<&str> {
        self.vocab.as_deref()
    }
}

impl<'de> Deserialize<'de> for Context {
    /// Accepts a JSON-LD context object. Term definitions may be plain strings
    /// or expanded objects carrying `@id`; keywords other than `@vocab` and
    /// definitions without an IRI are ignored.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut context = Context::new();
        for (term, definition) in raw {
            let iri = match &definition {
                Value::String(iri) => Some(iri.clone()),
                Value::Object(map) => map.get("@id").and_then(Value::as_str).map(str::to_string),
                _ => None,
            };
            match (term.as_str(), iri) {
                ("@vocab", Some(vocab)) => context.vocab = Some(vocab),
                (t, _) if t.starts_with('@') => {}
                (_, Some(iri)) => {
                    context.aliases.insert(term, iri);
                }
                _ => {}
            }
        }
        Ok(context)
    }
}

/// Local name of an IRI, compact IRI or bare term.
pub fn local_name(value: &str) -> &str {
    value
        .rsplit(|c| matches!(c, '/' | '#' | ':'))
        .next()
        .unwrap_or(value)
}
