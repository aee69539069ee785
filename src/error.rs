//! Error types for process-graph construction and navigation.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ProcessGraphError>;

/// Errors raised while constructing or navigating a process graph.
#[derive(Debug, Error)]
pub enum ProcessGraphError {
    /// The source graph carries no alias context and the engine requires one.
    #[error("Missing context: the linked-data graph has no resolvable alias context")]
    MissingContext,

    /// An endpoint entity has a primary type the metadata projector cannot display.
    #[error("Unsupported entity type: '{type_name}' (entity '{entity_id}')")]
    UnsupportedEntityType {
        /// Entity that triggered the failure.
        entity_id: String,
        /// Primary type of that entity.
        type_name: String,
    },

    /// Navigation was requested for a location without coordinates.
    #[error("Layout not computed: '{id}' has no coordinates")]
    LayoutNotComputed {
        /// Node or edge id that was requested.
        id: String,
    },

    /// Navigation id matches neither a node nor an edge.
    #[error("Location not found: '{id}'")]
    LocationNotFound {
        /// Requested id.
        id: String,
    },

    /// A layout spacing is not a finite positive number.
    #[error("Invalid layout spacing: {field} = {value}")]
    InvalidSpacing {
        /// Offending `LayoutConfig` field.
        field: &'static str,
        value: f64,
    },

    /// Engine configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_yaml::Error),
}

impl ProcessGraphError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingContext => "MISSING_CONTEXT",
            Self::UnsupportedEntityType { .. } => "UNSUPPORTED_ENTITY_TYPE",
            Self::LayoutNotComputed { .. } => "LAYOUT_NOT_COMPUTED",
            Self::LocationNotFound { .. } => "LOCATION_NOT_FOUND",
            Self::InvalidSpacing { .. } | Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// Whether this error aborts a whole construction pass.
    ///
    /// Navigation errors are scoped to a single lookup and leave the model usable.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::LayoutNotComputed { .. } | Self::LocationNotFound { .. }
        )
    }
}
