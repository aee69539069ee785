//! Engine configuration.
//!
//! Every field has a default, so a YAML document only needs to name what it
//! overrides:
//!
//! ```
//! use lab_process_graph::EngineConfig;
//!
//! let config = EngineConfig::from_yaml_str("layout:\n  rank_spacing: 320.0\n").unwrap();
//! assert!(config.require_context);
//! assert_eq!(config.layout.rank_spacing, 320.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ProcessGraphError, Result};

/// Top-level configuration for [`crate::ProcessGraph::construct`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fail with `MissingContext` when the source graph has no context.
    /// When false, property lookup probes raw key variants instead.
    pub require_context: bool,
    /// Layered layout parameters
    pub layout: LayoutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            require_context: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) YAML configuration document.
    ///
    /// Fails with `InvalidSpacing` if a layout spacing is NaN, infinite,
    /// zero or negative.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Allow graphs without an alias context.
    pub fn allow_missing_context(mut self) -> Self {
        self.require_context = false;
        self
    }

    /// Replace the layout parameters.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Parameters for the layered layout engine.
///
/// Spacing values only matter relative to each other on the same axis;
/// coordinates are normalized into `[0, 1]` after assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between adjacent ranks (x axis, left-to-right)
    pub rank_spacing: f64,
    /// Distance between neighbours within a rank (y axis)
    pub node_spacing: f64,
    /// Maximum number of down+up barycenter sweeps
    pub crossing_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_spacing: 200.0,
            node_spacing: 100.0,
            crossing_passes: 8,
        }
    }
}

impl LayoutConfig {
    /// Both spacings must be finite and positive; anything else breaks the
    /// [0, 1] bounds or flips the left-to-right direction.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("rank_spacing", self.rank_spacing),
            ("node_spacing", self.node_spacing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProcessGraphError::InvalidSpacing { field, value });
            }
        }
        Ok(())
    }

    /// Replace invalid spacings with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = LayoutConfig::default();
        if !(self.rank_spacing.is_finite() && self.rank_spacing > 0.0) {
            tracing::warn!(value = self.rank_spacing, "invalid rank_spacing; using default");
            self.rank_spacing = defaults.rank_spacing;
        }
        if !(self.node_spacing.is_finite() && self.node_spacing > 0.0) {
            tracing::warn!(value = self.node_spacing, "invalid node_spacing; using default");
            self.node_spacing = defaults.node_spacing;
        }
        self
    }

    pub fn with_rank_spacing(mut self, spacing: f64) -> Self {
        self.rank_spacing = spacing;
        self
    }

    pub fn with_node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = spacing;
        self
    }

    pub fn with_crossing_passes(mut self, passes: usize) -> Self {
        self.crossing_passes = passes;
        self
    }
}
