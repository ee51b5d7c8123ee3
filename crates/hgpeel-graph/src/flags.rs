use hgpeel_core::errors::{ErrorInfo, HgError};
use serde::{Deserialize, Serialize};

/// Configuration options that control the behaviour of [`Hypergraph`](crate::Hypergraph).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HypergraphConfig {
    /// Whether bulk construction builds the initial neighbourhood cache and
    /// precomputed lower bounds.
    pub init_cache: bool,
    /// When the removal transform reclaims arena space held by dead edges.
    pub compaction: CompactionPolicy,
}

impl Default for HypergraphConfig {
    fn default() -> Self {
        Self {
            init_cache: true,
            compaction: CompactionPolicy::Never,
        }
    }
}

impl HypergraphConfig {
    /// Checks that every tunable lies in its accepted range.
    pub fn validate(&self) -> Result<(), HgError> {
        if let CompactionPolicy::DeadFraction { threshold } = self.compaction {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(HgError::Validation(
                    ErrorInfo::new(
                        "invalid-config",
                        "dead-fraction threshold must lie in (0, 1]",
                    )
                    .with_context("threshold", threshold.to_string()),
                ));
            }
        }
        Ok(())
    }
}

/// Decides whether dead edge ranges are compacted after a vertex removal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompactionPolicy {
    /// Dead ranges stay in the arena until [`Hypergraph::compact`](crate::Hypergraph::compact)
    /// is called explicitly.
    #[default]
    Never,
    /// Compact once dead ranges occupy at least `threshold` of the arena.
    DeadFraction {
        /// Fraction of arena slots, in `(0, 1]`.
        threshold: f64,
    },
}

impl CompactionPolicy {
    /// Returns whether an arena with the given dead fraction should be compacted.
    pub fn should_compact(&self, dead_fraction: f64) -> bool {
        match self {
            CompactionPolicy::Never => false,
            CompactionPolicy::DeadFraction { threshold } => {
                dead_fraction > 0.0 && dead_fraction >= *threshold
            }
        }
    }
}
