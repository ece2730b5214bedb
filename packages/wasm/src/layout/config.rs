//! Tunables for the force layout.
//!
//! Every constant of the integrator lives here instead of in module-level
//! state, so independently tuned simulations can share one process. The
//! config round-trips through serde with camelCase keys, which is how the
//! JavaScript driver hands it over.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// What a pass does with an edge whose endpoint is not in the node sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidEdgePolicy {
    /// Drop the edge for this pass and count it in the stats.
    #[default]
    Skip,
    /// Fail the pass before any node is mutated.
    Reject,
}

/// How the repulsion phase finds the nodes pushing on each node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RepulsionMode {
    /// Every other node, O(n²).
    #[default]
    Exact,
    /// Only nodes within `radius`, located through an R-tree.
    Cutoff { radius: f32 },
}

/// Configuration for the force layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Per-axis pull toward the origin applied every iteration (default: 0.0001).
    pub centering: f32,
    /// Inverse-square repulsion constant (default: 0.00002).
    pub repulsion: f32,
    /// Linear attraction constant along edges (default: 4.0).
    pub attraction: f32,
    /// Velocity multiplier applied after each position update (default: 0.9).
    pub damping: f32,
    /// Iterations per layout pass (default: 2).
    pub iterations: u32,
    /// Added to every distance to keep coincident nodes finite (default: 0.01).
    pub epsilon: f32,
    /// Edge validation policy (default: skip).
    pub invalid_edges: InvalidEdgePolicy,
    /// Repulsion neighbourhood (default: exact).
    pub repulsion_mode: RepulsionMode,
    /// Node count at which repulsion runs on the rayon pool (default: 2048).
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            centering: 0.0001,
            repulsion: 0.00002,
            attraction: 4.0,
            damping: 0.9,
            iterations: 2,
            epsilon: 0.01,
            invalid_edges: InvalidEdgePolicy::Skip,
            repulsion_mode: RepulsionMode::Exact,
            parallel_threshold: 2048,
        }
    }
}

impl LayoutConfig {
    /// Check that every constant keeps the integrator well defined.
    pub fn validate(&self) -> Result<()> {
        non_negative("centering", self.centering)?;
        non_negative("repulsion", self.repulsion)?;
        non_negative("attraction", self.attraction)?;

        if !self.damping.is_finite() || !(0.0..=1.0).contains(&self.damping) {
            return Err(invalid("damping", format!("must be within [0, 1], got {}", self.damping)));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(invalid("epsilon", format!("must be positive, got {}", self.epsilon)));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be at least 1".to_string()));
        }
        if let RepulsionMode::Cutoff { radius } = self.repulsion_mode {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(invalid(
                    "repulsionMode.radius",
                    format!("must be positive, got {radius}"),
                ));
            }
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and non-negative, got {value}")))
    }
}

fn invalid(field: &'static str, reason: String) -> LayoutError {
    LayoutError::InvalidConfig { field, reason }
}
