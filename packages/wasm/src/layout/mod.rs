//! Force-directed layout for particle graphs.
//!
//! [`ForceLayout`] relaxes node positions under centering, repulsion and
//! attraction forces. It is invoked repeatedly by an external driver, usually
//! gated by a [`LayoutThrottle`], and mutates the caller's node records in
//! place.

pub mod config;
pub mod force;
mod repulsion;
pub mod throttle;

pub use config::{InvalidEdgePolicy, LayoutConfig, RepulsionMode};
pub use force::{ForceLayout, LayoutStats, total_speed};
pub use throttle::LayoutThrottle;
