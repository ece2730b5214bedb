//! Graph data structures.
//!
//! Particles and the edges between them, stored as plain records so a layout
//! pass can borrow them as slices.

mod edge;
mod node;
mod particles;

pub use edge::{Edge, EdgeId};
pub use node::{Node, NodeId};
pub use particles::ParticleGraph;
