//! Node type and related structures.
//!
//! Nodes are the particles of the graph. Each node has:
//! - A position (x, y) in graph space
//! - A velocity (vx, vy), carried across layout passes
//! - A mass, used by the renderer for particle size only

use std::fmt;

/// Node identifier.
///
/// Nodes are never removed by the layout, so the identifier doubles as the
/// node's index in the node sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Position of the node in the node sequence.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A particle record.
///
/// Velocity is always present and starts at zero, so the layout loop never
/// has to check for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Rendering weight. Not read by the layout.
    pub mass: f32,
}

impl Node {
    /// Create a resting node of unit mass.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_mass(x, y, 1.0)
    }

    /// Create a resting node with the given mass.
    #[inline]
    pub fn with_mass(x: f32, y: f32, mass: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            mass,
        }
    }

    /// Builder-style velocity override.
    #[inline]
    pub fn moving(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Magnitude of the velocity vector.
    #[inline]
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// True when position and velocity are all finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
