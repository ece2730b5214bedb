//! Error type for layout passes and configuration.

use crate::graph::{EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("{edge} references {from} -> {to}, but the graph has {node_count} nodes")]
    InvalidEdge {
        edge: EdgeId,
        from: NodeId,
        to: NodeId,
        node_count: usize,
    },

    #[error("{node} has a non-finite position or velocity")]
    NonFiniteNode { node: NodeId },

    #[error("position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f32, y: f32 },

    #[error("invalid layout config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
