//! ParticleGraph - the node and edge collections a layout pass works on.
//!
//! The graph is grown by the ingestion side (nodes as posts gain relevance,
//! edges as likes and reposts arrive) and handed to [`ForceLayout::run`] as a
//! pair of slices. Node and edge identifiers are indices, so nothing is ever
//! removed individually; [`ParticleGraph::clear`] resets everything.
//!
//! [`ForceLayout::run`]: crate::layout::ForceLayout::run

use super::edge::{Edge, EdgeId};
use super::node::{Node, NodeId};
use crate::error::{LayoutError, Result};
use crate::layout::{ForceLayout, LayoutStats};
use crate::spatial::SpatialIndex;

/// Caller-owned particle graph.
#[derive(Debug, Clone, Default)]
pub struct ParticleGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl ParticleGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
        }
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a resting node at the specified position.
    pub fn add_node(&mut self, x: f32, y: f32, mass: f32) -> Result<NodeId> {
        check_position(x, y)?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::with_mass(x, y, mass));
        Ok(id)
    }

    /// Add unit-mass nodes from a positions array [x0, y0, x1, y1, ...].
    ///
    /// A trailing unpaired value is ignored. Nothing is added if any position
    /// is not finite. Returns the number of nodes added.
    pub fn add_nodes_from_positions(&mut self, positions: &[f32]) -> Result<u32> {
        let pairs = positions.chunks_exact(2);
        for pair in pairs.clone() {
            check_position(pair[0], pair[1])?;
        }
        self.nodes.reserve(pairs.len());

        let mut added = 0;
        for pair in pairs {
            self.nodes.push(Node::new(pair[0], pair[1]));
            added += 1;
        }
        Ok(added)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Get a node record.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node's position.
    pub fn get_node_position(&self, id: NodeId) -> Option<(f32, f32)> {
        self.node(id).map(|node| (node.x, node.y))
    }

    /// Move a node. Its velocity is left untouched.
    ///
    /// Returns false for an unknown ID.
    pub fn set_node_position(&mut self, id: NodeId, x: f32, y: f32) -> Result<bool> {
        check_position(x, y)?;
        match self.nodes.get_mut(id.index()) {
            Some(node) => {
                node.x = x;
                node.y = y;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge between two existing nodes.
    ///
    /// Returns None if either endpoint is unknown, so the stored edge list is
    /// always valid for a layout pass. Parallel edges are kept.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        let edge = Edge { source, target };
        if !edge.is_within(self.nodes.len()) {
            return None;
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        Some(id)
    }

    /// Add edges from pairs [src0, tgt0, src1, tgt1, ...].
    /// Returns the number of edges added.
    pub fn add_edges_from_pairs(&mut self, pairs: &[u32]) -> u32 {
        let mut added = 0;
        for pair in pairs.chunks_exact(2) {
            if self.add_edge(NodeId(pair[0]), NodeId(pair[1])).is_some() {
                added += 1;
            }
        }
        added
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Run one layout pass over this graph.
    pub fn run_layout(&mut self, layout: &ForceLayout) -> Result<LayoutStats> {
        layout.run(&mut self.nodes, &self.edges)
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as [x0, y0, x1, y1, ...].
    pub fn positions_interleaved(&self) -> Vec<f32> {
        self.nodes.iter().flat_map(|node| [node.x, node.y]).collect()
    }

    /// Velocities as [vx0, vy0, vx1, vy1, ...].
    pub fn velocities_interleaved(&self) -> Vec<f32> {
        self.nodes.iter().flat_map(|node| [node.vx, node.vy]).collect()
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Find the node nearest to a point, for hit testing.
    pub fn find_nearest_node(&self, x: f32, y: f32) -> Option<NodeId> {
        let positions: Vec<[f32; 2]> = self.nodes.iter().map(|node| [node.x, node.y]).collect();
        SpatialIndex::from_positions(&positions)
            .nearest(x, y)
            .map(|slot| NodeId(slot as u32))
    }

    /// Get the bounding box (min_x, min_y, max_x, max_y) of all nodes.
    pub fn get_bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let first = self.nodes.first()?;
        let init = (first.x, first.y, first.x, first.y);

        Some(self.nodes.iter().fold(init, |(min_x, min_y, max_x, max_y), node| {
            (
                min_x.min(node.x),
                min_y.min(node.y),
                max_x.max(node.x),
                max_y.max(node.y),
            )
        }))
    }

    /// Clear all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

fn check_position(x: f32, y: f32) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NonFinitePosition { x, y })
    }
}
