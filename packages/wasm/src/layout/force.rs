//! Force-directed layout integrator.
//!
//! One layout pass runs `iterations` rounds of three phases over a
//! caller-owned graph:
//!
//! 1. **Accumulate:** centering and pairwise repulsion into each velocity
//!    (see [`super::repulsion`]).
//! 2. **Relax edges:** linear attraction between the endpoints of every edge,
//!    applied as an exact +/- pair.
//! 3. **Integrate:** explicit Euler step with unit time step, then damping.
//!    A step that would leave a node non-finite is dropped: the node keeps
//!    its position and its velocity is zeroed, so a pass that overflows
//!    still leaves a graph the next pass accepts.
//!
//! The engine keeps no state between passes. Positions and velocities live in
//! the node records, so the graph keeps its momentum from one pass to the next
//! and damping drives it toward equilibrium.

use std::borrow::Cow;

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::config::{InvalidEdgePolicy, LayoutConfig};
use super::repulsion::accumulate;
use crate::error::{LayoutError, Result};
use crate::graph::{Edge, EdgeId, Node, NodeId};

/// Summary of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    /// Iterations run.
    pub iterations: u32,
    /// Nodes in the pass.
    pub nodes: usize,
    /// Edges that contributed attraction, per iteration.
    pub edges_applied: usize,
    /// Edges dropped because an endpoint is outside the node sequence.
    pub edges_skipped: usize,
    /// Sum of node speeds after the pass.
    pub total_speed: f32,
    /// Integration steps dropped because they would have overflowed.
    pub overflow_resets: usize,
}

/// The force layout engine.
///
/// Holds only a validated [`LayoutConfig`]; any number of graphs can be laid
/// out with the same engine.
#[derive(Debug, Clone)]
pub struct ForceLayout {
    config: LayoutConfig,
}

impl ForceLayout {
    /// Create an engine from a config, validating it first.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine with the reference constants.
    pub fn with_defaults() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the config. The old one is kept if the new one is invalid.
    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Run one layout pass, mutating `x`, `y`, `vx` and `vy` in place.
    ///
    /// Input is checked once up front: a non-finite node rejects the pass,
    /// and edges with a missing endpoint are skipped or rejected according to
    /// [`LayoutConfig::invalid_edges`]. On error no node has been touched.
    pub fn run(&self, nodes: &mut [Node], edges: &[Edge]) -> Result<LayoutStats> {
        check_nodes(nodes)?;
        let submitted = edges.len();
        let edges = self.resolve_edges(nodes.len(), edges)?;
        let edges_skipped = submitted - edges.len();

        let mut overflow_resets = 0;
        for iteration in 0..self.config.iterations {
            accumulate(nodes, &self.config);
            relax_edges(nodes, &edges, &self.config);
            overflow_resets += integrate(nodes, self.config.damping);
            trace!(iteration, "layout iteration complete");
        }
        if overflow_resets > 0 {
            warn!(overflow_resets, "layout pass overflowed, affected nodes were stopped");
        }

        let stats = LayoutStats {
            iterations: self.config.iterations,
            nodes: nodes.len(),
            edges_applied: edges.len(),
            edges_skipped,
            total_speed: total_speed(nodes),
            overflow_resets,
        };
        debug!(
            nodes = stats.nodes,
            edges = stats.edges_applied,
            skipped = stats.edges_skipped,
            iterations = stats.iterations,
            total_speed = stats.total_speed,
            "layout pass complete"
        );

        Ok(stats)
    }

    fn resolve_edges<'a>(&self, node_count: usize, edges: &'a [Edge]) -> Result<Cow<'a, [Edge]>> {
        let Some(first_bad) = edges.iter().position(|edge| !edge.is_within(node_count)) else {
            return Ok(Cow::Borrowed(edges));
        };

        match self.config.invalid_edges {
            InvalidEdgePolicy::Reject => {
                let edge = edges[first_bad];
                warn!(edge = first_bad, node_count, "rejecting layout pass with dangling edge");
                Err(LayoutError::InvalidEdge {
                    edge: EdgeId(first_bad as u32),
                    from: edge.source,
                    to: edge.target,
                    node_count,
                })
            }
            InvalidEdgePolicy::Skip => {
                let kept: Vec<Edge> = edges
                    .iter()
                    .copied()
                    .filter(|edge| edge.is_within(node_count))
                    .collect();
                let skipped = edges.len() - kept.len();
                warn!(skipped, node_count, "skipping dangling edges");
                Ok(Cow::Owned(kept))
            }
        }
    }
}

impl Default for ForceLayout {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn check_nodes(nodes: &[Node]) -> Result<()> {
    match nodes.iter().position(|node| !node.is_finite()) {
        Some(slot) => {
            warn!(node = slot, "rejecting layout pass with non-finite node");
            Err(LayoutError::NonFiniteNode {
                node: NodeId(slot as u32),
            })
        }
        None => Ok(()),
    }
}

/// Spring-like attraction along every edge. Edges must already be in range.
pub(crate) fn relax_edges(nodes: &mut [Node], edges: &[Edge], config: &LayoutConfig) {
    for edge in edges {
        let (source, target) = (edge.source.index(), edge.target.index());

        let dx = nodes[target].x - nodes[source].x;
        let dy = nodes[target].y - nodes[source].y;
        let distance = (dx * dx + dy * dy).sqrt() + config.epsilon;
        let force = config.attraction * distance;

        let fx = (dx / distance) * force;
        let fy = (dy / distance) * force;

        nodes[source].vx += fx;
        nodes[source].vy += fy;
        nodes[target].vx -= fx;
        nodes[target].vy -= fy;
    }
}

/// Apply velocity to position, then damp the velocity.
///
/// Returns how many nodes were stopped in place because their step was not
/// finite.
pub(crate) fn integrate(nodes: &mut [Node], damping: f32) -> usize {
    let mut resets = 0;
    for node in nodes.iter_mut() {
        let x = node.x + node.vx;
        let y = node.y + node.vy;

        if x.is_finite() && y.is_finite() {
            node.x = x;
            node.y = y;
            node.vx *= damping;
            node.vy *= damping;
        } else {
            node.vx = 0.0;
            node.vy = 0.0;
            resets += 1;
        }
    }
    resets
}

/// Sum of node speeds, the convergence measure reported per pass.
pub fn total_speed(nodes: &[Node]) -> f32 {
    nodes.iter().map(Node::speed).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            Node::new(0.0, 0.0), // A
            Node::new(1.0, 0.0), // B
            Node::new(0.0, 1.0), // C
        ];
        (nodes, vec![Edge::new(0, 1)])
    }

    fn single_iteration() -> ForceLayout {
        ForceLayout::new(LayoutConfig {
            iterations: 1,
            ..LayoutConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let stats = ForceLayout::with_defaults().run(&mut [], &[]).unwrap();
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.total_speed, 0.0);
    }

    #[test]
    fn test_attraction_is_exact_negation() {
        let mut nodes = vec![Node::new(0.3, -1.2), Node::new(2.5, 0.4)];
        relax_edges(&mut nodes, &[Edge::new(0, 1)], &LayoutConfig::default());

        assert_eq!(nodes[0].vx, -nodes[1].vx);
        assert_eq!(nodes[0].vy, -nodes[1].vy);
        assert!(nodes[0].vx > 0.0);
        assert!(nodes[0].vy > 0.0);
    }

    #[test]
    fn test_parallel_edges_count_twice() {
        let config = LayoutConfig::default();
        let mut once = vec![Node::new(0.0, 0.0), Node::new(1.0, 0.0)];
        let mut twice = once.clone();

        relax_edges(&mut once, &[Edge::new(0, 1)], &config);
        relax_edges(&mut twice, &[Edge::new(0, 1), Edge::new(0, 1)], &config);

        assert_relative_eq!(twice[0].vx, 2.0 * once[0].vx);
    }

    #[test]
    fn test_self_loop_is_inert() {
        let mut nodes = vec![Node::new(1.0, 1.0)];
        relax_edges(&mut nodes, &[Edge::new(0, 0)], &LayoutConfig::default());
        assert_eq!(nodes[0].vx, 0.0);
        assert_eq!(nodes[0].vy, 0.0);
    }

    #[test]
    fn test_integrate_moves_then_damps() {
        let mut nodes = vec![Node::new(1.0, 2.0).moving(0.5, -1.0)];
        assert_eq!(integrate(&mut nodes, 0.9), 0);

        assert_eq!(nodes[0].x, 1.5);
        assert_eq!(nodes[0].y, 1.0);
        assert_eq!(nodes[0].vx, 0.5 * 0.9);
        assert_eq!(nodes[0].vy, -1.0 * 0.9);
    }

    #[test]
    fn test_integrate_stops_overflowing_node() {
        let mut nodes = vec![
            Node::new(3.0e38, 1.0).moving(3.0e38, 0.0),
            Node::new(0.0, 0.0).moving(f32::NAN, 0.0),
            Node::new(1.0, 1.0).moving(1.0, 0.0),
        ];
        assert_eq!(integrate(&mut nodes, 0.9), 2);

        assert_eq!(nodes[0], Node::new(3.0e38, 1.0));
        assert_eq!(nodes[1], Node::new(0.0, 0.0));
        assert_eq!((nodes[2].x, nodes[2].vx), (2.0, 0.9));
    }

    #[test]
    fn test_reference_constants_never_lock_up() {
        // Attraction 4 overshoots on every edge, so a connected pair grows
        // until f32 overflows within a few dozen passes
        let layout = ForceLayout::with_defaults();
        let mut nodes = vec![Node::new(0.0, 0.0), Node::new(1.0, 0.0)];
        let edges = [Edge::new(0, 1)];

        let mut resets = 0;
        for pass in 0..60 {
            let stats = layout
                .run(&mut nodes, &edges)
                .unwrap_or_else(|err| panic!("pass {pass} failed: {err}"));
            assert!(nodes.iter().all(Node::is_finite), "pass {pass}: {nodes:?}");
            resets += stats.overflow_resets;
        }
        assert!(resets > 0);
    }

    #[test]
    fn test_three_node_scenario() {
        let (mut nodes, edges) = scenario();
        single_iteration().run(&mut nodes, &edges).unwrap();

        let g = 0.0001_f64;
        let d = 1.01_f64;
        let push = (1.0 / d) * (0.00002 / (d * d));
        let pull = 4.0_f64;
        let diag = 2.0_f64.sqrt() + 0.01;
        let diag_push = (1.0 / diag) * (0.00002 / (diag * diag));

        // Velocities before integration
        let a = (g - push + pull, g - push);
        let b = (-g + push + diag_push - pull, g - diag_push);
        let c = (g - diag_push, -g + push + diag_push);

        let expected = [(0.0, 0.0, a), (1.0, 0.0, b), (0.0, 1.0, c)];
        for (node, (x0, y0, (vx, vy))) in nodes.iter().zip(expected) {
            assert_relative_eq!(node.x as f64, x0 + vx, epsilon = 1e-5);
            assert_relative_eq!(node.y as f64, y0 + vy, epsilon = 1e-5);
            assert_relative_eq!(node.vx as f64, vx * 0.9, epsilon = 1e-5);
            assert_relative_eq!(node.vy as f64, vy * 0.9, epsilon = 1e-5);
        }

        // A and B are pulled together along x, C only drifts
        assert!(nodes[0].vx > 3.0);
        assert!(nodes[1].vx < -3.0);
        assert!(nodes[2].vx.abs() < 0.001);
        assert!(nodes[2].vy.abs() < 0.001);
    }

    #[test]
    fn test_single_node_at_origin_tie_break() {
        let mut nodes = vec![Node::new(0.0, 0.0)];
        let layout = single_iteration();
        layout.run(&mut nodes, &[]).unwrap();

        let g = layout.config().centering;
        assert_eq!(nodes[0].x, g);
        assert_eq!(nodes[0].y, g);
        assert_eq!(nodes[0].vx, g * 0.9);
        assert_eq!(nodes[0].vy, g * 0.9);
    }

    #[test]
    fn test_skips_dangling_edges() {
        let (mut nodes, mut edges) = scenario();
        edges.push(Edge::new(1, 7));

        let stats = ForceLayout::with_defaults().run(&mut nodes, &edges).unwrap();
        assert_eq!(stats.edges_applied, 1);
        assert_eq!(stats.edges_skipped, 1);

        let (mut clean, edges) = scenario();
        ForceLayout::with_defaults().run(&mut clean, &edges).unwrap();
        assert_eq!(nodes, clean);
    }

    #[test]
    fn test_rejects_dangling_edges_without_mutation() {
        let layout = ForceLayout::new(LayoutConfig {
            invalid_edges: InvalidEdgePolicy::Reject,
            ..LayoutConfig::default()
        })
        .unwrap();
        let (mut nodes, mut edges) = scenario();
        edges.push(Edge::new(9, 0));
        let before = nodes.clone();

        let err = layout.run(&mut nodes, &edges).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidEdge {
                edge: EdgeId(1),
                from: NodeId(9),
                to: NodeId(0),
                node_count: 3,
            }
        );
        assert_eq!(nodes, before);
    }

    #[test]
    fn test_rejects_non_finite_node() {
        let mut nodes = vec![Node::new(0.0, 0.0), Node::new(f32::NAN, 1.0)];
        let err = ForceLayout::with_defaults().run(&mut nodes, &[]).unwrap_err();
        assert_eq!(err, LayoutError::NonFiniteNode { node: NodeId(1) });
        assert_eq!(nodes[0], Node::new(0.0, 0.0));
    }

    #[test]
    fn test_set_config_keeps_old_on_error() {
        let mut layout = ForceLayout::with_defaults();
        let bad = LayoutConfig {
            damping: -0.1,
            ..LayoutConfig::default()
        };
        assert!(layout.set_config(bad).is_err());
        assert_eq!(layout.config(), &LayoutConfig::default());
    }
}
