//! Force accumulation: centering plus pairwise repulsion.
//!
//! Every node recomputes its own push from the others against a snapshot of
//! the positions taken at the start of the phase. Nodes only ever write their
//! own velocity, which is what lets the phase run on disjoint slices across
//! threads with no synchronisation beyond the phase boundary.

use super::config::{LayoutConfig, RepulsionMode};
use crate::graph::Node;
use crate::spatial::SpatialIndex;

/// Add the centering and repulsion terms of one iteration to every velocity.
pub(crate) fn accumulate(nodes: &mut [Node], config: &LayoutConfig) {
    let positions: Vec<[f32; 2]> = nodes.iter().map(|node| [node.x, node.y]).collect();

    match config.repulsion_mode {
        RepulsionMode::Exact => for_each_node(nodes, config, |slot, node| {
            push_node(node, slot, &positions, 0..positions.len(), config);
        }),
        RepulsionMode::Cutoff { radius } => {
            let index = SpatialIndex::from_positions(&positions);
            for_each_node(nodes, config, |slot, node| {
                let neighbours = index.in_radius(node.x, node.y, radius);
                push_node(node, slot, &positions, neighbours, config);
            });
        }
    }
}

/// Centering term for one axis. Zero takes the positive branch.
#[inline]
pub(crate) fn centering(coord: f32, magnitude: f32) -> f32 {
    if coord > 0.0 { -magnitude } else { magnitude }
}

/// Repulsion applied to a node at `(dx, dy)` from its neighbour.
#[inline]
pub(crate) fn repulsion(dx: f32, dy: f32, config: &LayoutConfig) -> (f32, f32) {
    let distance = (dx * dx + dy * dy).sqrt() + config.epsilon;
    let force = config.repulsion / (distance * distance);
    ((dx / distance) * force, (dy / distance) * force)
}

fn push_node(
    node: &mut Node,
    slot: usize,
    positions: &[[f32; 2]],
    others: impl IntoIterator<Item = usize>,
    config: &LayoutConfig,
) {
    node.vx += centering(node.x, config.centering);
    node.vy += centering(node.y, config.centering);

    let [x, y] = positions[slot];
    for other in others {
        if other == slot {
            continue;
        }
        let [ox, oy] = positions[other];
        let (fx, fy) = repulsion(x - ox, y - oy, config);
        node.vx += fx;
        node.vy += fy;
    }
}

#[cfg(feature = "parallel")]
fn for_each_node<F>(nodes: &mut [Node], config: &LayoutConfig, f: F)
where
    F: Fn(usize, &mut Node) + Sync + Send,
{
    use rayon::prelude::*;

    if nodes.len() >= config.parallel_threshold {
        nodes
            .par_iter_mut()
            .enumerate()
            .for_each(|(slot, node)| f(slot, node));
    } else {
        nodes
            .iter_mut()
            .enumerate()
            .for_each(|(slot, node)| f(slot, node));
    }
}

#[cfg(not(feature = "parallel"))]
fn for_each_node<F>(nodes: &mut [Node], _config: &LayoutConfig, f: F)
where
    F: Fn(usize, &mut Node),
{
    nodes
        .iter_mut()
        .enumerate()
        .for_each(|(slot, node)| f(slot, node));
}
