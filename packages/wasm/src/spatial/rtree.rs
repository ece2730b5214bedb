//! R-tree based spatial index using the rstar crate.
//!
//! Used by the cutoff repulsion mode to find the nodes close enough to push
//! on a given node without scanning the whole graph.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A point in the spatial index with the slot of the node it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// Index of the node in the node sequence.
    pub slot: usize,
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(slot: usize, x: f32, y: f32) -> Self {
        Self { slot, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        (self.x - point[0]).abs() < f32::EPSILON && (self.y - point[1]).abs() < f32::EPSILON
    }
}

/// Spatial index over a snapshot of node positions.
///
/// Uses an R*-tree, bulk loaded once per layout iteration.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Bulk load an index where slot `i` sits at `positions[i]`.
    pub fn from_positions(positions: &[[f32; 2]]) -> Self {
        let points: Vec<_> = positions
            .iter()
            .enumerate()
            .map(|(slot, &[x, y])| NodePoint::new(slot, x, y))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Find the nearest slot to a point.
    pub fn nearest(&self, x: f32, y: f32) -> Option<usize> {
        self.tree.nearest_neighbor(&[x, y]).map(|point| point.slot)
    }

    /// Find all slots within `radius` of a point (boundary included), in
    /// ascending slot order.
    pub fn in_radius(&self, x: f32, y: f32, radius: f32) -> Vec<usize> {
        let radius_sq = radius * radius;
        let mut slots: Vec<usize> = self
            .tree
            .locate_within_distance([x, y], radius_sq)
            .map(|point| point.slot)
            .collect();
        slots.sort_unstable();
        slots
    }
}
