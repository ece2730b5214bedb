//! Spatial indexing for neighbourhood queries.
//!
//! This module provides an R-tree based spatial index used to bound the
//! repulsion phase to nearby nodes.

mod rtree;

pub use rtree::SpatialIndex;
