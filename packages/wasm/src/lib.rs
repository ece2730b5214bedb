//! Particle Graph - WASM Module
//!
//! This module provides the force-directed layout behind the particle graph
//! visualization. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; rendering, the event stream and
//! the page itself stay on the JavaScript side.
//!
//! # Architecture
//!
//! - `graph`: Particle records, edges and the caller-owned `ParticleGraph`
//! - `layout`: The force integrator, its config and the pass throttle
//! - `spatial`: R-tree spatial index for cutoff repulsion and hit testing
//! - `error`: Error type shared by the layout and the config

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod spatial;

pub use error::LayoutError;
pub use graph::{Edge, EdgeId, Node, NodeId, ParticleGraph};
pub use layout::{ForceLayout, LayoutConfig, LayoutStats, LayoutThrottle};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the layout engine.
///
/// Owns the particle graph the ingestion pipeline grows, the layout engine
/// and the throttle that spaces out passes from the render loop.
#[wasm_bindgen]
pub struct ParticleLayoutWasm {
    graph: ParticleGraph,
    layout: ForceLayout,
    throttle: LayoutThrottle,
}

#[wasm_bindgen]
impl ParticleLayoutWasm {
    /// Create an empty graph with the reference layout constants.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            graph: ParticleGraph::new(),
            layout: ForceLayout::with_defaults(),
            throttle: LayoutThrottle::default(),
        }
    }

    /// Create an empty graph with pre-allocated capacity.
    #[wasm_bindgen(js_name = withCapacity)]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: ParticleGraph::with_capacity(node_capacity, edge_capacity),
            ..Self::new()
        }
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a resting node. Returns its ID; throws on a non-finite position.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, x: f32, y: f32, mass: f32) -> std::result::Result<u32, JsValue> {
        let id = self.graph.add_node(x, y, mass).map_err(JsError::from)?;
        Ok(id.0)
    }

    /// Add unit-mass nodes from a Float32Array [x0, y0, x1, y1, ...].
    /// Returns the number of nodes added; throws without adding any if a
    /// position is not finite.
    #[wasm_bindgen(js_name = addNodesFromPositions)]
    pub fn add_nodes_from_positions(
        &mut self,
        positions: &[f32],
    ) -> std::result::Result<u32, JsValue> {
        Ok(self
            .graph
            .add_nodes_from_positions(positions)
            .map_err(JsError::from)?)
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.graph.node_count()
    }

    #[wasm_bindgen(js_name = getNodeX)]
    pub fn get_node_x(&self, node_id: u32) -> Option<f32> {
        self.graph.get_node_position(NodeId(node_id)).map(|(x, _)| x)
    }

    #[wasm_bindgen(js_name = getNodeY)]
    pub fn get_node_y(&self, node_id: u32) -> Option<f32> {
        self.graph.get_node_position(NodeId(node_id)).map(|(_, y)| y)
    }

    /// Move a node. Returns false for an unknown ID; throws on a non-finite
    /// position.
    #[wasm_bindgen(js_name = setNodePosition)]
    pub fn set_node_position(
        &mut self,
        node_id: u32,
        x: f32,
        y: f32,
    ) -> std::result::Result<bool, JsValue> {
        Ok(self
            .graph
            .set_node_position(NodeId(node_id), x, y)
            .map_err(JsError::from)?)
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge between two nodes.
    ///
    /// Returns the edge ID, or undefined if source/target don't exist.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, source: u32, target: u32) -> Option<u32> {
        self.graph
            .add_edge(NodeId(source), NodeId(target))
            .map(|id| id.0)
    }

    /// Add edges from a Uint32Array [src0, tgt0, src1, tgt1, ...].
    /// Returns the number of edges added.
    #[wasm_bindgen(js_name = addEdgesFromPairs)]
    pub fn add_edges_from_pairs(&mut self, pairs: &[u32]) -> u32 {
        self.graph.add_edges_from_pairs(pairs)
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Replace the layout config with a plain object of camelCase fields.
    /// Missing fields take their defaults; an invalid config throws.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> std::result::Result<(), JsValue> {
        let config: LayoutConfig = serde_wasm_bindgen::from_value(config)?;
        self.layout.set_config(config).map_err(JsError::from)?;
        Ok(())
    }

    /// Get the current layout config as a plain object.
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> std::result::Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.layout.config())?)
    }

    /// Run one layout pass now. Returns the pass stats.
    #[wasm_bindgen(js_name = runLayout)]
    pub fn run_layout(&mut self) -> std::result::Result<JsValue, JsValue> {
        let stats = self
            .graph
            .run_layout(&self.layout)
            .map_err(JsError::from)?;
        Ok(serde_wasm_bindgen::to_value(&stats)?)
    }

    /// Run a layout pass if the throttle interval has elapsed at `now_ms`.
    ///
    /// Returns the pass stats, or undefined when the pass was skipped.
    pub fn tick(&mut self, now_ms: f64) -> std::result::Result<JsValue, JsValue> {
        if !self.throttle.ready(now_ms) {
            return Ok(JsValue::UNDEFINED);
        }
        self.run_layout()
    }

    /// Change the minimum spacing between throttled passes.
    #[wasm_bindgen(js_name = setTickInterval)]
    pub fn set_tick_interval(&mut self, interval_ms: f64) {
        self.throttle = LayoutThrottle::new(interval_ms);
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as a Float32Array [x0, y0, x1, y1, ...].
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        Float32Array::from(&self.graph.positions_interleaved()[..])
    }

    /// Velocities as a Float32Array [vx0, vy0, vx1, vy1, ...].
    #[wasm_bindgen(js_name = getVelocities)]
    pub fn get_velocities(&self) -> Float32Array {
        Float32Array::from(&self.graph.velocities_interleaved()[..])
    }

    // =========================================================================
    // Graph Utilities
    // =========================================================================

    /// Find the node nearest to a point.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f32, y: f32) -> Option<u32> {
        self.graph.find_nearest_node(x, y).map(|id| id.0)
    }

    /// Get the bounding box as [min_x, min_y, max_x, max_y], or undefined if
    /// the graph is empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        self.graph
            .get_bounds()
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
    }

    /// Clear all nodes and edges. The next `tick` runs immediately.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.throttle.reset();
    }
}

impl Default for ParticleLayoutWasm {
    fn default() -> Self {
        Self::new()
    }
}
