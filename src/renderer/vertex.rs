//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (pixels, y down) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.027, 0.090, 0.133, 1.0]; // #071722
    pub const FINISH_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LABEL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.957, 0.706, 0.0, 1.0]; // #f4b400
    pub const AI_LANES: [[f32; 4]; 2] = [
        [0.424, 0.910, 0.647, 1.0], // #6CE8A5
        [0.533, 0.753, 1.0, 1.0],   // #88C0FF
    ];
    pub const TARGET_ARC: [f32; 4] = [0.957, 0.706, 0.0, 0.15];
    pub const DIAL_RING: [f32; 4] = [1.0, 1.0, 1.0, 0.06];
    pub const NEEDLE: [f32; 4] = [0.957, 0.706, 0.0, 1.0];

    /// High contrast overrides
    pub const HC_PLAYER: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HC_AI: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const HC_TARGET_ARC: [f32; 4] = [1.0, 1.0, 0.0, 0.5];
}
