//! Rendering
//!
//! The simulation draws through the [`Renderer`] trait in playfield pixel
//! coordinates (origin top-left, y down). [`VertexBatch`] turns those calls
//! into triangles; [`RenderState`] uploads them to the GPU and keeps the
//! previous frame around so the trail fade works.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use batch::VertexBatch;
pub use pipeline::RenderState;
pub use vertex::Vertex;

/// Drawing surface used by the game
pub trait Renderer {
    /// Start a frame by painting black at `fade_alpha` over the last one.
    /// 1.0 is a full clear; smaller values leave motion trails.
    fn clear_with_trail(&mut self, fade_alpha: f32);

    /// Filled circle. `alpha` multiplies the color's own alpha.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], alpha: f32);

    /// The player's gun barrel, rotated to `angle` around `origin`
    fn draw_facing_indicator(&mut self, origin: Vec2, angle: f32);
}
