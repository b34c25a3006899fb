//! CPU-side draw list
//!
//! Collects one frame of [`Renderer`] calls as a triangle list in playfield
//! pixels. The fade quad goes first so everything drawn this frame lands on
//! top of the dimmed previous frame.

use glam::Vec2;

use super::Renderer;
use super::shapes;
use super::vertex::Vertex;
use crate::colors;
use crate::consts::{BARREL_LENGTH, BARREL_WIDTH};

#[derive(Debug, Clone)]
pub struct VertexBatch {
    size: Vec2,
    vertices: Vec<Vertex>,
    frames: u64,
}

impl VertexBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            vertices: Vec::new(),
            frames: 0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Triangles recorded since the last `clear_with_trail`
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Frames started so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for VertexBatch {
    fn clear_with_trail(&mut self, fade_alpha: f32) {
        self.frames += 1;
        self.vertices.clear();
        let mut fade = colors::BACKGROUND;
        fade[3] = fade_alpha.clamp(0.0, 1.0);
        self.vertices.extend(shapes::full_rect(self.size, fade));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let mut color = color;
        color[3] *= alpha.clamp(0.0, 1.0);
        let segments = shapes::circle_segments(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color, segments));
    }

    fn draw_facing_indicator(&mut self, origin: Vec2, angle: f32) {
        let half = BARREL_WIDTH / 2.0;
        self.vertices.extend(shapes::rotated_rect(
            origin,
            angle,
            Vec2::new(0.0, -half),
            Vec2::new(BARREL_LENGTH, half),
            colors::BARREL,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_starts_with_fade_quad() {
        let mut batch = VertexBatch::new(800.0, 600.0);
        batch.draw_circle(Vec2::new(10.0, 10.0), 5.0, colors::PROJECTILE, 1.0);
        batch.clear_with_trail(0.1);
        assert_eq!(batch.frames(), 1);
        assert_eq!(batch.vertices().len(), 6);
        for v in batch.vertices() {
            assert_eq!(v.color, [0.0, 0.0, 0.0, 0.1]);
        }
    }

    #[test]
    fn test_circle_alpha_multiplies() {
        let mut batch = VertexBatch::new(800.0, 600.0);
        batch.clear_with_trail(1.0);
        batch.draw_circle(Vec2::new(50.0, 50.0), 2.0, colors::ZOMBIE, 0.25);
        let last = batch.vertices().last().unwrap();
        assert!((last.color[3] - 0.25).abs() < 1e-6);
        assert_eq!(last.color[1], colors::ZOMBIE[1]);
    }

    #[test]
    fn test_degenerate_circle_skipped() {
        let mut batch = VertexBatch::new(800.0, 600.0);
        batch.clear_with_trail(1.0);
        batch.draw_circle(Vec2::ZERO, 0.0, colors::ZOMBIE, 1.0);
        batch.draw_circle(Vec2::ZERO, -1.0, colors::ZOMBIE, 1.0);
        assert_eq!(batch.vertices().len(), 6);
    }

    #[test]
    fn test_facing_indicator_is_one_quad() {
        let mut batch = VertexBatch::new(800.0, 600.0);
        batch.clear_with_trail(1.0);
        batch.draw_facing_indicator(Vec2::new(400.0, 300.0), 0.0);
        let barrel = &batch.vertices()[6..];
        assert_eq!(barrel.len(), 6);
        assert!(barrel.iter().all(|v| v.color == colors::BARREL));
        let max_x = barrel
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - (400.0 + BARREL_LENGTH)).abs() < 1e-4);
    }

    #[test]
    fn test_resize_changes_fade_quad() {
        let mut batch = VertexBatch::new(800.0, 600.0);
        batch.resize(1024.0, 768.0);
        batch.clear_with_trail(1.0);
        let max_x = batch
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 1024.0);
    }
}
