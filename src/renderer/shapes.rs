//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segment count for a circle of this radius: small particles stay cheap,
/// large circles stay round
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(8, 48)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Rectangle in a local frame (`min`..`max`) rotated by `angle` and moved to
/// `origin`
pub fn rotated_rect(origin: Vec2, angle: f32, min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| {
        let p = origin + rot.rotate(Vec2::new(x, y));
        Vertex::new(p.x, p.y, color)
    };

    let a = corner(min.x, min.y);
    let b = corner(max.x, min.y);
    let c = corner(max.x, max.y);
    let d = corner(min.x, max.y);

    // Two triangles
    vec![a, b, c, a, c, d]
}

/// Axis-aligned rectangle covering `size` from the origin
pub fn full_rect(size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rotated_rect(Vec2::ZERO, 0.0, Vec2::ZERO, size, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        for v in verts.iter().skip(1).step_by(3) {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_segments_scale_with_radius() {
        assert_eq!(circle_segments(0.5), 8);
        assert_eq!(circle_segments(20.0), 30);
        assert_eq!(circle_segments(1000.0), 48);
    }

    #[test]
    fn test_rotated_rect_points_along_angle() {
        let verts = rotated_rect(
            Vec2::new(100.0, 100.0),
            PI / 2.0,
            Vec2::new(0.0, -5.0),
            Vec2::new(30.0, 5.0),
            [1.0; 4],
        );
        assert_eq!(verts.len(), 6);
        // Far end of the barrel points straight down (y grows downward)
        let far = verts[2].position;
        assert!((far[0] - 95.0).abs() < 1e-3);
        assert!((far[1] - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_full_rect_covers_viewport() {
        let verts = full_rect(Vec2::new(800.0, 600.0), [0.0, 0.0, 0.0, 0.1]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 800.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 600.0);
    }
}
