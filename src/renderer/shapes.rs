//! Shape generation for 2D primitives
//!
//! Screen space: origin top-left, y down. Dial angles are degrees,
//! counter-clockwise from the +x axis as seen on screen.

use glam::Vec2;

use super::vertex::Vertex;

/// Unit direction on screen for a dial angle in degrees
#[inline]
pub fn dial_direction(angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(theta.cos(), -theta.sin())
}

/// Axis-aligned rectangle as two triangles
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Filled pie slice from `start_deg` sweeping `size_deg` counter-clockwise
pub fn wedge(
    center: Vec2,
    radius: f32,
    start_deg: f32,
    size_deg: f32,
    segments: usize,
    color: [f32; 4],
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity(segments * 3);

    for i in 0..segments {
        let a0 = start_deg + size_deg * i as f32 / segments as f32;
        let a1 = start_deg + size_deg * (i + 1) as f32 / segments as f32;
        let p0 = center + dial_direction(a0) * radius;
        let p1 = center + dial_direction(a1) * radius;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p0.x, p0.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
    }

    vertices
}

/// Closed ring band centred on `radius`
pub fn ring(
    center: Vec2,
    radius: f32,
    thickness: f32,
    segments: usize,
    color: [f32; 4],
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let inner_r = radius - thickness / 2.0;
    let outer_r = radius + thickness / 2.0;
    let mut vertices = Vec::with_capacity(segments * 6);

    for i in 0..segments {
        let a0 = 360.0 * i as f32 / segments as f32;
        let a1 = 360.0 * (i + 1) as f32 / segments as f32;
        let (d0, d1) = (dial_direction(a0), dial_direction(a1));

        let i0 = center + d0 * inner_r;
        let o0 = center + d0 * outer_r;
        let i1 = center + d1 * inner_r;
        let o1 = center + d1 * outer_r;

        vertices.push(Vertex::new(i0.x, i0.y, color));
        vertices.push(Vertex::new(o0.x, o0.y, color));
        vertices.push(Vertex::new(o1.x, o1.y, color));

        vertices.push(Vertex::new(i0.x, i0.y, color));
        vertices.push(Vertex::new(o1.x, o1.y, color));
        vertices.push(Vertex::new(i1.x, i1.y, color));
    }

    vertices
}

/// Tapered needle from near the hub out to `length`, pointing at `angle_deg`
pub fn needle(
    center: Vec2,
    angle_deg: f32,
    length: f32,
    half_width: f32,
    color: [f32; 4],
) -> [Vertex; 3] {
    let dir = dial_direction(angle_deg);
    let perp = Vec2::new(-dir.y, dir.x);

    let base = center + dir * 10.0;
    let tip = center + dir * length;
    let left = tip + perp * half_width;
    let right = tip - perp * half_width;

    [
        Vertex::new(base.x, base.y, color),
        Vertex::new(left.x, left.y, color),
        Vertex::new(right.x, right.y, color),
    ]
}
