//! Boxes with rounded corners in the XY plane.

use super::builder::MeshBuilder;
use super::{build_box_ex, clamp_depth, clamp_extent, clamp_range, Mesh, MIN_EXTENT};
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Fixed part of the default corner subdivision.
pub const DEFAULT_CORNER_SEGMENTS_FIXED: u32 = 3;
/// Extra corner subdivisions per unit of arc length.
pub const DEFAULT_CORNER_SEGMENTS_PER_UNIT: u32 = 3;

/// Number of arc segments for a quarter circle of `radius`:
/// `floor(fixed + radius * PI / 2 * per_unit) + 1`.
pub fn corner_segments_for(radius: f32, fixed: u32, per_unit: u32) -> u32 {
    let arc_length = radius.max(0.0) * FRAC_PI_2;
    (fixed as f32 + arc_length * per_unit as f32).floor() as u32 + 1
}

/// `(vertices, indices)` emitted by [`build_rounded_box_ex`] for
/// `corner_segments` segments per corner and a non-zero radius.
pub fn rounded_box_counts(corner_segments: u32) -> (usize, usize) {
    let s = corner_segments.max(1) as usize;
    (64 + 16 * s, 84 + 48 * s)
}

/// Rounded box with the default corner subdivision for `radius`.
pub fn build_rounded_box(width: f32, height: f32, radius: f32, thickness: f32) -> Mesh {
    let segments = corner_segments_for(
        radius,
        DEFAULT_CORNER_SEGMENTS_FIXED,
        DEFAULT_CORNER_SEGMENTS_PER_UNIT,
    );
    build_rounded_box_ex(width, height, radius, thickness, segments)
}

/// Box spanning `[0, width] x [-height, 0] x [0, thickness]` whose four
/// XY corners are quarter circles of `radius`, each cut into
/// `corner_segments` segments.
///
/// `radius` is clamped into `[0, min(width, height) / 2]`; below
/// [`MIN_EXTENT`] the result is a plain [`build_box_ex`]. Otherwise the mesh
/// has `64 + 16 s` vertices and `84 + 48 s` indices (see
/// [`rounded_box_counts`]).
pub fn build_rounded_box_ex(
    width: f32,
    height: f32,
    radius: f32,
    thickness: f32,
    corner_segments: u32,
) -> Mesh {
    let width = clamp_extent("rounded box width", width);
    let height = clamp_extent("rounded box height", height);
    let thickness = clamp_depth("rounded box thickness", thickness);
    let r = clamp_range("rounded box radius", radius, 0.0, width.min(height) * 0.5);
    if r < MIN_EXTENT {
        return build_box_ex(width, height, thickness);
    }
    let segments = corner_segments.max(1);

    let (vertex_count, index_count) = rounded_box_counts(segments);
    let mut b = MeshBuilder::with_capacity(vertex_count, index_count);
    let uv = |p: Vec3| Vec2::new(p.x / width, -p.y / height);

    let inner = [
        Vec3::new(r, -r, 0.0),
        Vec3::new(width - r, -r, 0.0),
        Vec3::new(r, -height + r, 0.0),
        Vec3::new(width - r, -height + r, 0.0),
    ];
    let [top_left, top_right, bottom_left, bottom_right] = inner;
    let up = Vec3::new(0.0, r, 0.0);
    let side = Vec3::new(r, 0.0, 0.0);

    // Front and back plates: inner rectangle plus four edge strips.
    for (z, normal) in [(0.0, Vec3::NEG_Z), (thickness, Vec3::Z)] {
        let dz = Vec3::new(0.0, 0.0, z);
        let base = b.vertex_count();
        for p in [
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            top_left + up,
            top_right + up,
            top_left - side,
            top_right + side,
            bottom_left - side,
            bottom_right + side,
            bottom_left - up,
            bottom_right - up,
        ] {
            b.vertex(p + dz, normal, uv(p));
        }
        for [i, j, k] in [
            [4, 5, 1],
            [4, 1, 0],
            [6, 0, 2],
            [6, 2, 8],
            [0, 1, 3],
            [0, 3, 2],
            [1, 7, 9],
            [1, 9, 3],
            [2, 3, 11],
            [2, 11, 10],
        ] {
            b.triangle_facing(base + i, base + j, base + k, normal);
        }
    }

    // Flat side walls between the corners.
    let back = Vec3::new(0.0, 0.0, thickness);
    let walls = [
        (top_left + up, top_right + up, Vec3::Y),
        (top_left - side, bottom_left - side, Vec3::NEG_X),
        (top_right + side, bottom_right + side, Vec3::X),
        (bottom_left - up, bottom_right - up, Vec3::NEG_Y),
    ];
    for (start, end, normal) in walls {
        b.quad_with_uvs(
            [start, end, start + back, end + back],
            normal,
            [uv(start), uv(end), uv(start), uv(end)],
        );
    }

    // Corners: arc from direction `a` to direction `b` around the inner point.
    let corners = [
        (top_left, Vec3::Y, Vec3::NEG_X),
        (top_right, Vec3::Y, Vec3::X),
        (bottom_left, Vec3::NEG_Y, Vec3::NEG_X),
        (bottom_right, Vec3::NEG_Y, Vec3::X),
    ];
    for (center, dir_a, dir_b) in corners {
        let arc: Vec<Vec3> = (0..=segments)
            .map(|k| {
                let theta = FRAC_PI_2 * k as f32 / segments as f32;
                dir_a * theta.cos() + dir_b * theta.sin()
            })
            .collect();

        for (z, normal) in [(0.0, Vec3::NEG_Z), (thickness, Vec3::Z)] {
            let dz = Vec3::new(0.0, 0.0, z);
            let hub = b.vertex(center + dz, normal, uv(center));
            let first = b.vertex_count();
            for dir in &arc {
                let p = center + *dir * r;
                b.vertex(p + dz, normal, uv(p));
            }
            for k in 0..segments {
                b.triangle_facing(hub, first + k, first + k + 1, normal);
            }
        }

        let first = b.vertex_count();
        for dir in &arc {
            let p = center + *dir * r;
            b.vertex(p, *dir, uv(p));
            b.vertex(p + back, *dir, uv(p));
        }
        for k in 0..segments {
            let facing = arc[k as usize] + arc[k as usize + 1];
            let front = first + 2 * k;
            let rear = front + 1;
            let next_front = front + 2;
            let next_rear = front + 3;
            b.triangle_facing(front, rear, next_front, facing);
            b.triangle_facing(rear, next_rear, next_front, facing);
        }
    }

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_formula() {
        for segments in [1, 2, 4, 7] {
            let mesh = build_rounded_box_ex(1.0, 0.5, 0.1, 0.02, segments);
            let (v, i) = rounded_box_counts(segments);
            assert_eq!(mesh.vertex_count(), v);
            assert_eq!(mesh.indices().len(), i);
        }
    }

    #[test]
    fn zero_segments_behaves_like_one() {
        let a = build_rounded_box_ex(1.0, 0.5, 0.1, 0.02, 0);
        let b = build_rounded_box_ex(1.0, 0.5, 0.1, 0.02, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_radius_falls_back_to_box() {
        let mesh = build_rounded_box_ex(1.0, 0.5, 0.0, 0.02, 4);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices().len(), 36);
    }

    #[test]
    fn bounds_ignore_radius() {
        for radius in [0.0, 0.01, 0.1, 0.25, 0.5, 3.0] {
            let size = build_rounded_box(1.0, 0.5, radius, 0.02)
                .bounds()
                .unwrap()
                .size();
            assert!((size.x - 1.0).abs() < 1e-5, "radius {radius}: {size:?}");
            assert!((size.y - 0.5).abs() < 1e-5, "radius {radius}: {size:?}");
            assert!((size.z - 0.02).abs() < 1e-6, "radius {radius}: {size:?}");
        }
    }

    #[test]
    fn default_subdivision_grows_with_radius() {
        assert_eq!(corner_segments_for(0.0, 3, 3), 4);
        assert!(corner_segments_for(1.0, 3, 3) > corner_segments_for(0.1, 3, 3));
    }

    #[test]
    fn corner_side_normals_point_outward() {
        let mesh = build_rounded_box_ex(1.0, 1.0, 0.2, 0.1, 3);
        let center = Vec3::new(0.5, -0.5, 0.05);
        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            let to_vertex = *p - center;
            assert!(to_vertex.dot(*n) >= 0.0);
        }
    }
}
