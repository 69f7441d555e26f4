//! Rectangular frames with a through hole, used for slider rails.

use super::builder::MeshBuilder;
use super::{clamp_depth, clamp_extent, clamp_range, Mesh, MIN_EXTENT};
use glam::{Vec2, Vec3};

/// Border width used by [`build_hollow_cube`].
pub const DEFAULT_HOLLOW_MARGIN: f32 = 0.005;
/// Depth used by [`build_hollow_cube`].
pub const DEFAULT_HOLLOW_THICKNESS: f32 = 0.005;

/// Frame with [`DEFAULT_HOLLOW_MARGIN`] and [`DEFAULT_HOLLOW_THICKNESS`].
pub fn build_hollow_cube(width: f32, height: f32) -> Mesh {
    build_hollow_cube_ex(width, height, DEFAULT_HOLLOW_MARGIN, DEFAULT_HOLLOW_THICKNESS)
}

/// Frame of border `margin` spanning `[0, width] x [-height/2, height/2] x
/// [-thickness, 0]`.
///
/// Rails are vertically centered on their parent's anchor line and extrude
/// toward the viewer, so this builder uses a different frame than the boxes.
/// The margin always leaves a hole of at least [`MIN_EXTENT`]. The mesh has
/// 48 vertices and 96 indices.
pub fn build_hollow_cube_ex(width: f32, height: f32, margin: f32, thickness: f32) -> Mesh {
    let width = clamp_extent("hollow frame width", width);
    let height = clamp_extent("hollow frame height", height);
    let thickness = clamp_depth("hollow frame thickness", thickness);
    let max_margin = (width.min(height) * 0.5 - MIN_EXTENT).max(0.0);
    let m = clamp_range("hollow frame margin", margin, 0.0, max_margin);

    let h2 = height * 0.5;
    let corners = |z: f32| {
        (
            [
                Vec3::new(0.0, h2, z),
                Vec3::new(width, h2, z),
                Vec3::new(0.0, -h2, z),
                Vec3::new(width, -h2, z),
            ],
            [
                Vec3::new(m, h2 - m, z),
                Vec3::new(width - m, h2 - m, z),
                Vec3::new(m, -h2 + m, z),
                Vec3::new(width - m, -h2 + m, z),
            ],
        )
    };
    let (front_outer, front_inner) = corners(-thickness);
    let (back_outer, back_inner) = corners(0.0);

    let mut b = MeshBuilder::with_capacity(48, 96);

    // Face rings: outer corners 0..4, inner corners 4..8.
    for (outer, inner, normal) in [
        (front_outer, front_inner, Vec3::NEG_Z),
        (back_outer, back_inner, Vec3::Z),
    ] {
        let base = b.vertex_count();
        for p in outer.iter().chain(inner.iter()) {
            let uv = Vec2::new(p.x / width, (h2 - p.y) / height);
            b.vertex(*p, normal, uv);
        }
        for [i, j, k] in [
            [0, 1, 4],
            [4, 1, 5],
            [5, 1, 7],
            [7, 1, 3],
            [7, 3, 6],
            [6, 3, 2],
            [6, 2, 4],
            [4, 2, 0],
        ] {
            b.triangle_facing(base + i, base + j, base + k, normal);
        }
    }

    // Outer walls face away from the frame, inner walls face into the hole.
    let [tl, tr, bl, br] = [0, 1, 2, 3];
    let sides = [
        (tl, tr, Vec3::Y),
        (bl, br, Vec3::NEG_Y),
        (tl, bl, Vec3::NEG_X),
        (tr, br, Vec3::X),
    ];
    for (i, j, normal) in sides {
        b.quad(
            [front_outer[i], front_outer[j], back_outer[i], back_outer[j]],
            normal,
        );
    }
    for (i, j, normal) in sides {
        b.quad(
            [front_inner[i], front_inner[j], back_inner[i], back_inner[j]],
            -normal,
        );
    }

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_topology() {
        let mesh = build_hollow_cube_ex(0.3, 0.02, 0.004, 0.01);
        assert_eq!(mesh.vertex_count(), 48);
        assert_eq!(mesh.indices().len(), 96);
    }

    #[test]
    fn frame_bounds_are_centered_vertically() {
        let bounds = build_hollow_cube_ex(0.3, 0.02, 0.004, 0.01).bounds().unwrap();
        assert!((bounds.min - Vec3::new(0.0, -0.01, -0.01)).length() < 1e-6);
        assert!((bounds.max - Vec3::new(0.3, 0.01, 0.0)).length() < 1e-6);
    }

    #[test]
    fn oversized_margin_keeps_a_hole() {
        let mesh = build_hollow_cube_ex(0.1, 0.02, 1.0, 0.01);
        let inner_top = mesh.positions()[4].y;
        let inner_bottom = mesh.positions()[6].y;
        assert!(inner_top - inner_bottom >= 2.0 * MIN_EXTENT - 1e-6);
    }

    #[test]
    fn inner_walls_face_the_hole() {
        let mesh = build_hollow_cube_ex(1.0, 1.0, 0.1, 0.1);
        let center = Vec3::new(0.5, 0.0, -0.05);
        // Inner walls are the last 16 vertices.
        for (p, n) in mesh.positions()[32..].iter().zip(&mesh.normals()[32..]) {
            assert!((center - *p).dot(*n) > 0.0);
        }
        for (p, n) in mesh.positions()[16..32].iter().zip(&mesh.normals()[16..32]) {
            assert!((*p - center).dot(*n) > 0.0);
        }
    }

    #[test]
    fn default_frame_uses_default_dimensions() {
        let size = build_hollow_cube(0.2, 0.05).bounds().unwrap().size();
        assert!((size.z - DEFAULT_HOLLOW_THICKNESS).abs() < 1e-7);
    }
}
