//! Solid rectangular boxes.

use super::builder::MeshBuilder;
use super::{clamp_depth, clamp_extent, Mesh};
use glam::Vec3;

/// Depth used by [`build_box`] for flat, card-like widgets.
pub const DEFAULT_BOX_THICKNESS: f32 = 0.001;

/// Thin box of [`DEFAULT_BOX_THICKNESS`].
pub fn build_box(width: f32, height: f32) -> Mesh {
    build_box_ex(width, height, DEFAULT_BOX_THICKNESS)
}

/// Six-face prism spanning `[0, width] x [-height, 0] x [0, thickness]`.
///
/// Always 24 vertices (4 unshared per face, flat normals up, left, right,
/// down, back, forward) and 36 indices.
pub fn build_box_ex(width: f32, height: f32, thickness: f32) -> Mesh {
    let width = clamp_extent("box width", width);
    let height = clamp_extent("box height", height);
    let thickness = clamp_depth("box thickness", thickness);

    let mut builder = MeshBuilder::with_capacity(24, 36);
    builder.cuboid(
        Vec3::new(0.0, -height, 0.0),
        Vec3::new(width, 0.0, thickness),
    );
    builder.finish()
}
