//! Slider knob: a foot prism with a head prism stacked toward the viewer.

use super::builder::MeshBuilder;
use super::{clamp_depth, clamp_extent, Mesh};
use glam::Vec3;

/// Knob whose head and foot share the same dimensions.
pub fn build_slider_knob(width: f32, height: f32, depth: f32) -> Mesh {
    build_slider_knob_ex(width, height, depth, width, height, depth)
}

/// Two prisms centered on the XY origin. The foot spans
/// `z in [-foot_depth, 0]`; the head sits in front of it at
/// `z in [-foot_depth - head_depth, -foot_depth]`.
///
/// 48 vertices and 72 indices.
pub fn build_slider_knob_ex(
    head_width: f32,
    head_height: f32,
    head_depth: f32,
    foot_width: f32,
    foot_height: f32,
    foot_depth: f32,
) -> Mesh {
    let head = Vec3::new(
        clamp_extent("knob head width", head_width),
        clamp_extent("knob head height", head_height),
        clamp_depth("knob head depth", head_depth),
    );
    let foot = Vec3::new(
        clamp_extent("knob foot width", foot_width),
        clamp_extent("knob foot height", foot_height),
        clamp_depth("knob foot depth", foot_depth),
    );

    let mut b = MeshBuilder::with_capacity(48, 72);
    b.cuboid(
        Vec3::new(-foot.x * 0.5, -foot.y * 0.5, -foot.z),
        Vec3::new(foot.x * 0.5, foot.y * 0.5, 0.0),
    );
    b.cuboid(
        Vec3::new(-head.x * 0.5, -head.y * 0.5, -foot.z - head.z),
        Vec3::new(head.x * 0.5, head.y * 0.5, -foot.z),
    );
    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knob_topology() {
        let mesh = build_slider_knob_ex(0.02, 0.03, 0.01, 0.01, 0.02, 0.005);
        assert_eq!(mesh.vertex_count(), 48);
        assert_eq!(mesh.indices().len(), 72);
    }

    #[test]
    fn head_sits_in_front_of_foot() {
        let mesh = build_slider_knob_ex(0.04, 0.04, 0.01, 0.02, 0.02, 0.005);
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.min.z + 0.015).abs() < 1e-6);
        assert_eq!(bounds.max.z, 0.0);
        assert!((bounds.center().x).abs() < 1e-6);
        assert!((bounds.center().y).abs() < 1e-6);
        // Head is the wider of the two.
        assert!((bounds.size().x - 0.04).abs() < 1e-6);
    }

    #[test]
    fn symmetric_knob_doubles_depth() {
        let size = build_slider_knob(0.02, 0.02, 0.01).bounds().unwrap().size();
        assert!((size.z - 0.02).abs() < 1e-6);
    }
}
