//! Property-based tests for the mesh builders
//!
//! Validates for arbitrary in-range dimensions:
//! - Every builder emits a structurally sound mesh
//! - Vertex and index counts follow the documented formulas
//! - Bounds match the documented local frame
//! - Building is deterministic

use proptest::prelude::*;
use vrwidgets_testkit::assert_mesh_well_formed;
use vrwidgets_ui3d::geometry::{
    build_box_ex, build_hollow_cube_ex, build_rounded_box_ex, build_rounded_rect_tube_ex,
    build_slider_knob_ex, rounded_box_counts, TubeParams, MIN_EXTENT,
};

const EPS: f32 = 1e-4;

proptest! {
    /// Property: boxes always have 24 vertices and span the expected volume
    #[test]
    fn box_counts_and_bounds(
        width in 0.01f32..2.0,
        height in 0.01f32..2.0,
        thickness in 0.0f32..0.1,
    ) {
        let mesh = build_box_ex(width, height, thickness);
        assert_mesh_well_formed(&mesh);
        prop_assert_eq!(mesh.vertex_count(), 24);
        prop_assert_eq!(mesh.indices().len(), 36);

        let bounds = mesh.bounds().unwrap();
        prop_assert!(bounds.min.abs_diff_eq(glam::Vec3::new(0.0, -height, 0.0), EPS));
        prop_assert!(bounds.max.abs_diff_eq(glam::Vec3::new(width, 0.0, thickness), EPS));
    }

    /// Property: rounded boxes follow the 64 + 16s / 84 + 48s formula
    #[test]
    fn rounded_box_counts_match_formula(
        width in 0.05f32..2.0,
        height in 0.05f32..2.0,
        radius in 0.001f32..0.025,
        thickness in 0.0f32..0.05,
        segments in 1u32..12,
    ) {
        let mesh = build_rounded_box_ex(width, height, radius, thickness, segments);
        assert_mesh_well_formed(&mesh);
        let (vertices, indices) = rounded_box_counts(segments);
        prop_assert_eq!(mesh.vertex_count(), vertices);
        prop_assert_eq!(mesh.indices().len(), indices);

        // Rounding only removes material, so the footprint is unchanged.
        let bounds = mesh.bounds().unwrap();
        prop_assert!((bounds.size().x - width).abs() < EPS);
        prop_assert!((bounds.size().y - height).abs() < EPS);
    }

    /// Property: a radius too small to round falls back to a plain box
    #[test]
    fn tiny_radius_is_a_plain_box(
        width in 0.05f32..2.0,
        height in 0.05f32..2.0,
        radius in -1.0f32..(MIN_EXTENT * 0.5),
    ) {
        let rounded = build_rounded_box_ex(width, height, radius, 0.01, 4);
        prop_assert_eq!(rounded.hash(), build_box_ex(width, height, 0.01).hash());
    }

    /// Property: tubes emit `rings * circle_segments` vertices and stay
    /// within the outline grown by the tube radius
    #[test]
    fn tube_counts_and_extent(
        width in 0.05f32..2.0,
        height in 0.05f32..2.0,
        radius in 0.001f32..0.01,
        extra_margin in 0.0f32..0.015,
        circle_segments in 3u32..12,
        segments_per_unit in 0u32..4,
    ) {
        let margin = radius + extra_margin;
        let params = TubeParams {
            circle_segments,
            segments_per_unit,
            ..TubeParams::default()
        };
        let mesh = build_rounded_rect_tube_ex(width, height, margin, radius, params);
        assert_mesh_well_formed(&mesh);

        let (rings, vertices, indices) = params.counts(width, height, margin);
        prop_assert_eq!(vertices, rings * circle_segments as usize);
        prop_assert_eq!(mesh.vertex_count(), vertices);
        prop_assert_eq!(mesh.indices().len(), indices);

        let bounds = mesh.bounds().unwrap();
        prop_assert!(bounds.min.x >= -radius - EPS);
        prop_assert!(bounds.max.x <= width + radius + EPS);
        prop_assert!(bounds.max.y <= radius + EPS);
        prop_assert!(bounds.min.y >= -height - radius - EPS);
        prop_assert!(bounds.size().z <= 2.0 * radius + EPS);
    }

    /// Property: hollow frames have a fixed topology whatever the margin
    #[test]
    fn hollow_frame_fixed_topology(
        width in 0.01f32..2.0,
        height in 0.01f32..2.0,
        margin in -0.1f32..1.0,
        thickness in 0.0f32..0.05,
    ) {
        let mesh = build_hollow_cube_ex(width, height, margin, thickness);
        assert_mesh_well_formed(&mesh);
        prop_assert_eq!(mesh.vertex_count(), 48);
        prop_assert_eq!(mesh.indices().len(), 96);

        let bounds = mesh.bounds().unwrap();
        prop_assert!((bounds.size().x - width).abs() < EPS);
        prop_assert!((bounds.size().y - height).abs() < EPS);
        prop_assert!((bounds.size().z - thickness).abs() < EPS);
        prop_assert!(bounds.center().y.abs() < EPS);
        prop_assert!(bounds.max.z.abs() < EPS);
    }

    /// Property: knob heads always sit in front of their feet
    #[test]
    fn knob_head_in_front_of_foot(
        head in (0.005f32..0.1, 0.005f32..0.1, 0.001f32..0.05),
        foot in (0.005f32..0.1, 0.005f32..0.1, 0.001f32..0.05),
    ) {
        let mesh = build_slider_knob_ex(head.0, head.1, head.2, foot.0, foot.1, foot.2);
        assert_mesh_well_formed(&mesh);
        prop_assert_eq!(mesh.vertex_count(), 48);
        prop_assert_eq!(mesh.indices().len(), 72);

        let bounds = mesh.bounds().unwrap();
        prop_assert!((bounds.min.z + head.2 + foot.2).abs() < EPS);
        prop_assert!(bounds.max.z.abs() < EPS);
        prop_assert!((bounds.size().x - head.0.max(foot.0)).abs() < EPS);
    }

    /// Property: identical inputs give identical meshes
    #[test]
    fn builders_are_deterministic(
        width in 0.05f32..2.0,
        height in 0.05f32..2.0,
        radius in 0.001f32..0.02,
    ) {
        let a = build_rounded_box_ex(width, height, radius, 0.01, 5);
        let b = build_rounded_box_ex(width, height, radius, 0.01, 5);
        prop_assert_eq!(a.hash(), b.hash());
        prop_assert_eq!(a.interleaved(), b.interleaved());
    }
}

#[test]
fn out_of_range_inputs_still_build() {
    for (w, h) in [(0.0, 0.0), (-1.0, 0.5), (f32::NAN, 1.0)] {
        assert_mesh_well_formed(&build_box_ex(w, h, -1.0));
        assert_mesh_well_formed(&build_rounded_box_ex(w, h, 0.3, 0.01, 3));
        assert_mesh_well_formed(&build_hollow_cube_ex(w, h, 0.3, 0.01));
        assert_mesh_well_formed(&build_rounded_rect_tube_ex(
            w,
            h,
            0.3,
            0.2,
            TubeParams::default(),
        ));
    }
}
