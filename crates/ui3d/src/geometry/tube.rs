//! Closed circular tube swept along a rounded rectangle outline.

use super::builder::MeshBuilder;
use super::rounded::corner_segments_for;
use super::{clamp_extent, clamp_range, Mesh, MIN_EXTENT};
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};
use tracing::debug;

/// Points around the tube cross-section used by [`build_rounded_rect_tube`].
pub const DEFAULT_TUBE_CIRCLE_SEGMENTS: u32 = 8;
/// Straight-run subdivisions per unit length used by [`build_rounded_rect_tube`].
pub const DEFAULT_TUBE_SEGMENTS_PER_UNIT: u32 = 1;

/// Subdivision controls for [`build_rounded_rect_tube_ex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TubeParams {
    /// Points around the cross-section (at least 3).
    pub circle_segments: u32,
    /// Extra rings per unit of straight run.
    pub segments_per_unit: u32,
    /// Fixed part of the corner subdivision.
    pub corner_fixed: u32,
    /// Corner subdivisions per unit of arc length.
    pub corner_per_unit: u32,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            circle_segments: DEFAULT_TUBE_CIRCLE_SEGMENTS,
            segments_per_unit: DEFAULT_TUBE_SEGMENTS_PER_UNIT,
            corner_fixed: super::DEFAULT_CORNER_SEGMENTS_FIXED,
            corner_per_unit: super::DEFAULT_CORNER_SEGMENTS_PER_UNIT,
        }
    }
}

impl TubeParams {
    /// Number of rings placed along a straight run of `length`.
    fn bar_rings(&self, length: f32) -> u32 {
        (length.max(0.0) * self.segments_per_unit as f32).floor() as u32 + 1
    }

    /// `(rings, vertices, indices)` for an outline of the given size.
    ///
    /// Inputs are expected to be clamped already.
    pub fn counts(&self, width: f32, height: f32, margin: f32) -> (usize, usize, usize) {
        let corner = corner_segments_for(margin, self.corner_fixed, self.corner_per_unit);
        let rings = 2 * self.bar_rings(width - 2.0 * margin)
            + 2 * self.bar_rings(height - 2.0 * margin)
            + 4 * corner;
        let vertices = rings as usize * self.circle_segments.max(3) as usize;
        (rings as usize, vertices, 6 * vertices)
    }
}

/// Tube with [`TubeParams::default`] subdivision.
pub fn build_rounded_rect_tube(width: f32, height: f32, margin: f32, radius: f32) -> Mesh {
    build_rounded_rect_tube_ex(width, height, margin, radius, TubeParams::default())
}

/// Tube of cross-section `radius` following the outline `[0, width] x
/// [-height, 0]` in the `z = 0` plane, whose corners are quarter circles of
/// radius `margin`.
///
/// `radius` is clamped into `[MIN_EXTENT, min(width, height) / 2]` and
/// `margin` into `[radius, min(width, height) / 2]` so the inner side of a
/// corner never folds over itself.
pub fn build_rounded_rect_tube_ex(
    width: f32,
    height: f32,
    margin: f32,
    radius: f32,
    params: TubeParams,
) -> Mesh {
    let width = clamp_extent("tube width", width);
    let height = clamp_extent("tube height", height);
    let half_min = width.min(height) * 0.5;
    let radius = clamp_range("tube radius", radius, MIN_EXTENT.min(half_min), half_min);
    let margin = clamp_range("tube margin", margin, radius, half_min);
    let mut params = params;
    if params.circle_segments < 3 {
        debug!(
            "tube circle segments {} below 3; clamped",
            params.circle_segments
        );
        params.circle_segments = 3;
    }

    let path = outline(width, height, margin, &params);
    let (rings, vertex_count, index_count) = params.counts(width, height, margin);
    debug_assert_eq!(path.len(), rings);

    let circle = params.circle_segments;
    let mut b = MeshBuilder::with_capacity(vertex_count, index_count);
    for (i, (center, outward)) in path.iter().enumerate() {
        for j in 0..circle {
            let phi = TAU * j as f32 / circle as f32;
            let normal = *outward * phi.sin() + Vec3::Z * phi.cos();
            let uv = Vec2::new(i as f32 / rings as f32, j as f32 / circle as f32);
            b.vertex(*center + normal * radius, normal, uv);
        }
    }

    let ring_count = rings as u32;
    let normal_at = |ring: u32, k: u32| {
        let phi = TAU * k as f32 / circle as f32;
        path[ring as usize].1 * phi.sin() + Vec3::Z * phi.cos()
    };
    for i in 0..ring_count {
        let next = (i + 1) % ring_count;
        for j in 0..circle {
            let j1 = (j + 1) % circle;
            let facing = normal_at(i, j) + normal_at(next, j) + normal_at(next, j1) + normal_at(i, j1);
            let a = i * circle + j;
            let c = next * circle + j1;
            b.triangle_facing(a, next * circle + j, c, facing);
            b.triangle_facing(a, c, i * circle + j1, facing);
        }
    }

    b.finish()
}

/// Ring centers and their in-plane outward directions, walking clockwise
/// from the start of the top run. Each run excludes its end point, which is
/// the first point of the next run.
fn outline(width: f32, height: f32, margin: f32, params: &TubeParams) -> Vec<(Vec3, Vec3)> {
    let mut path = Vec::new();
    let corner_segments = corner_segments_for(margin, params.corner_fixed, params.corner_per_unit);

    // `span` is passed in rather than measured so ring counts match `counts`.
    let bar = |path: &mut Vec<(Vec3, Vec3)>, from: Vec3, to: Vec3, span: f32, outward: Vec3| {
        let n = params.bar_rings(span);
        for k in 0..n {
            path.push((from.lerp(to, k as f32 / n as f32), outward));
        }
    };
    let corner = |path: &mut Vec<(Vec3, Vec3)>, center: Vec3, start: Vec3, end: Vec3| {
        for k in 0..corner_segments {
            let theta = FRAC_PI_2 * k as f32 / corner_segments as f32;
            let dir = start * theta.cos() + end * theta.sin();
            path.push((center + dir * margin, dir));
        }
    };

    let (w, h, m) = (width, height, margin);
    let (span_x, span_y) = (w - 2.0 * m, h - 2.0 * m);
    let top_left = Vec3::new(m, -m, 0.0);
    let top_right = Vec3::new(w - m, -m, 0.0);
    let bottom_right = Vec3::new(w - m, -h + m, 0.0);
    let bottom_left = Vec3::new(m, -h + m, 0.0);

    bar(&mut path, Vec3::new(m, 0.0, 0.0), Vec3::new(w - m, 0.0, 0.0), span_x, Vec3::Y);
    corner(&mut path, top_right, Vec3::Y, Vec3::X);
    bar(&mut path, Vec3::new(w, -m, 0.0), Vec3::new(w, -h + m, 0.0), span_y, Vec3::X);
    corner(&mut path, bottom_right, Vec3::X, Vec3::NEG_Y);
    bar(&mut path, Vec3::new(w - m, -h, 0.0), Vec3::new(m, -h, 0.0), span_x, Vec3::NEG_Y);
    corner(&mut path, bottom_left, Vec3::NEG_Y, Vec3::NEG_X);
    bar(&mut path, Vec3::new(0.0, -h + m, 0.0), Vec3::new(0.0, -m, 0.0), span_y, Vec3::NEG_X);
    corner(&mut path, top_left, Vec3::NEG_X, Vec3::Y);
    path
}
