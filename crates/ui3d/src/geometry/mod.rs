//! Procedural meshes for the box family of widget shapes.
//!
//! All builders share one local frame: the origin sits at the top-left-front
//! corner, +X runs right, -Y runs down and +Z runs into the widget (away from
//! the viewer). Front faces therefore carry the normal `-Z`. Triangles are
//! wound counter-clockwise around their outward normal.
//!
//! Builders are pure functions of their arguments. Out-of-range dimensions
//! are clamped at the boundary (see [`MIN_EXTENT`]) instead of producing a
//! zero-area or self-intersecting mesh.

mod boxes;
mod builder;
mod hollow;
mod knob;
mod rounded;
mod tube;

pub use boxes::{build_box, build_box_ex, DEFAULT_BOX_THICKNESS};
pub use hollow::{build_hollow_cube, build_hollow_cube_ex, DEFAULT_HOLLOW_MARGIN, DEFAULT_HOLLOW_THICKNESS};
pub use knob::{build_slider_knob, build_slider_knob_ex};
pub use rounded::{
    build_rounded_box, build_rounded_box_ex, corner_segments_for, rounded_box_counts,
    DEFAULT_CORNER_SEGMENTS_FIXED, DEFAULT_CORNER_SEGMENTS_PER_UNIT,
};
pub use tube::{
    build_rounded_rect_tube, build_rounded_rect_tube_ex, TubeParams, DEFAULT_TUBE_CIRCLE_SEGMENTS,
    DEFAULT_TUBE_SEGMENTS_PER_UNIT,
};

use glam::{Vec2, Vec3};
use tracing::debug;

/// Smallest width/height a builder will emit.
pub const MIN_EXTENT: f32 = 1e-4;

/// Hash of the interleaved vertex + index buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHash(pub [u8; 32]);

impl MeshHash {
    /// Lowercase hex digest.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

/// Interleaved vertex layout for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in widget-local coordinates.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

/// Indexed triangle mesh.
///
/// `normals` and `uvs` always match `positions` in length and every index is
/// in range; the only way to build one is through the geometry builders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Per-vertex texture coordinates.
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Triangle list indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Axis-aligned bounds, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Interleave attributes into [`MeshVertex`] records.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    /// Stable digest of the vertex and index buffers.
    pub fn hash(&self) -> MeshHash {
        let vertices = self.interleaved();
        let mut hasher = blake3::Hasher::new();
        hasher.update(bytemuck::cast_slice(&vertices));
        hasher.update(bytemuck::cast_slice(&self.indices));
        MeshHash(*hasher.finalize().as_bytes())
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from explicit corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box from center and full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box holding every point, `None` when there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    /// Full size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside or on the boundary.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Whether the two boxes touch or overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Distance along the ray to the first intersection, if any.
    ///
    /// A ray starting inside the box reports the exit distance.
    pub fn ray_intersection(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv_dir = ray_dir.recip();

        let t1 = (self.min - ray_origin) * inv_dir;
        let t2 = (self.max - ray_origin) * inv_dir;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Box entirely behind the origin, or missed.
        if tmax < 0.0 || tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

pub(crate) fn clamp_extent(what: &str, value: f32) -> f32 {
    if value >= MIN_EXTENT {
        value
    } else {
        debug!("{what} {value} below minimum extent; clamped to {MIN_EXTENT}");
        MIN_EXTENT
    }
}

pub(crate) fn clamp_depth(what: &str, value: f32) -> f32 {
    if value >= 0.0 {
        value
    } else {
        debug!("{what} {value} is negative; clamped to 0");
        0.0
    }
}

pub(crate) fn clamp_range(what: &str, value: f32, lo: f32, hi: f32) -> f32 {
    // `!(value >= lo)` also catches NaN.
    let clamped = if !(value >= lo) {
        lo
    } else if value > hi {
        hi
    } else {
        value
    };
    if clamped != value {
        debug!("{what} {value} outside [{lo}, {hi}]; clamped to {clamped}");
    }
    clamped
}
