use super::Mesh;
use glam::{Vec2, Vec3};

pub(crate) const UV00: Vec2 = Vec2::new(0.0, 0.0);
pub(crate) const UV10: Vec2 = Vec2::new(1.0, 0.0);
pub(crate) const UV01: Vec2 = Vec2::new(0.0, 1.0);
pub(crate) const UV11: Vec2 = Vec2::new(1.0, 1.0);

/// Accumulates attributes and indices for a single mesh.
pub(crate) struct MeshBuilder {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub(crate) fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub(crate) fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub(crate) fn vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertex_count();
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Push triangle `a b c`, flipping it if its winding would face away
    /// from `facing`. Zero-area triangles keep the given order.
    pub(crate) fn triangle_facing(&mut self, a: u32, b: u32, c: u32, facing: Vec3) {
        let pa = self.positions[a as usize];
        let pb = self.positions[b as usize];
        let pc = self.positions[c as usize];
        let geometric = (pb - pa).cross(pc - pa);
        if geometric.dot(facing) < 0.0 {
            self.indices.extend_from_slice(&[a, c, b]);
        } else {
            self.indices.extend_from_slice(&[a, b, c]);
        }
    }

    /// Flat quad from a 2x2 grid of corners `[p00, p10, p01, p11]`, each
    /// mapped to the matching canonical uv corner.
    pub(crate) fn quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        self.quad_with_uvs(corners, normal, [UV00, UV10, UV01, UV11]);
    }

    pub(crate) fn quad_with_uvs(&mut self, corners: [Vec3; 4], normal: Vec3, uvs: [Vec2; 4]) {
        let i00 = self.vertex(corners[0], normal, uvs[0]);
        let i10 = self.vertex(corners[1], normal, uvs[1]);
        let i01 = self.vertex(corners[2], normal, uvs[2]);
        let i11 = self.vertex(corners[3], normal, uvs[3]);
        self.triangle_facing(i00, i10, i11, normal);
        self.triangle_facing(i00, i11, i01, normal);
    }

    /// Axis-aligned prism, 4 unshared vertices per face in the order
    /// up, left, right, down, back (-Z), forward (+Z).
    pub(crate) fn cuboid(&mut self, min: Vec3, max: Vec3) {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);

        self.quad(
            [
                Vec3::new(x0, y1, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y1, z1),
            ],
            Vec3::Y,
        );
        self.quad(
            [
                Vec3::new(x0, y1, z0),
                Vec3::new(x0, y1, z1),
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y0, z1),
            ],
            Vec3::NEG_X,
        );
        self.quad(
            [
                Vec3::new(x1, y1, z1),
                Vec3::new(x1, y1, z0),
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y0, z0),
            ],
            Vec3::X,
        );
        self.quad(
            [
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z0),
                Vec3::new(x0, y0, z1),
                Vec3::new(x1, y0, z1),
            ],
            Vec3::NEG_Y,
        );
        self.quad(
            [
                Vec3::new(x0, y1, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z0),
            ],
            Vec3::NEG_Z,
        );
        self.quad(
            [
                Vec3::new(x1, y1, z1),
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y0, z1),
                Vec3::new(x0, y0, z1),
            ],
            Vec3::Z,
        );
    }

    pub(crate) fn finish(self) -> Mesh {
        debug_assert_eq!(self.positions.len(), self.normals.len());
        debug_assert_eq!(self.positions.len(), self.uvs.len());
        debug_assert_eq!(self.indices.len() % 3, 0);
        Mesh {
            positions: self.positions,
            normals: self.normals,
            uvs: self.uvs,
            indices: self.indices,
        }
    }
}
