use foundation::bounds::Aabb3;
use foundation::math::{Projection, Vec3};

use super::triangulate::Triangulation;

/// Renderable triangle soup with per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn positions_f32(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.as_f32_array()).collect()
    }

    pub fn normals_f32(&self) -> Vec<[f32; 3]> {
        self.normals.iter().map(|n| n.as_f32_array()).collect()
    }

    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.positions)
    }

    /// Appends `other`, offsetting its indices past the current vertices.
    pub fn append(&mut self, other: &MeshBuffers) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }
}

/// Projects each triangulation and merges them into one buffer set.
///
/// Vertex normals are the area-weighted sum of incident face normals within
/// the same part. A vertex with no usable faces falls back to its own
/// direction from the origin, then to +Z.
pub fn assemble<P: Projection + ?Sized>(parts: &[Triangulation], projection: &P) -> MeshBuffers {
    let mut out = MeshBuffers::default();
    for part in parts {
        let base = out.positions.len();
        let positions: Vec<Vec3> = part
            .positions
            .iter()
            .map(|&p| projection.project(p))
            .collect();

        let mut normals = vec![Vec3::ZERO; positions.len()];
        for tri in part.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            // Cross product length is twice the face area.
            let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for (n, p) in normals.iter_mut().zip(&positions) {
            *n = if n.length() > 0.0 {
                n.normalized()
            } else if p.length() > 0.0 {
                p.normalized()
            } else {
                Vec3::Z
            };
        }

        out.positions.extend(positions);
        out.normals.extend(normals);
        out.indices
            .extend(part.indices.iter().map(|&i| i + base as u32));
    }
    out
}
