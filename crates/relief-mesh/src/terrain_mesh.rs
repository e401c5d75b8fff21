//! Terrain mesh data structure holding vertices and indices produced by triangulation.

use glam::{Vec2, Vec3};

/// A single terrain vertex: world-space position only, 12 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// `(x * scale, height, z * scale)`.
    pub position: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 12]);

impl TerrainVertex {
    /// Construct a vertex from a position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }

    /// Position as a `Vec3`.
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// The output of one triangulation pass.
///
/// Vertices follow the heightfield's row-major order; indices come in
/// triples, counter-clockwise when viewed from above.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    /// Vertex buffer, one entry per grid cell.
    pub vertices: Vec<TerrainVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// Planar midpoint of the grid footprint in world units, `(x, z)`.
    pub center: Vec2,
}

impl TerrainMesh {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer contents for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents for GPU upload (`Uint32`).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_bytes_length() {
        let mesh = TerrainMesh {
            vertices: vec![TerrainVertex::new(Vec3::new(1.0, 2.0, 3.0)); 4],
            indices: vec![0, 2, 3, 0, 3, 1],
            center: Vec2::ZERO,
        };
        assert_eq!(mesh.vertex_bytes().len(), 48);
        assert_eq!(mesh.index_bytes().len(), 24);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_vertex_position_layout() {
        let v = TerrainVertex::new(Vec3::new(1.0, 2.0, 3.0));
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(&bytes[4..8], &2.0_f32.to_ne_bytes());
        assert_eq!(v.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
