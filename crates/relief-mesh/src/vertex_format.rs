//! Canonical `wgpu::VertexBufferLayout` for terrain mesh rendering.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::terrain_mesh::TerrainVertex;

/// Vertex attributes for [`TerrainVertex`].
pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

/// The vertex buffer layout for terrain render pipelines. Indices are `Uint32`.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TerrainVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

/// Index format matching [`crate::TerrainMesh::indices`].
pub const TERRAIN_INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

/// Return the terrain vertex buffer layout as an owned value.
pub fn terrain_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    TERRAIN_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<TerrainVertex>() == 12,
    "TerrainVertex size changed, update TERRAIN_VERTEX_LAYOUT"
);
