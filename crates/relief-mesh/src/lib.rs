//! Heightfield triangulation and GPU-ready terrain mesh buffers.

pub mod terrain_mesh;
pub mod triangulate;
pub mod vertex_format;

pub use terrain_mesh::{TerrainMesh, TerrainVertex};
pub use triangulate::triangulate;
pub use vertex_format::{
    TERRAIN_INDEX_FORMAT, TERRAIN_VERTEX_ATTRIBUTES, TERRAIN_VERTEX_LAYOUT,
    terrain_vertex_buffer_layout,
};
