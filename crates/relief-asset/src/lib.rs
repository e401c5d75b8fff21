//! Terrain asset: owns a heightfield, the source that fills it, and the mesh
//! triangulated from it.

mod terrain_asset;

pub use terrain_asset::{TerrainAsset, TerrainSource};
