//! Composition root tying a heightfield source to its triangulated mesh.

use glam::Vec2;
use relief_mesh::{TerrainMesh, triangulate};
use relief_terrain::{
    FaultFormationGenerator, FaultFormationParams, HeightField, MidpointDisplacementGenerator,
    MidpointDisplacementParams, RandomSource, TerrainError,
};
use tracing::info;

/// Where an asset's heights come from.
#[derive(Clone, Debug)]
pub enum TerrainSource {
    /// Generated by fault formation.
    FaultFormation(FaultFormationGenerator),
    /// Generated by diamond-square.
    MidpointDisplacement(MidpointDisplacementGenerator),
    /// Supplied from outside and triangulated as-is.
    StaticHeightField,
}

impl TerrainSource {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TerrainSource::FaultFormation(_) => "fault_formation",
            TerrainSource::MidpointDisplacement(_) => "midpoint_displacement",
            TerrainSource::StaticHeightField => "static",
        }
    }

    fn fill<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
    ) -> Result<(), TerrainError> {
        match self {
            TerrainSource::FaultFormation(generator) => generator.generate(field, rng),
            TerrainSource::MidpointDisplacement(generator) => generator.generate(field, rng),
            TerrainSource::StaticHeightField => Ok(()),
        }
    }
}

/// A finished terrain: heightfield, source, and mesh.
///
/// The mesh is immutable between generation passes; [`TerrainAsset::regenerate`]
/// rebuilds both in place.
#[derive(Clone, Debug)]
pub struct TerrainAsset {
    source: TerrainSource,
    field: HeightField,
    mesh: TerrainMesh,
}

impl TerrainAsset {
    /// Generate a `width x depth` fault-formation terrain.
    pub fn fault_formation<R: RandomSource + ?Sized>(
        params: FaultFormationParams,
        width: usize,
        depth: usize,
        scale: f32,
        rng: &mut R,
    ) -> Result<Self, TerrainError> {
        let field = HeightField::new(width, depth, scale)?;
        let source = TerrainSource::FaultFormation(FaultFormationGenerator::new(params));
        Self::build(source, field, rng)
    }

    /// Generate a `size x size` diamond-square terrain.
    pub fn midpoint_displacement<R: RandomSource + ?Sized>(
        params: MidpointDisplacementParams,
        size: usize,
        scale: f32,
        rng: &mut R,
    ) -> Result<Self, TerrainError> {
        let field = HeightField::new(size, size, scale)?;
        let source =
            TerrainSource::MidpointDisplacement(MidpointDisplacementGenerator::new(params));
        Self::build(source, field, rng)
    }

    /// Triangulate an externally supplied heightfield without modifying it.
    pub fn from_height_field(field: HeightField) -> Result<Self, TerrainError> {
        let mesh = triangulate(&field, field.scale())?;
        let asset = Self {
            source: TerrainSource::StaticHeightField,
            field,
            mesh,
        };
        asset.log_built();
        Ok(asset)
    }

    fn build<R: RandomSource + ?Sized>(
        source: TerrainSource,
        mut field: HeightField,
        rng: &mut R,
    ) -> Result<Self, TerrainError> {
        source.fill(&mut field, rng)?;
        let mesh = triangulate(&field, field.scale())?;
        let asset = Self {
            source,
            field,
            mesh,
        };
        asset.log_built();
        Ok(asset)
    }

    /// Run the source again over the owned heightfield and re-triangulate.
    ///
    /// The heightfield storage is reused. A static source keeps its heights.
    /// On error the previous mesh is kept, but a generator may already have
    /// reset the heightfield.
    pub fn regenerate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), TerrainError> {
        self.source.fill(&mut self.field, rng)?;
        self.mesh = triangulate(&self.field, self.field.scale())?;
        self.log_built();
        Ok(())
    }

    /// The triangulated mesh.
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Planar midpoint of the terrain footprint, for camera framing.
    pub fn center(&self) -> Vec2 {
        self.mesh.center
    }

    /// The heightfield the mesh was built from.
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// The source that fills the heightfield.
    pub fn source(&self) -> &TerrainSource {
        &self.source
    }

    fn log_built(&self) {
        info!(
            source = self.source.name(),
            width = self.field.width(),
            depth = self.field.depth(),
            vertices = self.mesh.vertices.len(),
            indices = self.mesh.indices.len(),
            "terrain asset built"
        );
    }
}
