//! Heightfield to triangle-list conversion.

use glam::{Vec2, Vec3};
use relief_terrain::{HeightField, TerrainError};

use crate::terrain_mesh::{TerrainMesh, TerrainVertex};

/// Convert a heightfield into a renderable mesh.
///
/// Emits one vertex per cell at `(x * scale, height, z * scale)` and two
/// triangles per quad, both split from the quad's bottom-left corner:
///
/// ```text
///   top_left ---- top_right
///      |        /    |
///      |      /      |
///      |    /        |
/// bottom_left -- bottom_right
/// ```
///
/// `(bottom_left, top_left, top_right)` then `(bottom_left, top_right, bottom_right)`.
///
/// Fails with [`TerrainError::InvalidDimension`] when the grid has fewer than
/// two samples along either axis, or too many vertices for `u32` indices.
pub fn triangulate(field: &HeightField, scale: f32) -> Result<TerrainMesh, TerrainError> {
    let width = field.width();
    let depth = field.depth();
    let invalid = TerrainError::InvalidDimension { width, depth };

    if width < 2 || depth < 2 {
        return Err(invalid);
    }
    if u32::try_from(width * depth).is_err() {
        return Err(invalid);
    }

    Ok(TerrainMesh {
        vertices: build_vertices(field, scale),
        indices: build_indices(width as u32, depth as u32),
        center: Vec2::new(width as f32 * scale / 2.0, depth as f32 * scale / 2.0),
    })
}

fn build_vertices(field: &HeightField, scale: f32) -> Vec<TerrainVertex> {
    let width = field.width();
    field
        .values()
        .iter()
        .enumerate()
        .map(|(i, &height)| {
            let x = (i % width) as f32;
            let z = (i / width) as f32;
            TerrainVertex::new(Vec3::new(x * scale, height, z * scale))
        })
        .collect()
}

fn build_indices(width: u32, depth: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(6 * (width as usize - 1) * (depth as usize - 1));

    for z in 0..depth - 1 {
        for x in 0..width - 1 {
            let bottom_left = z * width + x;
            let top_left = (z + 1) * width + x;
            let top_right = (z + 1) * width + x + 1;
            let bottom_right = z * width + x + 1;

            indices.extend_from_slice(&[
                bottom_left,
                top_left,
                top_right,
                bottom_left,
                top_right,
                bottom_right,
            ]);
        }
    }
    indices
}
