//! Heightfield import and export.
//!
//! Two formats are supported:
//!
//! - **Raw**: a header-less dump of little-endian `f32` samples in row-major
//!   order. The grid must be square; its side is `sqrt(byte_len / 4)`.
//! - **JSON**: a [`HeightFieldDocument`] `{ width, height, data }` where
//!   `height` is the z extent of the grid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TerrainError;
use crate::height_field::HeightField;

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

/// Structured form of a heightfield, as published by the raw-dump loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightFieldDocument {
    /// Grid extent along x.
    pub width: usize,
    /// Grid extent along z.
    pub height: usize,
    /// Samples in row-major order.
    pub data: Vec<f32>,
}

impl HeightField {
    /// Decode a raw sample dump.
    pub fn from_raw_f32_bytes(bytes: &[u8], scale: f32) -> Result<Self, TerrainError> {
        let malformed = || TerrainError::MalformedRaw {
            byte_len: bytes.len(),
        };
        if bytes.is_empty() || bytes.len() % SAMPLE_BYTES != 0 {
            return Err(malformed());
        }

        let count = bytes.len() / SAMPLE_BYTES;
        let side = count.isqrt();
        if side * side != count {
            return Err(malformed());
        }

        let values = bytes
            .chunks_exact(SAMPLE_BYTES)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Self::from_values(side, side, scale, values)
    }

    /// Encode as a raw sample dump.
    pub fn to_raw_f32_bytes(&self) -> Vec<u8> {
        self.values().iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Build a field from a structured document.
    pub fn from_document(doc: HeightFieldDocument, scale: f32) -> Result<Self, TerrainError> {
        Self::from_values(doc.width, doc.height, scale, doc.data)
    }

    /// Snapshot the field as a structured document.
    pub fn to_document(&self) -> HeightFieldDocument {
        HeightFieldDocument {
            width: self.width(),
            height: self.depth(),
            data: self.values().to_vec(),
        }
    }

    /// Write the field as a JSON document.
    pub fn save_json(&self, path: &Path) -> Result<(), TerrainError> {
        let json = serde_json::to_string(&self.to_document()).map_err(TerrainError::Json)?;
        std::fs::write(path, json).map_err(TerrainError::Io)?;
        debug!(path = %path.display(), "wrote heightfield JSON");
        Ok(())
    }

    /// Write the field as a raw sample dump.
    pub fn save_raw(&self, path: &Path) -> Result<(), TerrainError> {
        std::fs::write(path, self.to_raw_f32_bytes()).map_err(TerrainError::Io)?;
        debug!(path = %path.display(), "wrote raw heightfield");
        Ok(())
    }
}

/// Read a raw sample dump from disk.
pub fn load_raw(path: &Path, scale: f32) -> Result<HeightField, TerrainError> {
    let bytes = std::fs::read(path).map_err(TerrainError::Io)?;
    let field = HeightField::from_raw_f32_bytes(&bytes, scale)?;
    debug!(
        path = %path.display(),
        size = field.width(),
        "loaded raw heightfield"
    );
    Ok(field)
}

/// Read a JSON heightfield document from disk.
pub fn load_json(path: &Path, scale: f32) -> Result<HeightField, TerrainError> {
    let contents = std::fs::read_to_string(path).map_err(TerrainError::Io)?;
    let doc: HeightFieldDocument = serde_json::from_str(&contents).map_err(TerrainError::Json)?;
    HeightField::from_document(doc, scale)
}
