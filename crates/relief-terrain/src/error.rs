//! Terrain error types.

/// Errors reported by heightfield construction, access, generation, and I/O.
///
/// All generation errors are caller-input errors: nothing is retried and no
/// dimension is silently corrected.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Width or depth is zero, mismatched where a square grid is required,
    /// or too small for the requested operation.
    #[error("invalid grid dimension {width}x{depth}")]
    InvalidDimension {
        /// Grid extent along x.
        width: usize,
        /// Grid extent along z.
        depth: usize,
    },

    /// A grid access fell outside `[0, width) x [0, depth)`.
    #[error("cell ({x}, {z}) is outside the {width}x{depth} grid")]
    IndexOutOfRange {
        /// Requested x coordinate.
        x: usize,
        /// Requested z coordinate.
        z: usize,
        /// Grid extent along x.
        width: usize,
        /// Grid extent along z.
        depth: usize,
    },

    /// `normalize` was called on a field whose values are all equal.
    #[error("cannot normalize a flat field (every cell is {value})")]
    DegenerateRange {
        /// The single value held by every cell.
        value: f32,
    },

    /// A generation knob is non-finite or outside its accepted range.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A raw sample dump whose length is not a square number of `f32`s.
    #[error("raw heightfield of {byte_len} bytes is not a square grid of f32 samples")]
    MalformedRaw {
        /// Length of the rejected buffer in bytes.
        byte_len: usize,
    },

    /// Reading or writing a heightfield file failed.
    #[error("heightfield I/O failed: {0}")]
    Io(#[source] std::io::Error),

    /// A heightfield JSON document could not be parsed or written.
    #[error("heightfield JSON failed: {0}")]
    Json(#[source] serde_json::Error),

    /// PNG encoding of a debug image failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[source] png::EncodingError),
}
