//! Midpoint displacement (diamond-square) terrain synthesis.
//!
//! The grid is processed in octaves, largest rectangle first. Every octave
//! runs a diamond step over the whole grid, then a square step that reads the
//! diamond output. Random displacement shrinks by `2^-roughness` per octave.
//!
//! The working rectangle starts at the next power of two of the grid side, so
//! non power-of-two grids address cells past their last index. Those lookups
//! are clamped onto the grid edge by [`wrap_forward`] and [`wrap_backward`].

use tracing::debug;

use crate::error::TerrainError;
use crate::fault_formation::{normalize_or_keep_flat, validate_height_range};
use crate::height_field::HeightField;
use crate::random::RandomSource;

/// Knobs for [`MidpointDisplacementGenerator`].
#[derive(Clone, Debug, PartialEq)]
pub struct MidpointDisplacementParams {
    /// Displacement decay exponent. Larger values give smoother terrain.
    pub roughness: f32,
    /// Lower bound of the normalized output.
    pub min_height: f32,
    /// Upper bound of the normalized output.
    pub max_height: f32,
}

impl Default for MidpointDisplacementParams {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            min_height: 0.0,
            max_height: 300.0,
        }
    }
}

impl MidpointDisplacementParams {
    /// Reject a non-finite roughness or an invalid height range.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !self.roughness.is_finite() {
            return Err(TerrainError::InvalidParameter {
                name: "roughness",
                value: self.roughness,
            });
        }
        validate_height_range(self.min_height, self.max_height)
    }
}

/// Smallest power of two that is `>= n`.
pub fn nearest_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// `i + offset` on a grid of `size` cells.
///
/// Uses `(i + offset) % size`, except when that result lands before `i`: the
/// sum ran off the far edge, and the last cell (`size - 1`) is used instead
/// of wrapping around to the start.
#[inline]
pub fn wrap_forward(i: usize, offset: usize, size: usize) -> usize {
    let next = (i + offset) % size;
    if next < i { size - 1 } else { next }
}

/// `i - offset` on a grid of `size` cells, clamped to the first cell when the
/// difference would fall below zero.
#[inline]
pub fn wrap_backward(i: usize, offset: usize, size: usize) -> usize {
    debug_assert!(i < size);
    i.saturating_sub(offset)
}

/// One diamond + square iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    /// Side of the rectangles processed in this octave.
    pub rect_size: usize,
    /// Random offsets are drawn from `[-displacement, displacement]`.
    pub displacement: f32,
}

/// Proof that the diamond step of an octave ran over the whole grid.
///
/// [`square_step`] consumes it, so a square step can only follow the diamond
/// step of the same octave.
#[derive(Debug)]
#[must_use = "the square step of this octave has not run"]
pub struct DiamondPass {
    octave: Octave,
}

impl DiamondPass {
    /// The octave the diamond step ran for.
    pub fn octave(&self) -> Octave {
        self.octave
    }
}

/// The octave sequence for a grid side of `size`: rect sizes
/// `nearest_power_of_two(size), /2, ... 1`, displacement starting at half the
/// first rect and multiplied by `2^-roughness` each time.
pub fn octaves(size: usize, roughness: f32) -> Vec<Octave> {
    let reduction = 2.0_f32.powf(-roughness);
    let mut rect_size = nearest_power_of_two(size);
    let mut displacement = rect_size as f32 / 2.0;
    let mut out = Vec::new();

    while rect_size > 0 {
        out.push(Octave {
            rect_size,
            displacement,
        });
        rect_size /= 2;
        displacement *= reduction;
    }
    out
}

/// Fills a square [`HeightField`] by diamond-square.
#[derive(Clone, Debug, Default)]
pub struct MidpointDisplacementGenerator {
    params: MidpointDisplacementParams,
}

impl MidpointDisplacementGenerator {
    /// Create a generator with the given parameters.
    pub fn new(params: MidpointDisplacementParams) -> Self {
        Self { params }
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &MidpointDisplacementParams {
        &self.params
    }

    /// Run a full generation pass: reset, all octaves, normalize.
    ///
    /// Fails with [`TerrainError::InvalidDimension`] unless the field is
    /// square and at least 2x2.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
    ) -> Result<(), TerrainError> {
        if !field.is_square() || field.width() < 2 {
            return Err(TerrainError::InvalidDimension {
                width: field.width(),
                depth: field.depth(),
            });
        }
        self.params.validate()?;
        let p = &self.params;

        let octaves = octaves(field.width(), p.roughness);
        debug!(
            size = field.width(),
            roughness = p.roughness,
            octaves = octaves.len(),
            "midpoint displacement pass"
        );

        field.reset();
        for octave in octaves {
            let diamond = diamond_step(field, octave, rng);
            square_step(field, diamond, rng);
        }
        normalize_or_keep_flat(field, p.min_height, p.max_height)
    }
}

/// Set each rectangle's center to the mean of its four corners plus noise.
pub fn diamond_step<R: RandomSource + ?Sized>(
    field: &mut HeightField,
    octave: Octave,
    rng: &mut R,
) -> DiamondPass {
    let size = field.width();
    let rect = octave.rect_size;
    let half = rect / 2;

    for y in (0..size).step_by(rect) {
        for x in (0..size).step_by(rect) {
            let next_x = wrap_forward(x, rect, size);
            let next_y = wrap_forward(y, rect, size);

            let top_left = field.at(x, y);
            let top_right = field.at(next_x, y);
            let bottom_left = field.at(x, next_y);
            let bottom_right = field.at(next_x, next_y);

            let mid_x = wrap_forward(x, half, size);
            let mid_y = wrap_forward(y, half, size);

            let mean = (top_left + top_right + bottom_left + bottom_right) / 4.0;
            field.put(mid_x, mid_y, mean + rng.next_offset(octave.displacement));
        }
    }

    DiamondPass { octave }
}

/// Set each rectangle's top and left edge midpoints from the two adjacent
/// corners, the rectangle's center, and the neighbouring rectangle's center.
pub fn square_step<R: RandomSource + ?Sized>(
    field: &mut HeightField,
    diamond: DiamondPass,
    rng: &mut R,
) {
    let octave = diamond.octave;
    let size = field.width();
    let rect = octave.rect_size;
    let half = rect / 2;

    for y in (0..size).step_by(rect) {
        for x in (0..size).step_by(rect) {
            let next_x = wrap_forward(x, rect, size);
            let next_y = wrap_forward(y, rect, size);
            let mid_x = wrap_forward(x, half, size);
            let mid_y = wrap_forward(y, half, size);
            let prev_mid_x = wrap_backward(x, half, size);
            let prev_mid_y = wrap_backward(y, half, size);

            let top_left = field.at(x, y);
            let top_right = field.at(next_x, y);
            let bottom_left = field.at(x, next_y);
            let center = field.at(mid_x, mid_y);
            let prev_y_center = field.at(mid_x, prev_mid_y);
            let prev_x_center = field.at(prev_mid_x, mid_y);

            let left_mid = (top_left + center + bottom_left + prev_x_center) / 4.0
                + rng.next_offset(octave.displacement);
            let top_mid = (top_left + center + top_right + prev_y_center) / 4.0
                + rng.next_offset(octave.displacement);

            field.put(mid_x, y, top_mid);
            field.put(x, mid_y, left_mid);
        }
    }
}
