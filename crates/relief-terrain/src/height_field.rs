//! Row-major grid of scalar elevations.

use crate::error::TerrainError;

/// A `width x depth` grid of heights stored row-major (`index = z * width + x`).
///
/// The backing storage always holds exactly `width * depth` samples. A field is
/// mutated in place by one generator pass at a time and read by the
/// triangulator afterwards; hosts that need overlapping regeneration should
/// clone it.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    depth: usize,
    scale: f32,
    values: Vec<f32>,
}

impl HeightField {
    /// Allocate a zero-filled field.
    ///
    /// `scale` is the world-space spacing between adjacent samples.
    pub fn new(width: usize, depth: usize, scale: f32) -> Result<Self, TerrainError> {
        let len = checked_len(width, depth)?;
        validate_scale(scale)?;
        Ok(Self {
            width,
            depth,
            scale,
            values: vec![0.0; len],
        })
    }

    /// Wrap existing samples. `values.len()` must equal `width * depth`.
    pub fn from_values(
        width: usize,
        depth: usize,
        scale: f32,
        values: Vec<f32>,
    ) -> Result<Self, TerrainError> {
        let len = checked_len(width, depth)?;
        validate_scale(scale)?;
        if values.len() != len {
            return Err(TerrainError::InvalidDimension { width, depth });
        }
        Ok(Self {
            width,
            depth,
            scale,
            values,
        })
    }

    /// Grid extent along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid extent along z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// World-space spacing between adjacent samples.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns `true` when `width == depth`.
    pub fn is_square(&self) -> bool {
        self.width == self.depth
    }

    /// All samples in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Bounds-checked read.
    pub fn get(&self, x: usize, z: usize) -> Result<f32, TerrainError> {
        self.check(x, z)?;
        Ok(self.at(x, z))
    }

    /// Bounds-checked write.
    pub fn set(&mut self, x: usize, z: usize, value: f32) -> Result<(), TerrainError> {
        self.check(x, z)?;
        self.put(x, z, value);
        Ok(())
    }

    /// Zero every cell without reallocating.
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Linearly remap the field so its current minimum becomes `target_min`
    /// and its current maximum becomes `target_max`.
    ///
    /// A flat field has no range to stretch: it is left untouched and
    /// [`TerrainError::DegenerateRange`] is returned.
    pub fn normalize(&mut self, target_min: f32, target_max: f32) -> Result<(), TerrainError> {
        let (min, max) = self.min_max();
        let delta = max - min;
        if delta == 0.0 {
            return Err(TerrainError::DegenerateRange { value: min });
        }

        let target_range = target_max - target_min;
        for v in &mut self.values {
            *v = (*v - min) / delta * target_range + target_min;
        }
        Ok(())
    }

    /// Unchecked read for generator inner loops. Out-of-range coordinates
    /// still panic through slice indexing.
    #[inline]
    pub(crate) fn at(&self, x: usize, z: usize) -> f32 {
        debug_assert!(x < self.width && z < self.depth);
        self.values[z * self.width + x]
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, z: usize, value: f32) {
        debug_assert!(x < self.width && z < self.depth);
        self.values[z * self.width + x] = value;
    }

    #[inline]
    pub(crate) fn add(&mut self, x: usize, z: usize, delta: f32) {
        debug_assert!(x < self.width && z < self.depth);
        self.values[z * self.width + x] += delta;
    }

    fn check(&self, x: usize, z: usize) -> Result<(), TerrainError> {
        if x < self.width && z < self.depth {
            Ok(())
        } else {
            Err(TerrainError::IndexOutOfRange {
                x,
                z,
                width: self.width,
                depth: self.depth,
            })
        }
    }
}

fn checked_len(width: usize, depth: usize) -> Result<usize, TerrainError> {
    if width == 0 || depth == 0 {
        return Err(TerrainError::InvalidDimension { width, depth });
    }
    width
        .checked_mul(depth)
        .ok_or(TerrainError::InvalidDimension { width, depth })
}

fn validate_scale(scale: f32) -> Result<(), TerrainError> {
    if scale > 0.0 && scale.is_finite() {
        Ok(())
    } else {
        Err(TerrainError::InvalidParameter {
            name: "scale",
            value: scale,
        })
    }
}
