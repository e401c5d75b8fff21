//! Fault-formation terrain synthesis.
//!
//! Each iteration picks a random line across the grid and raises every cell
//! on one side of it. Contributions decay linearly from `max_height` towards
//! `min_height`, so later faults perturb less. The accumulated field is then
//! blurred by four FIR sweeps and normalized to `[min_height, max_height]`.

use tracing::{debug, warn};

use crate::error::TerrainError;
use crate::height_field::HeightField;
use crate::random::RandomSource;

/// Upper bound on redraws when the two fault endpoints coincide.
pub const MAX_POINT_ATTEMPTS: u32 = 10_000;

/// A grid location. `y` is the z coordinate of the heightfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl GridPoint {
    /// Create a point.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Knobs for [`FaultFormationGenerator`].
#[derive(Clone, Debug, PartialEq)]
pub struct FaultFormationParams {
    /// Number of faults to apply.
    pub iterations: u32,
    /// Lower bound of the normalized output, and the last fault's contribution.
    pub min_height: f32,
    /// Upper bound of the normalized output, and the first fault's contribution.
    pub max_height: f32,
    /// FIR blend in `[0, 1]`. `0` disables smoothing, `1` copies the
    /// predecessor along each sweep.
    pub filter_strength: f32,
}

impl Default for FaultFormationParams {
    fn default() -> Self {
        Self {
            iterations: 500,
            min_height: 0.0,
            max_height: 300.0,
            filter_strength: 0.5,
        }
    }
}

impl FaultFormationParams {
    /// Reject non-finite heights, an inverted range, or a filter outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), TerrainError> {
        validate_height_range(self.min_height, self.max_height)?;
        if !(0.0..=1.0).contains(&self.filter_strength) {
            return Err(TerrainError::InvalidParameter {
                name: "filter_strength",
                value: self.filter_strength,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_height_range(min: f32, max: f32) -> Result<(), TerrainError> {
    if !min.is_finite() {
        return Err(TerrainError::InvalidParameter {
            name: "min_height",
            value: min,
        });
    }
    if !max.is_finite() || max < min {
        return Err(TerrainError::InvalidParameter {
            name: "max_height",
            value: max,
        });
    }
    Ok(())
}

/// Fills a [`HeightField`] by fault formation.
#[derive(Clone, Debug, Default)]
pub struct FaultFormationGenerator {
    params: FaultFormationParams,
}

impl FaultFormationGenerator {
    /// Create a generator with the given parameters.
    pub fn new(params: FaultFormationParams) -> Self {
        Self { params }
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &FaultFormationParams {
        &self.params
    }

    /// Run a full generation pass: reset, accumulate faults, smooth, normalize.
    ///
    /// If the accumulated field is flat (e.g. zero iterations) normalization
    /// is skipped and the flat field is kept.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        rng: &mut R,
    ) -> Result<(), TerrainError> {
        self.params.validate()?;
        let p = &self.params;
        debug!(
            width = field.width(),
            depth = field.depth(),
            iterations = p.iterations,
            min_height = p.min_height,
            max_height = p.max_height,
            filter_strength = p.filter_strength,
            "fault formation pass"
        );

        field.reset();
        accumulate_faults(field, p, rng);
        smooth_fir(field, p.filter_strength);
        normalize_or_keep_flat(field, p.min_height, p.max_height)
    }
}

/// Normalize, treating a flat field as a benign no-op.
pub(crate) fn normalize_or_keep_flat(
    field: &mut HeightField,
    min: f32,
    max: f32,
) -> Result<(), TerrainError> {
    match field.normalize(min, max) {
        Err(TerrainError::DegenerateRange { value }) => {
            warn!(value, "generated field is flat; skipping normalization");
            Ok(())
        }
        other => other,
    }
}

/// Apply `params.iterations` faults with linearly decaying height.
pub fn accumulate_faults<R: RandomSource + ?Sized>(
    field: &mut HeightField,
    params: &FaultFormationParams,
    rng: &mut R,
) {
    let delta_height = params.max_height - params.min_height;
    for iter in 0..params.iterations {
        let ratio = iter as f32 / params.iterations as f32;
        let height = params.max_height - delta_height * ratio;
        let (p1, p2) = random_point_pair(field.width(), field.depth(), rng);
        apply_fault(field, p1, p2, height);
    }
}

/// Draw two grid points, redrawing the second until they differ.
///
/// Gives up after [`MAX_POINT_ATTEMPTS`] redraws and returns the coincident
/// pair; a zero-length fault raises nothing.
pub fn random_point_pair<R: RandomSource + ?Sized>(
    width: usize,
    depth: usize,
    rng: &mut R,
) -> (GridPoint, GridPoint) {
    let p1 = GridPoint::new(rng.next_index(width), rng.next_index(depth));
    let mut p2 = GridPoint::new(rng.next_index(width), rng.next_index(depth));

    let mut attempts = 0;
    while p1 == p2 {
        if attempts >= MAX_POINT_ATTEMPTS {
            warn!(x = p1.x, y = p1.y, "no distinct fault endpoint found; using degenerate pair");
            break;
        }
        p2 = GridPoint::new(rng.next_index(width), rng.next_index(depth));
        attempts += 1;
    }
    (p1, p2)
}

/// Add `height` to every cell strictly on the positive side of the line
/// through `p1` and `p2` (2D cross product `> 0`).
pub fn apply_fault(field: &mut HeightField, p1: GridPoint, p2: GridPoint, height: f32) {
    let dir_x = p2.x as i64 - p1.x as i64;
    let dir_z = p2.y as i64 - p1.y as i64;

    for z in 0..field.depth() {
        let dz = z as i64 - p1.y as i64;
        for x in 0..field.width() {
            let dx = x as i64 - p1.x as i64;
            let cross = dx * dir_z - dir_x * dz;
            if cross > 0 {
                field.add(x, z, height);
            }
        }
    }
}

/// One directional FIR sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirSweep {
    /// Along each row, increasing x.
    LeftToRight,
    /// Along each row, decreasing x.
    RightToLeft,
    /// Along each column, increasing z.
    BottomToTop,
    /// Along each column, decreasing z.
    TopToBottom,
}

impl FirSweep {
    /// Order in which [`smooth_fir`] applies the sweeps. Each sweep reads
    /// the previous sweep's output.
    pub const ORDER: [FirSweep; 4] = [
        FirSweep::LeftToRight,
        FirSweep::RightToLeft,
        FirSweep::BottomToTop,
        FirSweep::TopToBottom,
    ];
}

/// Run all four sweeps in [`FirSweep::ORDER`].
pub fn smooth_fir(field: &mut HeightField, strength: f32) {
    for sweep in FirSweep::ORDER {
        apply_fir_sweep(field, sweep, strength);
    }
}

/// Blend each cell towards its predecessor along `sweep`:
/// `value = strength * previous + (1 - strength) * value`.
///
/// `previous` starts at the sweep's edge cell and carries the freshly
/// written value forward.
pub fn apply_fir_sweep(field: &mut HeightField, sweep: FirSweep, strength: f32) {
    let width = field.width();
    let depth = field.depth();

    match sweep {
        FirSweep::LeftToRight => {
            for z in 0..depth {
                let mut prev = field.at(0, z);
                for x in 1..width {
                    prev = fir_point(field, x, z, prev, strength);
                }
            }
        }
        FirSweep::RightToLeft => {
            for z in 0..depth {
                let mut prev = field.at(width - 1, z);
                for x in (0..width - 1).rev() {
                    prev = fir_point(field, x, z, prev, strength);
                }
            }
        }
        FirSweep::BottomToTop => {
            for x in 0..width {
                let mut prev = field.at(x, 0);
                for z in 1..depth {
                    prev = fir_point(field, x, z, prev, strength);
                }
            }
        }
        FirSweep::TopToBottom => {
            for x in 0..width {
                let mut prev = field.at(x, depth - 1);
                for z in (0..depth - 1).rev() {
                    prev = fir_point(field, x, z, prev, strength);
                }
            }
        }
    }
}

#[inline]
fn fir_point(field: &mut HeightField, x: usize, z: usize, prev: f32, strength: f32) -> f32 {
    let value = strength * prev + (1.0 - strength) * field.at(x, z);
    field.put(x, z, value);
    value
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::random::SeededRng;

    /// Replays a fixed list of indices; offsets are always zero.
    struct Scripted {
        indices: VecDeque<usize>,
        fallback: usize,
        draws: usize,
    }

    impl Scripted {
        fn new(indices: &[usize]) -> Self {
            Self {
                indices: indices.iter().copied().collect(),
                fallback: 0,
                draws: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&mut self, bound: usize) -> usize {
            self.draws += 1;
            self.indices.pop_front().unwrap_or(self.fallback) % bound
        }

        fn next_offset(&mut self, _magnitude: f32) -> f32 {
            0.0
        }
    }

    fn params(iterations: u32, filter_strength: f32) -> FaultFormationParams {
        FaultFormationParams {
            iterations,
            min_height: 0.0,
            max_height: 10.0,
            filter_strength,
        }
    }

    #[test]
    fn test_zero_iterations_stays_flat() {
        let mut field = HeightField::new(8, 8, 1.0).unwrap();
        field.set(2, 2, 5.0).unwrap();
        let generator = FaultFormationGenerator::new(params(0, 0.5));
        generator
            .generate(&mut field, &mut SeededRng::new(1))
            .expect("flat result must not be an error");
        assert!(
            field.values().iter().all(|&v| v == 0.0),
            "zero iterations must leave a reset, flat field"
        );
    }

    #[test]
    fn test_forced_pair_along_x_raises_nothing() {
        // dir = (1, 0): cross = -z, never positive on a 2x2 grid.
        let mut field = HeightField::new(2, 2, 1.0).unwrap();
        let mut rng = Scripted::new(&[0, 0, 1, 0]);
        FaultFormationGenerator::new(params(1, 0.0))
            .generate(&mut field, &mut rng)
            .unwrap();
        assert_eq!(field.values(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_forced_pair_along_z_raises_right_column() {
        // dir = (0, 1): cross = x, so the x = 1 column is raised by 10.
        let mut field = HeightField::new(2, 2, 1.0).unwrap();
        let mut rng = Scripted::new(&[0, 0, 0, 1]);
        FaultFormationGenerator::new(params(1, 0.0))
            .generate(&mut field, &mut rng)
            .unwrap();
        assert_eq!(field.values(), &[0.0, 10.0, 0.0, 10.0]);
    }

    #[test]
    fn test_apply_fault_cross_product_side() {
        let mut field = HeightField::new(2, 2, 1.0).unwrap();
        apply_fault(&mut field, GridPoint::new(0, 0), GridPoint::new(1, 0), 10.0);
        assert!(field.values().iter().all(|&v| v == 0.0));

        apply_fault(&mut field, GridPoint::new(1, 0), GridPoint::new(0, 0), 10.0);
        // Reversed direction: cross = z, so the z = 1 row is raised.
        assert_eq!(field.values(), &[0.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_zero_filter_is_bit_identical() {
        let p = params(40, 0.0);

        let mut raw = HeightField::new(16, 12, 1.0).unwrap();
        accumulate_faults(&mut raw, &p, &mut SeededRng::new(77));

        let mut smoothed = HeightField::new(16, 12, 1.0).unwrap();
        accumulate_faults(&mut smoothed, &p, &mut SeededRng::new(77));
        smooth_fir(&mut smoothed, 0.0);

        for (a, b) in raw.values().iter().zip(smoothed.values()) {
            assert_eq!(a.to_bits(), b.to_bits(), "filter 0 changed {a} into {b}");
        }
    }

    #[test]
    fn test_fir_sweeps_on_single_row() {
        let mut field = HeightField::from_values(3, 1, 1.0, vec![10.0, 0.0, 0.0]).unwrap();
        apply_fir_sweep(&mut field, FirSweep::LeftToRight, 0.5);
        assert_eq!(field.values(), &[10.0, 5.0, 2.5]);

        apply_fir_sweep(&mut field, FirSweep::RightToLeft, 0.5);
        assert_eq!(field.values(), &[6.875, 3.75, 2.5]);

        // Columns of height one have nothing to blend.
        apply_fir_sweep(&mut field, FirSweep::BottomToTop, 0.5);
        apply_fir_sweep(&mut field, FirSweep::TopToBottom, 0.5);
        assert_eq!(field.values(), &[6.875, 3.75, 2.5]);
    }

    #[test]
    fn test_fir_full_strength_copies_edge() {
        let mut field = HeightField::from_values(1, 4, 1.0, vec![3.0, 1.0, 4.0, 1.0]).unwrap();
        apply_fir_sweep(&mut field, FirSweep::BottomToTop, 1.0);
        assert_eq!(field.values(), &[3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_generated_range_matches_params() {
        let mut field = HeightField::new(32, 24, 1.0).unwrap();
        let generator = FaultFormationGenerator::new(FaultFormationParams {
            iterations: 100,
            min_height: -5.0,
            max_height: 50.0,
            filter_strength: 0.3,
        });
        generator
            .generate(&mut field, &mut SeededRng::new(2024))
            .unwrap();
        let (min, max) = field.min_max();
        assert!((min + 5.0).abs() < 1e-3, "min {min} should be -5");
        assert!((max - 50.0).abs() < 1e-3, "max {max} should be 50");
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let generator = FaultFormationGenerator::default();
        let mut a = HeightField::new(20, 20, 1.0).unwrap();
        let mut b = HeightField::new(20, 20, 1.0).unwrap();
        generator.generate(&mut a, &mut SeededRng::new(5)).unwrap();
        generator.generate(&mut b, &mut SeededRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_point_pair_retry_is_capped() {
        let mut rng = Scripted::new(&[]);
        let (p1, p2) = random_point_pair(3, 3, &mut rng);
        assert_eq!(p1, p2, "an always-zero source can only yield a coincident pair");
        assert_eq!(rng.draws, 4 + 2 * MAX_POINT_ATTEMPTS as usize);
    }

    #[test]
    fn test_point_pair_redraws_until_distinct() {
        let mut rng = Scripted::new(&[1, 1, 1, 1, 1, 1, 2, 0]);
        let (p1, p2) = random_point_pair(3, 3, &mut rng);
        assert_eq!(p1, GridPoint::new(1, 1));
        assert_eq!(p2, GridPoint::new(2, 0));
    }

    #[test]
    fn test_invalid_filter_strength_rejected() {
        let mut field = HeightField::new(4, 4, 1.0).unwrap();
        let result =
            FaultFormationGenerator::new(params(3, 1.5)).generate(&mut field, &mut SeededRng::new(0));
        assert!(matches!(
            result,
            Err(TerrainError::InvalidParameter {
                name: "filter_strength",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_height_range_rejected() {
        let p = FaultFormationParams {
            min_height: 10.0,
            max_height: 0.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }
}
