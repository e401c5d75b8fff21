//! End-to-end generation -> triangulation scenarios.

use std::collections::VecDeque;

use relief_asset::TerrainAsset;
use relief_mesh::triangulate;
use relief_terrain::fault_formation::{accumulate_faults, smooth_fir};
use relief_terrain::midpoint_displacement::octaves;
use relief_terrain::{
    FaultFormationParams, HeightField, MidpointDisplacementParams, RandomSource, SeededRng,
    TerrainError,
};

/// Replays fixed indices, then zeros; offsets are always zero.
struct Scripted(VecDeque<usize>);

impl RandomSource for Scripted {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0.pop_front().unwrap_or(0) % bound
    }

    fn next_offset(&mut self, _magnitude: f32) -> f32 {
        0.0
    }
}

#[test]
fn test_generated_meshes_have_expected_counts() {
    let mut rng = SeededRng::new(42);
    for (w, d) in [(2, 2), (5, 9), (24, 24)] {
        let asset =
            TerrainAsset::fault_formation(FaultFormationParams::default(), w, d, 1.0, &mut rng)
                .unwrap();
        let mesh = asset.mesh();
        assert_eq!(mesh.vertices.len(), w * d);
        assert_eq!(mesh.indices.len(), 6 * (w - 1) * (d - 1));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < w * d));
    }
}

#[test]
fn test_fault_formation_heights_within_range() {
    let params = FaultFormationParams {
        iterations: 200,
        min_height: 0.0,
        max_height: 300.0,
        filter_strength: 0.5,
    };
    let asset =
        TerrainAsset::fault_formation(params, 64, 64, 3.0, &mut SeededRng::new(7)).unwrap();
    let (min, max) = asset.height_field().min_max();
    assert!(min.abs() < 1e-3, "min {min}");
    assert!((max - 300.0).abs() < 1e-2, "max {max}");
    for v in &asset.mesh().vertices {
        assert!((-1e-3..=300.01).contains(&v.position[1]));
    }
}

#[test]
fn test_zero_filter_matches_unsmoothed_accumulation() {
    let params = FaultFormationParams {
        iterations: 25,
        filter_strength: 0.0,
        ..Default::default()
    };
    let mut a = HeightField::new(10, 10, 1.0).unwrap();
    let mut b = a.clone();
    accumulate_faults(&mut a, &params, &mut SeededRng::new(3));
    accumulate_faults(&mut b, &params, &mut SeededRng::new(3));
    smooth_fir(&mut b, 0.0);
    assert_eq!(
        a.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        b.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
}

#[test]
fn test_forced_fault_on_two_by_two() {
    let params = FaultFormationParams {
        iterations: 1,
        min_height: 0.0,
        max_height: 10.0,
        filter_strength: 0.0,
    };
    // p1 = (0, 0), p2 = (1, 0): no cell has a positive cross product.
    let mut rng = Scripted(VecDeque::from([0, 0, 1, 0]));
    let asset = TerrainAsset::fault_formation(params.clone(), 2, 2, 1.0, &mut rng).unwrap();
    assert_eq!(asset.height_field().values(), &[0.0; 4]);

    // p1 = (0, 0), p2 = (0, 1): the x = 1 column is raised.
    let mut rng = Scripted(VecDeque::from([0, 0, 0, 1]));
    let asset = TerrainAsset::fault_formation(params, 2, 2, 1.0, &mut rng).unwrap();
    assert_eq!(asset.height_field().values(), &[0.0, 10.0, 0.0, 10.0]);
}

#[test]
fn test_diamond_square_five_terminates_clean() {
    let rects: Vec<usize> = octaves(5, 1.0).iter().map(|o| o.rect_size).collect();
    assert_eq!(rects, vec![8, 4, 2, 1]);

    let asset = TerrainAsset::midpoint_displacement(
        MidpointDisplacementParams::default(),
        5,
        1.0,
        &mut SeededRng::new(5),
    )
    .unwrap();
    assert!(asset.height_field().values().iter().all(|v| v.is_finite()));
}

#[test]
fn test_flat_static_field_scenario() {
    let field = HeightField::from_values(4, 4, 1.0, vec![5.0; 16]).unwrap();
    let mesh = triangulate(&field, 1.0).unwrap();
    assert!(mesh.vertices.iter().all(|v| v.position[1] == 5.0));
    assert_eq!(&mesh.indices[..6], &[0, 4, 5, 0, 5, 1]);
}

#[test]
fn test_raw_dump_to_static_asset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heightmap.bin");
    let bytes: Vec<u8> = (0..9).flat_map(|i| (i as f32 * 2.0).to_le_bytes()).collect();
    std::fs::write(&path, bytes).unwrap();

    let field = relief_terrain::load_raw(&path, 3.0).unwrap();
    let asset = TerrainAsset::from_height_field(field).unwrap();
    assert_eq!(asset.mesh().vertices[8].position, [6.0, 16.0, 6.0]);
    assert_eq!(asset.center().x, 4.5);
}

#[test]
fn test_non_square_midpoint_rejected_before_mesh() {
    let mut field = HeightField::new(6, 4, 1.0).unwrap();
    let generator = relief_terrain::MidpointDisplacementGenerator::default();
    assert!(matches!(
        generator.generate(&mut field, &mut SeededRng::new(0)),
        Err(TerrainError::InvalidDimension { width: 6, depth: 4 })
    ));
}
