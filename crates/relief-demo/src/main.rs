//! Demo binary: builds a terrain asset from `config.ron` + CLI overrides,
//! reports the mesh, and writes the configured heightfield exports.
//!
//! Run with `cargo run -p relief-demo -- --algorithm midpoint-displacement --size 129 --seed 7`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use relief_asset::TerrainAsset;
use relief_config::{Algorithm, CliArgs, Config, ConfigError};
use relief_terrain::{
    FaultFormationParams, HeightField, MidpointDisplacementParams, SeededRng, TerrainError,
    render_height_field,
};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("static heightfield source needs terrain.heightmap_path (or --heightmap)")]
    MissingHeightmap,

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("./config"));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    relief_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), DemoError> {
    let mut rng = match config.terrain.seed {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_os_rng(),
    };

    let asset = build_asset(config, &mut rng)?;
    let mesh = asset.mesh();
    let (min, max) = asset.height_field().min_max();
    info!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        vertex_bytes = mesh.vertex_bytes().len(),
        index_bytes = mesh.index_bytes().len(),
        center_x = asset.center().x,
        center_z = asset.center().y,
        min_height = min,
        max_height = max,
        "mesh ready for upload"
    );

    export(config, asset.height_field())
}

fn build_asset(config: &Config, rng: &mut SeededRng) -> Result<TerrainAsset, DemoError> {
    let terrain = &config.terrain;
    let size = terrain.size as usize;

    let asset = match terrain.algorithm {
        Algorithm::FaultFormation => {
            let params = FaultFormationParams {
                iterations: config.fault.iterations,
                min_height: config.fault.min_height,
                max_height: config.fault.max_height,
                filter_strength: config.fault.filter_strength,
            };
            TerrainAsset::fault_formation(params, size, size, terrain.world_scale, rng)?
        }
        Algorithm::MidpointDisplacement => {
            let params = MidpointDisplacementParams {
                roughness: config.midpoint.roughness,
                min_height: config.midpoint.min_height,
                max_height: config.midpoint.max_height,
            };
            TerrainAsset::midpoint_displacement(params, size, terrain.world_scale, rng)?
        }
        Algorithm::StaticHeightField => {
            let path = terrain
                .heightmap_path
                .as_deref()
                .ok_or(DemoError::MissingHeightmap)?;
            TerrainAsset::from_height_field(load_height_field(path, terrain.world_scale)?)?
        }
    };
    Ok(asset)
}

/// `.json` files are read as documents, anything else as a raw f32 dump.
fn load_height_field(path: &Path, scale: f32) -> Result<HeightField, TerrainError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        relief_terrain::load_json(path, scale)
    } else {
        relief_terrain::load_raw(path, scale)
    }
}

fn export(config: &Config, field: &HeightField) -> Result<(), DemoError> {
    let out = &config.output;
    if !(out.heightfield_json || out.heightfield_png || out.heightfield_raw) {
        return Ok(());
    }

    std::fs::create_dir_all(&out.directory).map_err(|source| DemoError::OutputDir {
        path: out.directory.clone(),
        source,
    })?;

    if out.heightfield_json {
        let path = out.directory.join("heightfield.json");
        field.save_json(&path)?;
        info!(path = %path.display(), "exported heightfield JSON");
    }
    if out.heightfield_raw {
        let path = out.directory.join("heightfield.bin");
        field.save_raw(&path)?;
        info!(path = %path.display(), "exported raw heightfield");
    }
    if out.heightfield_png {
        let path = out.directory.join("heightfield.png");
        render_height_field(field).save_png(&path)?;
        info!(path = %path.display(), "exported heightfield PNG");
    }
    Ok(())
}
