//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Algorithm, Config};

/// Terrain generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural heightfield terrain generator")]
pub struct CliArgs {
    /// Heightfield source.
    #[arg(long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Grid side in samples.
    #[arg(long)]
    pub size: Option<u32>,

    /// World-space spacing between samples.
    #[arg(long)]
    pub world_scale: Option<f32>,

    /// RNG seed for reproducible terrain.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Heightfield file for the static source (.bin/.raw or .json).
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Number of faults (fault formation).
    #[arg(long)]
    pub iterations: Option<u32>,

    /// FIR smoothing strength in [0, 1] (fault formation).
    #[arg(long)]
    pub filter_strength: Option<f32>,

    /// Displacement decay exponent (midpoint displacement).
    #[arg(long)]
    pub roughness: Option<f32>,

    /// Output minimum height (applies to both generators).
    #[arg(long)]
    pub min_height: Option<f32>,

    /// Output maximum height (applies to both generators).
    #[arg(long)]
    pub max_height: Option<f32>,

    /// Export directory.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(algorithm) = args.algorithm {
            self.terrain.algorithm = algorithm;
        }
        if let Some(size) = args.size {
            self.terrain.size = size;
        }
        if let Some(scale) = args.world_scale {
            self.terrain.world_scale = scale;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = Some(seed);
        }
        if let Some(ref path) = args.heightmap {
            self.terrain.heightmap_path = Some(path.clone());
        }
        if let Some(iterations) = args.iterations {
            self.fault.iterations = iterations;
        }
        if let Some(strength) = args.filter_strength {
            self.fault.filter_strength = strength;
        }
        if let Some(roughness) = args.roughness {
            self.midpoint.roughness = roughness;
        }
        if let Some(min) = args.min_height {
            self.fault.min_height = min;
            self.midpoint.min_height = min;
        }
        if let Some(max) = args.max_height {
            self.fault.max_height = max;
            self.midpoint.max_height = max;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
