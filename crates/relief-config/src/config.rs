//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Grid and algorithm selection.
    pub terrain: TerrainConfig,
    /// Fault-formation knobs.
    pub fault: FaultConfig,
    /// Diamond-square knobs.
    pub midpoint: MidpointConfig,
    /// Export settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which heightfield source builds the terrain.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Fault formation followed by FIR smoothing.
    #[default]
    FaultFormation,
    /// Diamond-square midpoint displacement.
    MidpointDisplacement,
    /// Load `terrain.heightmap_path` and triangulate it unchanged.
    StaticHeightField,
}

/// Grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Heightfield source.
    pub algorithm: Algorithm,
    /// Grid side in samples (width and depth).
    pub size: u32,
    /// World-space spacing between adjacent samples.
    pub world_scale: f32,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Raw (`.bin`/`.raw`) or JSON (`.json`) heightfield for the static source.
    pub heightmap_path: Option<PathBuf>,
}

/// Fault-formation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaultConfig {
    /// Number of faults.
    pub iterations: u32,
    /// Output minimum.
    pub min_height: f32,
    /// Output maximum.
    pub max_height: f32,
    /// FIR blend factor in `[0, 1]`.
    pub filter_strength: f32,
}

/// Diamond-square configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MidpointConfig {
    /// Displacement decay exponent.
    pub roughness: f32,
    /// Output minimum.
    pub min_height: f32,
    /// Output maximum.
    pub max_height: f32,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the exports are written to.
    pub directory: PathBuf,
    /// Write `heightfield.json`.
    pub heightfield_json: bool,
    /// Write `heightfield.png` (grayscale).
    pub heightfield_png: bool,
    /// Write `heightfield.bin` (raw little-endian f32).
    pub heightfield_raw: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::FaultFormation,
            size: 256,
            world_scale: 3.0,
            seed: None,
            heightmap_path: None,
        }
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            min_height: 0.0,
            max_height: 300.0,
            filter_strength: 0.5,
        }
    }
}

impl Default for MidpointConfig {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            min_height: 0.0,
            max_height: 300.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./output"),
            heightfield_json: false,
            heightfield_png: true,
            heightfield_raw: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for these tools, e.g. `~/.config/relief`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("relief"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
