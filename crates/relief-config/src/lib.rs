//! Configuration for the relief terrain tools.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line via clap, and support hot-reload detection.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Algorithm, Config, DebugConfig, FaultConfig, MidpointConfig, OutputConfig, TerrainConfig,
};
pub use error::ConfigError;
