//! Procedural heightfield terrain: grid storage, fault-formation and
//! diamond-square generators, and heightfield import/export.

mod debug_viz;
mod error;
mod height_field;
mod io;
mod random;

pub mod fault_formation;
pub mod midpoint_displacement;

pub use debug_viz::{DebugImage, render_height_field};
pub use error::TerrainError;
pub use fault_formation::{FaultFormationGenerator, FaultFormationParams, GridPoint};
pub use height_field::HeightField;
pub use io::{HeightFieldDocument, load_json, load_raw};
pub use midpoint_displacement::{
    MidpointDisplacementGenerator, MidpointDisplacementParams, nearest_power_of_two,
};
pub use random::{RandomSource, SeededRng};
