pub mod collision;
pub mod commands;
pub mod config;
pub mod container;
pub mod error;
pub mod gas_law;
pub mod io;
pub mod particle;
pub mod particle_system;
pub mod profiler;
pub mod region;
pub mod simulation;
pub mod species;
pub mod statistics;
pub mod sweep;
pub mod time;
pub mod units;
pub mod utils;

pub use error::{Error, Result};
pub use simulation::{DiffusionModel, IdealGasModel};

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
