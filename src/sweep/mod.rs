//! Pressure-volume sweeps: batches of independent headless ideal gas runs
//!
//! This module provides functionality to:
//! - Define sweep cases (container width, particle counts, temperature) in TOML
//! - Run every case on its own model in parallel
//! - Export per-case pressure, volume and temperature for analysis

pub mod config;
pub mod export;
pub mod runner;

pub use config::{SweepCase, SweepConfig};
pub use export::{export_results_to_csv, write_results_csv};
pub use runner::{CaseResult, SweepRunner};
