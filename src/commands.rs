// commands.rs
// Commands sent to a running model and their dispatch. Commands arrive over a
// channel and are drained between steps.

use crossbeam::channel::Receiver;
use serde::{Deserialize, Serialize};

use crate::config::DiffusionSettings;
use crate::gas_law::HoldConstant;
use crate::simulation::{DiffusionModel, IdealGasModel};
use crate::species::ParticleType;
use crate::statistics::{PressureUnit, TemperatureUnit};
use crate::time::TimeSpeed;

#[cfg(feature = "profiling")]
use crate::PROFILER;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimCommand {
    AddParticles { species: ParticleType, count: usize },
    RemoveParticles { species: ParticleType, count: usize },
    ClearParticles,
    SetDesiredWidth { width: f64 },
    SetLidWidth { lid_width: f64 },
    SetLidOn { on: bool },
    SetHoldConstant { mode: HoldConstant },
    SetHeatCoolFactor { factor: f64 },
    SetTimeSpeed { speed: TimeSpeed },
    SetPlaying { playing: bool },
    SetParticleParticleCollisions { enabled: bool },
    StartCollisionCounter,
    SetCollisionCounterPeriod { period: f64 },
    SetPressureUnit { unit: PressureUnit },
    SetTemperatureUnit { unit: TemperatureUnit },
    /// Advance by one real-time frame even while paused.
    StepOnce { real_dt: f64 },
    Reset,
    PrintProfile,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DiffusionCommand {
    SetDivider { present: bool },
    SetSettings { species: ParticleType, settings: DiffusionSettings },
    SetTimeSpeed { speed: TimeSpeed },
    SetPlaying { playing: bool },
    SetParticleParticleCollisions { enabled: bool },
    StepOnce { real_dt: f64 },
    Reset,
}

/// Apply a single command to the ideal gas model.
pub fn process_command(cmd: SimCommand, model: &mut IdealGasModel) {
    match cmd {
        SimCommand::AddParticles { species, count } => {
            let added = model.add_particles(species, count);
            if added < count {
                tracing::debug!(?species, requested = count, added, "particle cap reached");
            }
        }
        SimCommand::RemoveParticles { species, count } => {
            model.remove_particles(species, count);
        }
        SimCommand::ClearParticles => model.clear_particles(),
        SimCommand::SetDesiredWidth { width } => {
            model.set_desired_width(width);
        }
        SimCommand::SetLidWidth { lid_width } => model.set_lid_width(lid_width),
        SimCommand::SetLidOn { on } => model.set_lid_on(on),
        SimCommand::SetHoldConstant { mode } => model.set_hold_constant(mode),
        SimCommand::SetHeatCoolFactor { factor } => model.set_heat_cool_factor(factor),
        SimCommand::SetTimeSpeed { speed } => model.set_time_speed(speed),
        SimCommand::SetPlaying { playing } => model.set_playing(playing),
        SimCommand::SetParticleParticleCollisions { enabled } => {
            model.set_particle_particle_collisions(enabled)
        }
        SimCommand::StartCollisionCounter => model.start_collision_counter(),
        SimCommand::SetCollisionCounterPeriod { period } => {
            if !model.set_collision_counter_period(period) {
                tracing::warn!(period, "unsupported collision counter period");
            }
        }
        SimCommand::SetPressureUnit { unit } => model.gauge.unit = unit,
        SimCommand::SetTemperatureUnit { unit } => model.thermometer.unit = unit,
        SimCommand::StepOnce { real_dt } => {
            let playing = model.is_playing();
            model.set_playing(true);
            model.step(real_dt);
            model.set_playing(playing);
        }
        SimCommand::Reset => model.reset(),
        SimCommand::PrintProfile => {
            #[cfg(feature = "profiling")]
            PROFILER.lock().log_and_clear();
        }
    }
}

pub fn process_diffusion_command(cmd: DiffusionCommand, model: &mut DiffusionModel) {
    match cmd {
        DiffusionCommand::SetDivider { present } => model.set_divider(present),
        DiffusionCommand::SetSettings { species, settings } => {
            if !model.set_settings(species, settings) {
                tracing::debug!(?species, "diffusion settings rejected");
            }
        }
        DiffusionCommand::SetTimeSpeed { speed } => model.set_time_speed(speed),
        DiffusionCommand::SetPlaying { playing } => model.set_playing(playing),
        DiffusionCommand::SetParticleParticleCollisions { enabled } => {
            model.set_particle_particle_collisions(enabled)
        }
        DiffusionCommand::StepOnce { real_dt } => {
            let playing = model.is_playing();
            model.set_playing(true);
            model.step(real_dt);
            model.set_playing(playing);
        }
        DiffusionCommand::Reset => model.reset(),
    }
}

/// Apply every command waiting on `rx` without blocking. Returns how many were applied.
pub fn drain_commands(rx: &Receiver<SimCommand>, model: &mut IdealGasModel) -> usize {
    let mut applied = 0;
    while let Ok(cmd) = rx.try_recv() {
        process_command(cmd, model);
        applied += 1;
    }
    applied
}

pub fn drain_diffusion_commands(rx: &Receiver<DiffusionCommand>, model: &mut DiffusionModel) -> usize {
    let mut applied = 0;
    while let Ok(cmd) = rx.try_recv() {
        process_diffusion_command(cmd, model);
        applied += 1;
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crossbeam::channel::unbounded;

    #[test]
    fn drained_commands_reach_the_model() {
        let mut model = IdealGasModel::new(SimConfig::default()).unwrap();
        let (tx, rx) = unbounded();
        tx.send(SimCommand::AddParticles { species: ParticleType::Heavy, count: 12 }).unwrap();
        tx.send(SimCommand::RemoveParticles { species: ParticleType::Heavy, count: 2 }).unwrap();
        tx.send(SimCommand::SetHoldConstant { mode: HoldConstant::Volume }).unwrap();
        tx.send(SimCommand::SetDesiredWidth { width: 7000.0 }).unwrap();
        assert_eq!(drain_commands(&rx, &mut model), 4);
        assert_eq!(model.particle_count(ParticleType::Heavy), 10);
        assert_eq!(model.hold_constant(), HoldConstant::Volume);
        assert_eq!(model.container().base.width(), 10_000.0);
    }

    #[test]
    fn step_once_works_while_paused() {
        let mut model = IdealGasModel::new(SimConfig::default()).unwrap();
        process_command(SimCommand::SetPlaying { playing: false }, &mut model);
        process_command(SimCommand::StepOnce { real_dt: 0.1 }, &mut model);
        assert!(model.model_time() > 0.0);
        assert!(!model.is_playing());
    }

    #[test]
    fn commands_deserialize_from_json() {
        let cmd: SimCommand =
            serde_json::from_str(r#"{"SetHoldConstant":{"mode":"PressureViaTemperature"}}"#).unwrap();
        assert_eq!(cmd, SimCommand::SetHoldConstant { mode: HoldConstant::PressureViaTemperature });
    }

    #[test]
    fn diffusion_commands_apply() {
        let mut model = DiffusionModel::new(SimConfig::default()).unwrap();
        process_diffusion_command(DiffusionCommand::SetDivider { present: false }, &mut model);
        assert!(!model.has_divider());
        process_diffusion_command(DiffusionCommand::Reset, &mut model);
        assert!(model.has_divider());
    }
}
