// simulation/tests.rs
// End-to-end behavior of the ideal gas and diffusion models

use approx::assert_relative_eq;

use super::*;
use crate::config::{DiffusionSettings, SimConfig};
use crate::gas_law::{HoldConstant, Oops};
use crate::species::ParticleType;
use crate::time::TimeSpeed;
use crate::units::to_kilopascals;

fn quiet_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.seed = Some(2024);
    config.statistics.gauge_noise = false;
    config
}

fn ideal_with(heavy: usize, light: usize) -> IdealGasModel {
    let mut model = IdealGasModel::new(quiet_config()).unwrap();
    model.add_particles(ParticleType::Heavy, heavy);
    model.add_particles(ParticleType::Light, light);
    model
}

fn run(model: &mut IdealGasModel, steps: usize, dt: f64) {
    for _ in 0..steps {
        model.step_model_time(dt);
    }
}

#[test]
fn zero_step_changes_nothing() {
    let mut model = ideal_with(30, 30);
    run(&mut model, 20, 0.05);
    let before = model.particles.inside.clone();
    model.step_model_time(0.0);
    assert_eq!(model.particles.inside, before);
}

#[test]
fn paused_model_does_not_advance() {
    let mut model = ideal_with(10, 0);
    model.set_playing(false);
    let before = model.particles.inside.clone();
    model.step(0.1);
    assert_eq!(model.particles.inside, before);
    assert_eq!(model.model_time(), 0.0);
    model.set_playing(true);
    model.set_time_speed(TimeSpeed::Slow);
    model.step(0.1);
    assert_relative_eq!(model.model_time(), 0.0625);
}

#[test]
fn closed_container_conserves_energy() {
    let mut model = ideal_with(60, 60);
    // let the injected cluster spread before measuring
    run(&mut model, 50, 0.05);
    let energy = model.total_kinetic_energy();
    run(&mut model, 400, 0.05);
    assert_eq!(model.total_particle_count(), 120);
    assert_relative_eq!(model.total_kinetic_energy(), energy, max_relative = 1e-9);
}

#[test]
fn sampled_pressure_agrees_with_ideal_gas_law() {
    let mut model = ideal_with(0, 300);
    run(&mut model, 400, 0.05);
    let t = model.temperature().unwrap();
    let v = model.container().base.volume();
    let ideal = to_kilopascals(crate::gas_law::ideal_pressure(300, t, v));
    let sampled = model.pressure_kpa();
    assert!(
        (sampled - ideal).abs() / ideal < 0.25,
        "sampled {sampled} kPa vs ideal {ideal} kPa"
    );
}

#[test]
fn temperature_held_through_removal() {
    let mut model = ideal_with(80, 80);
    run(&mut model, 20, 0.05);
    model.set_hold_constant(HoldConstant::Temperature);
    let t = model.temperature().unwrap();
    model.remove_particles(ParticleType::Heavy, 50);
    run(&mut model, 5, 0.05);
    assert_relative_eq!(model.temperature().unwrap(), t, max_relative = 1e-6);
}

#[test]
fn emptying_while_holding_temperature_signals_once() {
    let mut model = ideal_with(10, 0);
    let oops = model.subscribe_oops();
    model.set_hold_constant(HoldConstant::Temperature);
    model.clear_particles();
    run(&mut model, 10, 0.05);
    assert_eq!(oops.try_iter().collect::<Vec<_>>(), vec![Oops::TemperatureUndefinedEmptyContainer]);
    assert_eq!(model.pressure_kpa(), 0.0);
    assert_eq!(model.temperature(), None);
}

#[test]
fn width_is_locked_while_volume_is_held() {
    let mut model = ideal_with(10, 0);
    model.set_hold_constant(HoldConstant::Volume);
    assert!(!model.set_desired_width(6000.0));
    assert_eq!(model.container().base.width(), 10_000.0);
    model.set_hold_constant(HoldConstant::Nothing);
    assert!(model.set_desired_width(6000.0));
    assert_eq!(model.container().base.width(), 6000.0);
}

#[test]
fn selecting_volume_stops_a_wall_in_motion() {
    let mut config = SimConfig::explore();
    config.seed = Some(8);
    let mut model = IdealGasModel::new(config).unwrap();
    model.add_particles(ParticleType::Heavy, 50);
    assert!(model.set_desired_width(5000.0));
    model.step_model_time(0.05);
    model.set_hold_constant(HoldConstant::Volume);
    let pinned = model.container().base.width();
    assert!(pinned < 10_000.0);
    run(&mut model, 100, 0.05);
    assert_eq!(model.container().base.width(), pinned);
    assert_eq!(model.container().base.left_wall_velocity(), 0.0);
    assert_eq!(model.hold_constant(), HoldConstant::Volume);
}

#[test]
fn explore_wall_heats_gas_when_pushed_in() {
    let mut config = SimConfig::explore();
    config.seed = Some(8);
    let mut model = IdealGasModel::new(config).unwrap();
    model.add_particles(ParticleType::Heavy, 100);
    run(&mut model, 100, 0.05);
    let t = model.temperature().unwrap();
    assert!(model.set_desired_width(5000.0));
    run(&mut model, 600, 0.05);
    assert_eq!(model.container().base.width(), 5000.0);
    assert!(model.temperature().unwrap() > t);
}

#[test]
fn over_pressure_blows_lid_and_gas_escapes() {
    let mut config = quiet_config();
    config.gas_law.max_pressure_kpa = 50.0;
    let mut model = IdealGasModel::new(config).unwrap();
    model.add_particles(ParticleType::Light, 200);
    run(&mut model, 200, 0.05);
    assert!(!model.container().lid_on());
    run(&mut model, 2000, 0.05);
    assert!(model.total_particle_count() < 200);
}

#[test]
fn collision_counter_stops_after_period() {
    let mut model = ideal_with(50, 50);
    model.start_collision_counter();
    run(&mut model, 250, 0.05);
    assert!(!model.collision_counter().is_running());
    assert!(model.collision_counter().count() > 0);
}

#[test]
fn reset_restores_initial_state() {
    let mut model = ideal_with(10, 10);
    model.set_heat_cool_factor(0.5);
    run(&mut model, 10, 0.05);
    model.reset();
    assert_eq!(model.total_particle_count(), 0);
    assert_eq!(model.heat_cool_factor(), 0.0);
    assert_eq!(model.model_time(), 0.0);
    assert!(model.container().lid_on());
}

#[test]
fn divider_keeps_species_apart() {
    let mut model = DiffusionModel::new(quiet_config()).unwrap();
    let divider = model.container.divider_x();
    for _ in 0..400 {
        model.step_model_time(0.05);
    }
    assert!(model
        .particles
        .inside
        .iter()
        .all(|p| (p.species == ParticleType::Diffusion1) == (p.position.x < divider)));
    let flow = model.flow_rate(ParticleType::Diffusion1).unwrap();
    assert_eq!(flow.left_to_right(), 0.0);
    assert_eq!(model.data().count(ParticleType::Diffusion1), (10, 0));
}

#[test]
fn lifting_divider_lets_species_mix() {
    let mut config = quiet_config();
    config.diffusion.species1.count = 100;
    config.diffusion.species2.count = 100;
    let mut model = DiffusionModel::new(config).unwrap();
    model.set_divider(false);
    let mut crossed = 0.0;
    for _ in 0..2000 {
        model.step_model_time(0.05);
        crossed += model.flow_rate(ParticleType::Diffusion2).unwrap().right_to_left();
    }
    assert!(crossed > 0.0);
    let (left, _) = model.data().count(ParticleType::Diffusion2);
    assert!(left > 0);
}

#[test]
fn settings_locked_without_divider() {
    let mut model = DiffusionModel::new(quiet_config()).unwrap();
    let settings = DiffusionSettings {
        count: 25,
        mass: 10.0,
        radius: 100.0,
        initial_temperature: 500.0,
    };
    assert!(model.set_settings(ParticleType::Diffusion2, settings));
    assert_eq!(model.particle_count(ParticleType::Diffusion2), 25);
    model.set_divider(false);
    assert!(!model.set_settings(ParticleType::Diffusion2, DiffusionSettings::default()));
    assert_eq!(model.particle_count(ParticleType::Diffusion2), 25);
}
