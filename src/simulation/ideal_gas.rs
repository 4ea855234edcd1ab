// simulation/ideal_gas.rs
// IdealGasModel: container with a lid, heater/cooler, hold-constant feedback
// and the gauges read by the Ideal, Explore and Energy screens.

use crossbeam::channel::Receiver;

use crate::collision::CollisionDetector;
use crate::config::SimConfig;
use crate::container::IdealGasLawContainer;
use crate::error::Result;
use crate::gas_law::{GasLawController, HoldConstant, Oops, OopsNotifier, PressureModel, TemperatureModel};
use crate::particle_system::ParticleSystem;
use crate::profile_scope;
use crate::species::ParticleType;
use crate::statistics::{
    AverageSpeed, CollisionCounter, GaugeNoise, PressureFilter, PressureGauge, RunningAverage, Thermometer,
};
use crate::time::{TimeSpeed, TimeTransform};
use crate::units::{kilopascals_to_atmospheres, to_kilopascals};
use crate::utils::Bounds2;

pub struct IdealGasModel {
    pub config: SimConfig,
    pub container: IdealGasLawContainer,
    pub particles: ParticleSystem,
    detector: CollisionDetector,
    controller: GasLawController,
    temperature_model: TemperatureModel,
    pressure_model: PressureModel,
    pub gauge: PressureGauge,
    pub thermometer: Thermometer,
    collision_counter: CollisionCounter,
    average_speed: AverageSpeed,
    left_wall_average: RunningAverage,
    time: TimeTransform,
    oops: OopsNotifier,
    playing: bool,
    heat_cool_factor: f64,
    /// Model time elapsed since construction or reset (ps).
    model_time: f64,
}

impl IdealGasModel {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let container = IdealGasLawContainer::new(&config.container, &config.lid);
        let detector = CollisionDetector::new(
            container.base.max_bounds(),
            config.collisions.region_length,
            config.collisions.particle_particle_collisions,
        );
        let stats = &config.statistics;
        let filter: Option<Box<dyn PressureFilter>> = if stats.gauge_noise {
            Some(Box::new(GaugeNoise::new(config.seed(), stats)))
        } else {
            None
        };
        Self {
            container,
            particles: ParticleSystem::new(config.seed(), config.injection.clone()),
            detector,
            controller: GasLawController::new(&config.gas_law),
            temperature_model: TemperatureModel::default(),
            pressure_model: PressureModel::new(stats.pressure_sample_window),
            gauge: PressureGauge::new(stats.gauge_refresh_period, filter),
            thermometer: Thermometer::default(),
            collision_counter: CollisionCounter::new(stats.collision_counter_period),
            average_speed: AverageSpeed::new(stats.average_speed_samples),
            left_wall_average: RunningAverage::new(stats.left_wall_velocity_samples),
            time: TimeTransform::new(&config.time),
            oops: OopsNotifier::new(),
            playing: true,
            heat_cool_factor: 0.0,
            model_time: 0.0,
            config,
        }
    }

    /// Restore the initial state. Oops subscribers stay subscribed.
    pub fn reset(&mut self) {
        let oops = std::mem::take(&mut self.oops);
        *self = Self::build(self.config.clone());
        self.oops = oops;
        tracing::info!("ideal gas model reset");
    }

    /// Advance by a real-time frame, honoring play/pause and time speed.
    pub fn step(&mut self, real_dt: f64) {
        if !self.playing {
            return;
        }
        let dt = self.time.model_dt(real_dt);
        self.step_model_time(dt);
    }

    /// Advance by `dt` ps of model time.
    pub fn step_model_time(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        profile_scope!("ideal_gas_step");

        self.controller
            .apply_heat(dt, self.heat_cool_factor, &mut self.particles);
        self.container.step(dt);
        self.particles.step(dt);

        let model_bounds = self.model_bounds();
        let (inside, outside) = self.particles.populations_mut();
        self.detector.step(&self.container, inside, outside);
        self.particles.cull_outside(&model_bounds);

        if self.particles.total_count() == 0 {
            self.pressure_model.clear();
        } else {
            let base = &self.container.base;
            self.pressure_model
                .sample(dt, self.detector.wall_impulse(), base.perimeter() * base.depth);
        }

        let batch = self.controller.step(&mut self.particles, &mut self.container);
        for oops in batch {
            self.oops.notify(oops);
        }
        self.controller
            .check_lid(self.pressure_model.value(), &mut self.container);

        let temperature = self
            .temperature_model
            .update(self.particles.total_kinetic_energy(), self.particles.total_count());
        let pressure_kpa = self.pressure_kpa();
        self.gauge.step(dt, pressure_kpa, temperature);
        self.collision_counter
            .step(dt, self.detector.number_of_particle_container_collisions());
        self.average_speed.sample(&self.particles.inside);
        self.left_wall_average
            .push(self.container.base.left_wall_velocity());
        self.model_time += dt;
    }

    /// Outside particles are culled beyond this.
    pub fn model_bounds(&self) -> Bounds2 {
        self.container
            .base
            .max_bounds()
            .dilated(self.config.collisions.model_bounds_margin)
    }

    // ---- observables ----

    pub fn particle_count(&self, species: ParticleType) -> usize {
        self.particles.count(species)
    }

    pub fn total_particle_count(&self) -> usize {
        self.particles.total_count()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.total_kinetic_energy()
    }

    /// Current temperature of the inside particles (K), `None` when empty.
    pub fn temperature(&self) -> Option<f64> {
        self.particles.temperature()
    }

    /// Temperature as of the latest step, in the thermometer's unit.
    pub fn thermometer_reading(&self) -> Option<f64> {
        self.thermometer.reading(self.temperature_model.value())
    }

    /// Sampled pressure in kPa (zero for an empty container).
    pub fn pressure_kpa(&self) -> f64 {
        to_kilopascals(self.pressure_model.value())
    }

    pub fn pressure_atm(&self) -> f64 {
        kilopascals_to_atmospheres(self.pressure_kpa())
    }

    pub fn container(&self) -> &IdealGasLawContainer {
        &self.container
    }

    pub fn hold_constant(&self) -> HoldConstant {
        self.controller.hold_constant()
    }

    pub fn number_of_particle_container_collisions(&self) -> usize {
        self.detector.number_of_particle_container_collisions()
    }

    pub fn number_of_particle_particle_collisions(&self) -> usize {
        self.detector.number_of_particle_particle_collisions()
    }

    pub fn collision_counter(&self) -> &CollisionCounter {
        &self.collision_counter
    }

    pub fn average_speed(&self, species: ParticleType) -> Option<f64> {
        self.average_speed.speed(species)
    }

    pub fn left_wall_average_velocity(&self) -> f64 {
        self.left_wall_average.average()
    }

    pub fn gauge(&self) -> &PressureGauge {
        &self.gauge
    }

    pub fn heat_cool_factor(&self) -> f64 {
        self.heat_cool_factor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn time_speed(&self) -> TimeSpeed {
        self.time.speed
    }

    pub fn model_time(&self) -> f64 {
        self.model_time
    }

    // ---- mutations ----

    /// Rejected (returns false) while the mode owns the volume.
    pub fn set_desired_width(&mut self, width: f64) -> bool {
        if self.controller.hold_constant().owns_volume() {
            tracing::debug!(width, mode = ?self.controller.hold_constant(), "width change rejected");
            return false;
        }
        self.container.base.set_desired_width(width);
        true
    }

    pub fn set_lid_width(&mut self, lid_width: f64) {
        self.container.set_lid_width(lid_width);
    }

    pub fn set_lid_on(&mut self, on: bool) {
        self.container.set_lid_on(on);
    }

    pub fn set_hold_constant(&mut self, mode: HoldConstant) {
        let batch = self
            .controller
            .set_hold_constant(mode, &self.particles, &mut self.container);
        for oops in batch {
            self.oops.notify(oops);
        }
    }

    /// Pump particles in; returns how many were added.
    pub fn add_particles(&mut self, species: ParticleType, count: usize) -> usize {
        if species.is_diffusion() {
            tracing::warn!(?species, "diffusion species cannot be pumped into the ideal gas container");
            return 0;
        }
        let interior = self.container.base.bounds();
        self.particles.inject(species, count, &interior)
    }

    pub fn remove_particles(&mut self, species: ParticleType, count: usize) -> usize {
        self.particles.remove(species, count)
    }

    pub fn clear_particles(&mut self) {
        self.particles.clear();
    }

    /// Heater (+) / cooler (−) strength in [-1, 1].
    pub fn set_heat_cool_factor(&mut self, factor: f64) {
        self.heat_cool_factor = if factor.is_finite() { factor.clamp(-1.0, 1.0) } else { 0.0 };
    }

    pub fn set_time_speed(&mut self, speed: TimeSpeed) {
        self.time.speed = speed;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn set_particle_particle_collisions(&mut self, enabled: bool) {
        self.detector.particle_particle_collisions = enabled;
    }

    pub fn start_collision_counter(&mut self) {
        self.collision_counter.start();
    }

    pub fn stop_collision_counter(&mut self) {
        self.collision_counter.stop();
    }

    pub fn set_collision_counter_period(&mut self, period: f64) -> bool {
        self.collision_counter.set_sample_period(period)
    }

    /// One-shot notifications raised while stepping or changing modes.
    pub fn subscribe_oops(&mut self) -> Receiver<Oops> {
        self.oops.subscribe()
    }
}
