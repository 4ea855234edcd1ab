// gas_law/controller.rs
// Hold-constant feedback between particles and container.

use smallvec::SmallVec;

use crate::config::GasLawConfig;
use crate::container::IdealGasLawContainer;
use crate::particle_system::ParticleSystem;
use crate::units::{from_kilopascals, BOLTZMANN};

use super::pressure::ideal_pressure;
use super::{HoldConstant, Oops};

pub type OopsBatch = SmallVec<[Oops; 4]>;

/// The maximum-temperature notification re-arms once the gas cools below this fraction of the maximum.
const MAX_TEMPERATURE_REARM: f64 = 0.99;

pub struct GasLawController {
    hold_constant: HoldConstant,
    pub max_temperature: f64,
    /// AMU/(pm·ps²)
    pub max_pressure: f64,
    pub heat_cool_rate: f64,
    target_temperature: Option<f64>,
    /// AMU/(pm·ps²)
    target_pressure: Option<f64>,
    /// An empty-container notification was raised and particles have not returned since.
    empty_signalled: bool,
    /// Temperature is at or above the maximum and the notification was raised.
    over_max_signalled: bool,
}

impl GasLawController {
    pub fn new(config: &GasLawConfig) -> Self {
        Self {
            hold_constant: config.hold_constant,
            max_temperature: config.max_temperature,
            max_pressure: from_kilopascals(config.max_pressure_kpa),
            heat_cool_rate: config.heat_cool_rate,
            target_temperature: None,
            target_pressure: None,
            empty_signalled: false,
            over_max_signalled: false,
        }
    }

    pub fn hold_constant(&self) -> HoldConstant {
        self.hold_constant
    }

    pub fn target_temperature(&self) -> Option<f64> {
        self.target_temperature
    }

    /// AMU/(pm·ps²)
    pub fn target_pressure(&self) -> Option<f64> {
        self.target_pressure
    }

    /// Switch modes, capturing the held quantity from the current state.
    pub fn set_hold_constant(
        &mut self,
        mode: HoldConstant,
        particles: &ParticleSystem,
        container: &mut IdealGasLawContainer,
    ) -> OopsBatch {
        let mut oops = OopsBatch::new();
        self.hold_constant = mode;
        if mode.owns_volume() {
            container.base.stop_animation();
        }
        self.empty_signalled = false;
        self.capture_targets(particles, container);
        if particles.total_count() == 0 {
            if let Some(o) = mode.empty_container_oops() {
                self.empty_signalled = true;
                oops.push(o);
            }
        }
        tracing::debug!(?mode, target_temperature = ?self.target_temperature, "hold constant changed");
        oops
    }

    fn capture_targets(&mut self, particles: &ParticleSystem, container: &IdealGasLawContainer) {
        self.target_temperature = particles.temperature();
        self.target_pressure = self
            .target_temperature
            .map(|t| ideal_pressure(particles.total_count(), t, container.base.volume()));
    }

    /// Heater/cooler: nudge the temperature by `factor · rate · dt`, unless the
    /// current mode owns temperature.
    pub fn apply_heat(&self, dt: f64, factor: f64, particles: &mut ParticleSystem) {
        if factor == 0.0 || dt <= 0.0 || self.hold_constant.owns_temperature() {
            return;
        }
        if let Some(t) = particles.temperature() {
            let target = (t + factor.clamp(-1.0, 1.0) * self.heat_cool_rate * dt).max(0.0);
            particles.scale_to_temperature(target);
        }
    }

    /// Apply the hold-constant feedback for one step.
    pub fn step(&mut self, particles: &mut ParticleSystem, container: &mut IdealGasLawContainer) -> OopsBatch {
        let mut oops = OopsBatch::new();
        let count = particles.total_count();

        let Some(temperature) = particles.temperature() else {
            if !self.empty_signalled {
                if let Some(o) = self.hold_constant.empty_container_oops() {
                    self.empty_signalled = true;
                    oops.push(o);
                }
            }
            self.over_max_signalled = false;
            self.target_temperature = None;
            self.target_pressure = None;
            return oops;
        };
        self.empty_signalled = false;

        // targets follow the state until particles first exist in a held mode
        if self.target_temperature.is_none() {
            self.capture_targets(particles, container);
        }

        match self.hold_constant {
            HoldConstant::Nothing | HoldConstant::Volume => {}
            HoldConstant::Temperature => {
                if let Some(target) = self.target_temperature {
                    particles.scale_to_temperature(target);
                }
            }
            HoldConstant::PressureViaVolume => {
                if let Some(pressure) = self.target_pressure.filter(|p| *p > 0.0) {
                    let base = &mut container.base;
                    let width = count as f64 * BOLTZMANN * temperature / (pressure * base.height * base.depth);
                    let (min_width, max_width) = base.width_range;
                    if width > max_width {
                        base.animate_width_to(max_width);
                        oops.push(Oops::PressureHeldConstantVolumeTooLarge);
                        self.revert_to_nothing();
                    } else if width < min_width {
                        base.animate_width_to(min_width);
                        oops.push(Oops::PressureHeldConstantVolumeTooSmall);
                        self.revert_to_nothing();
                    } else {
                        base.animate_width_to(width);
                    }
                }
            }
            HoldConstant::PressureViaTemperature => {
                if let Some(pressure) = self.target_pressure {
                    let required = pressure * container.base.volume() / (count as f64 * BOLTZMANN);
                    if required > self.max_temperature {
                        particles.scale_to_temperature(self.max_temperature);
                        oops.push(Oops::MaximumTemperatureExceeded);
                        self.over_max_signalled = true;
                        self.revert_to_nothing();
                    } else {
                        particles.scale_to_temperature(required);
                    }
                }
            }
        }

        if let Some(t) = particles.temperature() {
            if t > self.max_temperature {
                particles.scale_to_temperature(self.max_temperature);
                if !self.over_max_signalled {
                    self.over_max_signalled = true;
                    oops.push(Oops::MaximumTemperatureExceeded);
                }
            } else if t < self.max_temperature * MAX_TEMPERATURE_REARM {
                self.over_max_signalled = false;
            }
        }
        oops
    }

    /// Lid blow-off: the lid is on, `pressure` (sampled) exceeds the maximum
    /// and the opening is too narrow to vent. Returns true when the lid blew.
    pub fn check_lid(&mut self, pressure: f64, container: &mut IdealGasLawContainer) -> bool {
        if pressure > self.max_pressure && container.should_blow_lid_off() {
            container.blow_lid_off();
            tracing::info!(pressure, "pressure exceeded maximum, lid blew off");
            if self.hold_constant.holds_pressure() {
                self.revert_to_nothing();
            }
            return true;
        }
        false
    }

    fn revert_to_nothing(&mut self) {
        tracing::debug!(from = ?self.hold_constant, "hold constant reverted to nothing");
        self.hold_constant = HoldConstant::Nothing;
    }

    pub fn reset(&mut self, config: &GasLawConfig) {
        *self = Self::new(config);
    }
}
