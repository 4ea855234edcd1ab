// statistics/pressure_gauge.rs
// Displayed pressure: refreshed periodically through a filter stage.

use serde::{Deserialize, Serialize};

use crate::config::StatisticsConfig;
use crate::units::kilopascals_to_atmospheres;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    #[default]
    Kilopascals,
    Atmospheres,
}

/// Post-processing applied to each refreshed gauge reading (kPa in, kPa out).
pub trait PressureFilter: Send {
    fn apply(&mut self, pressure_kpa: f64, temperature: Option<f64>) -> f64;
}

/// Uniform noise that is loudest for a cold gas and fades out as it warms.
pub struct GaugeNoise {
    rng: fastrand::Rng,
    max_noise_kpa: f64,
    full_temperature: f64,
    zero_temperature: f64,
}

impl GaugeNoise {
    pub fn new(seed: u64, config: &StatisticsConfig) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            max_noise_kpa: config.gauge_max_noise_kpa,
            full_temperature: config.gauge_noise_full_temperature,
            zero_temperature: config.gauge_noise_zero_temperature,
        }
    }

    /// Noise amplitude: full at or below the full temperature, zero at or
    /// above the zero temperature, linear in between.
    pub fn amplitude(&self, temperature: f64) -> f64 {
        if temperature <= self.full_temperature {
            self.max_noise_kpa
        } else if temperature >= self.zero_temperature {
            0.0
        } else {
            let fraction = (self.zero_temperature - temperature) / (self.zero_temperature - self.full_temperature);
            self.max_noise_kpa * fraction
        }
    }
}

impl PressureFilter for GaugeNoise {
    fn apply(&mut self, pressure_kpa: f64, temperature: Option<f64>) -> f64 {
        let Some(temperature) = temperature else {
            return pressure_kpa;
        };
        if pressure_kpa <= 0.0 {
            return pressure_kpa;
        }
        let amplitude = self.amplitude(temperature);
        let noise = (self.rng.f64() * 2.0 - 1.0) * amplitude;
        (pressure_kpa + noise).max(0.0)
    }
}

pub struct PressureGauge {
    refresh_period: f64,
    since_refresh: f64,
    /// kPa shown on the gauge.
    displayed: f64,
    pub unit: PressureUnit,
    filter: Option<Box<dyn PressureFilter>>,
}

impl PressureGauge {
    pub fn new(refresh_period: f64, filter: Option<Box<dyn PressureFilter>>) -> Self {
        Self {
            refresh_period,
            since_refresh: 0.0,
            displayed: 0.0,
            unit: PressureUnit::default(),
            filter,
        }
    }

    pub fn set_filter(&mut self, filter: Option<Box<dyn PressureFilter>>) {
        self.filter = filter;
    }

    /// Advance the refresh clock; a new reading is taken once per period.
    /// An empty container reads zero immediately.
    pub fn step(&mut self, dt: f64, pressure_kpa: f64, temperature: Option<f64>) {
        if temperature.is_none() {
            self.displayed = 0.0;
            self.since_refresh = 0.0;
            return;
        }
        self.since_refresh += dt;
        if self.since_refresh >= self.refresh_period {
            self.since_refresh = 0.0;
            self.displayed = match self.filter.as_mut() {
                Some(filter) => filter.apply(pressure_kpa, temperature),
                None => pressure_kpa,
            };
        }
    }

    pub fn pressure_kpa(&self) -> f64 {
        self.displayed
    }

    /// Reading in the gauge's current unit.
    pub fn reading(&self) -> f64 {
        match self.unit {
            PressureUnit::Kilopascals => self.displayed,
            PressureUnit::Atmospheres => kilopascals_to_atmospheres(self.displayed),
        }
    }

    pub fn reset(&mut self) {
        self.since_refresh = 0.0;
        self.displayed = 0.0;
    }
}
