// statistics/mod.rs
// Observers: they read the model after each step and never change particles.

pub mod average_speed;
pub mod collision_counter;
pub mod diffusion_data;
pub mod flow_rate;
pub mod pressure_gauge;
pub mod thermometer;

pub use average_speed::AverageSpeed;
pub use collision_counter::CollisionCounter;
pub use diffusion_data::{DiffusionData, SideData};
pub use flow_rate::ParticleFlowRate;
pub use pressure_gauge::{GaugeNoise, PressureFilter, PressureGauge, PressureUnit};
pub use thermometer::{TemperatureUnit, Thermometer};

use std::collections::VecDeque;

/// Mean of the latest `capacity` samples.
#[derive(Clone, Debug)]
pub struct RunningAverage {
    capacity: usize,
    samples: VecDeque<f64>,
    sum: f64,
}

impl RunningAverage {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
            sum: 0.0,
        }
    }

    pub fn push(&mut self, value: f64) -> f64 {
        if self.samples.len() == self.capacity {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }
        self.samples.push_back(value);
        self.sum += value;
        self.average()
    }

    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
    }
}
