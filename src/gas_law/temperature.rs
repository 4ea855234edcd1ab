// gas_law/temperature.rs
// T = (2/3)·(KE/N)/k

use crate::units::BOLTZMANN;

/// `None` for an empty population.
pub fn temperature_from_kinetic_energy(total_kinetic_energy: f64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some((2.0 / 3.0) * (total_kinetic_energy / count as f64) / BOLTZMANN)
}

/// Total kinetic energy `count` particles have at `temperature`.
pub fn kinetic_energy_for_temperature(temperature: f64, count: usize) -> f64 {
    1.5 * BOLTZMANN * temperature * count as f64
}

/// Latest temperature of the inside population.
#[derive(Clone, Debug, Default)]
pub struct TemperatureModel {
    value: Option<f64>,
}

impl TemperatureModel {
    pub fn update(&mut self, total_kinetic_energy: f64, count: usize) -> Option<f64> {
        self.value = temperature_from_kinetic_energy(total_kinetic_energy, count);
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}
