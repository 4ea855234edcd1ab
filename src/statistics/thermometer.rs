use serde::{Deserialize, Serialize};

use crate::units::ZERO_CELSIUS_IN_KELVIN;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Kelvin,
    Celsius,
}

#[derive(Clone, Debug, Default)]
pub struct Thermometer {
    pub unit: TemperatureUnit,
}

impl Thermometer {
    /// `None` while the container is empty.
    pub fn reading(&self, kelvin: Option<f64>) -> Option<f64> {
        kelvin.map(|k| match self.unit {
            TemperatureUnit::Kelvin => k,
            TemperatureUnit::Celsius => k - ZERO_CELSIUS_IN_KELVIN,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_offset() {
        let t = Thermometer {
            unit: TemperatureUnit::Celsius,
        };
        assert_eq!(t.reading(Some(273.15)), Some(0.0));
        assert_eq!(t.reading(None), None);
    }
}
