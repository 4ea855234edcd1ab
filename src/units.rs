//! Physical unit definitions and conversions.
//!
//! Base units:
//! - Length: picometer (pm)
//! - Time: picosecond (ps)
//! - Mass: atomic mass unit (AMU)
//! - Temperature: kelvin (K)

/// Boltzmann constant in AMU·pm²/(ps²·K).
pub const BOLTZMANN: f64 = 8314.462_618_153_24;

/// Converts pressure in AMU/(pm·ps²) to kilopascals.
pub const PRESSURE_CONVERSION_SCALE: f64 = 1.66054e6;

/// Atmospheres per kilopascal.
pub const ATM_PER_KPA: f64 = 0.009_869_23;

/// Picometers per nanometer.
pub const PM_PER_NM: f64 = 1000.0;

/// Offset between the Kelvin and Celsius scales.
pub const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Pressure in simulation units converted to kPa.
pub fn to_kilopascals(pressure: f64) -> f64 {
    pressure * PRESSURE_CONVERSION_SCALE
}

/// Pressure in kPa converted back to simulation units.
pub fn from_kilopascals(kpa: f64) -> f64 {
    kpa / PRESSURE_CONVERSION_SCALE
}

pub fn kilopascals_to_atmospheres(kpa: f64) -> f64 {
    kpa * ATM_PER_KPA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilopascal_round_trip() {
        let p = 3.26e-4;
        assert!((from_kilopascals(to_kilopascals(p)) - p).abs() < 1e-15);
    }

    #[test]
    fn one_atmosphere() {
        let atm = kilopascals_to_atmospheres(101.325);
        assert!((atm - 1.0).abs() < 1e-5, "got {}", atm);
    }
}
