// Centralized configuration for simulation parameters

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gas_law::HoldConstant;
use crate::units::PM_PER_NM;

// ====================
// Container Parameters
// ====================
/// Interior height of every container (pm).
pub const CONTAINER_HEIGHT: f64 = 8750.0;
/// Depth used to turn the 2D interior into a volume (pm).
pub const CONTAINER_DEPTH: f64 = 8750.0;
pub const WALL_THICKNESS: f64 = 75.0;
pub const CONTAINER_MIN_WIDTH: f64 = 5000.0;
pub const CONTAINER_MAX_WIDTH: f64 = 15000.0;
pub const CONTAINER_DEFAULT_WIDTH: f64 = 10000.0;
/// Fastest the left wall may move when animating toward a desired width (pm/ps).
pub const WALL_SPEED_LIMIT: f64 = 250.0;

// ====================
// Lid Parameters
// ====================
pub const OPENING_LEFT_INSET: f64 = 200.0;
pub const OPENING_RIGHT_INSET: f64 = 175.0;
/// Openings narrower than this cannot vent; over-pressure blows the lid off.
pub const MIN_VENT_OPENING_WIDTH: f64 = 500.0;

// ====================
// Collision Parameters
// ====================
/// Side of a square collision region: 2 nm.
pub const REGION_LENGTH: f64 = 2.0 * PM_PER_NM;
/// Outside particles are culled once they leave the container max bounds grown by this (pm).
pub const MODEL_BOUNDS_MARGIN: f64 = 5000.0;

// ====================
// Gas Law Parameters
// ====================
pub const MAX_TEMPERATURE: f64 = 100_000.0;
pub const MAX_PRESSURE_KPA: f64 = 20_000.0;
/// Heater/cooler temperature change at full strength (K/ps).
pub const HEAT_COOL_RATE: f64 = 100.0;

// ====================
// Particle Injection
// ====================
pub const INITIAL_TEMPERATURE: f64 = 300.0;
pub const MAX_PARTICLES_PER_SPECIES: usize = 1000;
/// Full angle of the cone injected particles leave the pump in (rad).
pub const INJECTION_CONE_ANGLE: f64 = std::f64::consts::FRAC_PI_2;

// ====================
// Statistics
// ====================
pub const PRESSURE_SAMPLE_WINDOW: f64 = 5.0;
pub const GAUGE_REFRESH_PERIOD: f64 = 0.75;
pub const GAUGE_MAX_NOISE_KPA: f64 = 20.0;
/// Noise is strongest at or below this temperature...
pub const GAUGE_NOISE_FULL_TEMPERATURE: f64 = 50.0;
/// ...and vanishes at or above this one.
pub const GAUGE_NOISE_ZERO_TEMPERATURE: f64 = 300.0;
pub const COLLISION_COUNTER_PERIODS: [f64; 4] = [10.0, 20.0, 50.0, 100.0];
pub const AVERAGE_SPEED_SAMPLES: usize = 20;
pub const LEFT_WALL_VELOCITY_SAMPLES: usize = 10;
pub const FLOW_RATE_SAMPLE_PERIOD: f64 = 1.0;
pub const FLOW_RATE_SAMPLES: usize = 10;

// ====================
// Time
// ====================
pub const NORMAL_PS_PER_SECOND: f64 = 2.5;
pub const SLOW_PS_PER_SECOND: f64 = NORMAL_PS_PER_SECOND / 4.0;
/// Longer real frames are truncated so a stalled clock cannot inject a huge step.
pub const MAX_REAL_DT: f64 = 0.25;

// ====================
// Diffusion
// ====================
pub const DIFFUSION_CONTAINER_WIDTH: f64 = 16000.0;
pub const DIVIDER_THICKNESS: f64 = 75.0;
pub const DIFFUSION_MASS_RANGE: (f64, f64) = (4.0, 32.0);
pub const DIFFUSION_RADIUS_RANGE: (f64, f64) = (35.0, 235.0);
pub const DIFFUSION_TEMPERATURE_RANGE: (f64, f64) = (50.0, 1000.0);
pub const DIFFUSION_MAX_COUNT: usize = 200;

pub const DEFAULT_SEED: u64 = 0x6761_7370_726f_7073;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionTemperature {
    /// Inject at the gas' current temperature, or the initial temperature when empty.
    MatchExisting,
    /// Always inject at the configured initial temperature.
    Fixed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// x of the interior's bottom-right corner; width grows to the left.
    pub position_x: f64,
    pub position_y: f64,
    pub height: f64,
    pub depth: f64,
    pub wall_thickness: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub default_width: f64,
    pub wall_speed_limit: f64,
    /// When true the left wall moves at a bounded speed and exchanges momentum with particles.
    pub left_wall_does_work: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            position_x: 0.0,
            position_y: 0.0,
            height: CONTAINER_HEIGHT,
            depth: CONTAINER_DEPTH,
            wall_thickness: WALL_THICKNESS,
            min_width: CONTAINER_MIN_WIDTH,
            max_width: CONTAINER_MAX_WIDTH,
            default_width: CONTAINER_DEFAULT_WIDTH,
            wall_speed_limit: WALL_SPEED_LIMIT,
            left_wall_does_work: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LidConfig {
    pub opening_left_inset: f64,
    pub opening_right_inset: f64,
    pub min_vent_opening_width: f64,
}

impl Default for LidConfig {
    fn default() -> Self {
        Self {
            opening_left_inset: OPENING_LEFT_INSET,
            opening_right_inset: OPENING_RIGHT_INSET,
            min_vent_opening_width: MIN_VENT_OPENING_WIDTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub region_length: f64,
    pub particle_particle_collisions: bool,
    pub model_bounds_margin: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            region_length: REGION_LENGTH,
            particle_particle_collisions: true,
            model_bounds_margin: MODEL_BOUNDS_MARGIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasLawConfig {
    pub hold_constant: HoldConstant,
    pub max_temperature: f64,
    pub max_pressure_kpa: f64,
    pub heat_cool_rate: f64,
}

impl Default for GasLawConfig {
    fn default() -> Self {
        Self {
            hold_constant: HoldConstant::Nothing,
            max_temperature: MAX_TEMPERATURE,
            max_pressure_kpa: MAX_PRESSURE_KPA,
            heat_cool_rate: HEAT_COOL_RATE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    pub initial_temperature: f64,
    pub temperature_mode: InjectionTemperature,
    pub max_particles_per_species: usize,
    pub cone_angle: f64,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            initial_temperature: INITIAL_TEMPERATURE,
            temperature_mode: InjectionTemperature::MatchExisting,
            max_particles_per_species: MAX_PARTICLES_PER_SPECIES,
            cone_angle: INJECTION_CONE_ANGLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub pressure_sample_window: f64,
    pub gauge_refresh_period: f64,
    pub gauge_noise: bool,
    pub gauge_max_noise_kpa: f64,
    pub gauge_noise_full_temperature: f64,
    pub gauge_noise_zero_temperature: f64,
    pub collision_counter_period: f64,
    pub average_speed_samples: usize,
    pub left_wall_velocity_samples: usize,
    pub flow_rate_sample_period: f64,
    pub flow_rate_samples: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            pressure_sample_window: PRESSURE_SAMPLE_WINDOW,
            gauge_refresh_period: GAUGE_REFRESH_PERIOD,
            gauge_noise: true,
            gauge_max_noise_kpa: GAUGE_MAX_NOISE_KPA,
            gauge_noise_full_temperature: GAUGE_NOISE_FULL_TEMPERATURE,
            gauge_noise_zero_temperature: GAUGE_NOISE_ZERO_TEMPERATURE,
            collision_counter_period: COLLISION_COUNTER_PERIODS[0],
            average_speed_samples: AVERAGE_SPEED_SAMPLES,
            left_wall_velocity_samples: LEFT_WALL_VELOCITY_SAMPLES,
            flow_rate_sample_period: FLOW_RATE_SAMPLE_PERIOD,
            flow_rate_samples: FLOW_RATE_SAMPLES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub normal_ps_per_second: f64,
    pub slow_ps_per_second: f64,
    pub max_real_dt: f64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            normal_ps_per_second: NORMAL_PS_PER_SECOND,
            slow_ps_per_second: SLOW_PS_PER_SECOND,
            max_real_dt: MAX_REAL_DT,
        }
    }
}

/// User-adjustable parameters for one diffusion species.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionSettings {
    pub count: usize,
    pub mass: f64,
    pub radius: f64,
    pub initial_temperature: f64,
}

impl Default for DiffusionSettings {
    fn default() -> Self {
        Self {
            count: 0,
            mass: 28.0,
            radius: 125.0,
            initial_temperature: INITIAL_TEMPERATURE,
        }
    }
}

impl DiffusionSettings {
    /// Copy with every field clamped into its allowed range.
    pub fn clamped(&self) -> Self {
        Self {
            count: self.count.min(DIFFUSION_MAX_COUNT),
            mass: self.mass.clamp(DIFFUSION_MASS_RANGE.0, DIFFUSION_MASS_RANGE.1),
            radius: self
                .radius
                .clamp(DIFFUSION_RADIUS_RANGE.0, DIFFUSION_RADIUS_RANGE.1),
            initial_temperature: self
                .initial_temperature
                .clamp(DIFFUSION_TEMPERATURE_RANGE.0, DIFFUSION_TEMPERATURE_RANGE.1),
        }
    }

    fn validate(&self, label: &str) -> Result<()> {
        if *self != self.clamped() {
            return Err(Error::InvalidConfig(format!(
                "{label}: diffusion settings out of range ({self:?})"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    pub width: f64,
    pub divider_thickness: f64,
    pub species1: DiffusionSettings,
    pub species2: DiffusionSettings,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            width: DIFFUSION_CONTAINER_WIDTH,
            divider_thickness: DIVIDER_THICKNESS,
            species1: DiffusionSettings {
                count: 10,
                ..DiffusionSettings::default()
            },
            species2: DiffusionSettings {
                count: 10,
                mass: 4.0,
                radius: 62.5,
                initial_temperature: INITIAL_TEMPERATURE,
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: Option<u64>,
    pub container: ContainerConfig,
    pub lid: LidConfig,
    pub collisions: CollisionConfig,
    pub gas_law: GasLawConfig,
    pub injection: InjectionConfig,
    pub statistics: StatisticsConfig,
    pub time: TimeConfig,
    pub diffusion: DiffusionConfig,
}

impl SimConfig {
    /// Explore-style configuration: the left wall does work on the gas.
    pub fn explore() -> Self {
        let mut config = Self::default();
        config.container.left_wall_does_work = true;
        config
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the model's invariants cannot hold for.
    pub fn validate(&self) -> Result<()> {
        let c = &self.container;
        positive("container.height", c.height)?;
        positive("container.depth", c.depth)?;
        positive("container.wall_speed_limit", c.wall_speed_limit)?;
        if c.wall_thickness < 0.0 {
            return invalid("container.wall_thickness must be >= 0");
        }
        positive("container.min_width", c.min_width)?;
        if !(c.min_width <= c.default_width && c.default_width <= c.max_width) {
            return invalid("container widths must satisfy min <= default <= max");
        }

        let l = &self.lid;
        if l.opening_left_inset < 0.0 || l.opening_right_inset < 0.0 {
            return invalid("lid insets must be >= 0");
        }
        if l.opening_left_inset + l.opening_right_inset >= c.min_width {
            return invalid("lid insets must leave an opening at the minimum container width");
        }
        if l.min_vent_opening_width < 0.0 {
            return invalid("lid.min_vent_opening_width must be >= 0");
        }

        positive("collisions.region_length", self.collisions.region_length)?;
        if self.collisions.model_bounds_margin < 0.0 {
            return invalid("collisions.model_bounds_margin must be >= 0");
        }

        positive("gas_law.max_temperature", self.gas_law.max_temperature)?;
        positive("gas_law.max_pressure_kpa", self.gas_law.max_pressure_kpa)?;
        if self.gas_law.heat_cool_rate < 0.0 {
            return invalid("gas_law.heat_cool_rate must be >= 0");
        }

        positive("injection.initial_temperature", self.injection.initial_temperature)?;
        if !(self.injection.cone_angle > 0.0 && self.injection.cone_angle <= std::f64::consts::PI) {
            return invalid("injection.cone_angle must be in (0, pi]");
        }

        let s = &self.statistics;
        positive("statistics.pressure_sample_window", s.pressure_sample_window)?;
        positive("statistics.gauge_refresh_period", s.gauge_refresh_period)?;
        positive("statistics.flow_rate_sample_period", s.flow_rate_sample_period)?;
        if s.gauge_noise_full_temperature >= s.gauge_noise_zero_temperature {
            return invalid("gauge noise temperatures must increase");
        }
        if !COLLISION_COUNTER_PERIODS.contains(&s.collision_counter_period) {
            return invalid("statistics.collision_counter_period must be one of 10, 20, 50, 100");
        }
        if s.average_speed_samples == 0 || s.left_wall_velocity_samples == 0 || s.flow_rate_samples == 0 {
            return invalid("statistics sample counts must be > 0");
        }

        positive("time.normal_ps_per_second", self.time.normal_ps_per_second)?;
        positive("time.slow_ps_per_second", self.time.slow_ps_per_second)?;
        positive("time.max_real_dt", self.time.max_real_dt)?;

        let d = &self.diffusion;
        if d.divider_thickness < 0.0 || d.width <= d.divider_thickness + 2.0 * DIFFUSION_RADIUS_RANGE.1 * 2.0 {
            return invalid("diffusion.width too small for its divider and particles");
        }
        d.species1.validate("diffusion.species1")?;
        d.species2.validate("diffusion.species2")?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} must be finite and > 0 (got {value})")))
    }
}

fn invalid(msg: &str) -> Result<()> {
    Err(Error::InvalidConfig(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
        SimConfig::explore().validate().unwrap();
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            seed = 42

            [container]
            default_width = 7500.0
            left_wall_does_work = true

            [gas_law]
            hold_constant = "Temperature"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed(), 42);
        assert_eq!(config.container.default_width, 7500.0);
        assert!(config.container.left_wall_does_work);
        assert_eq!(config.container.height, CONTAINER_HEIGHT);
        assert_eq!(config.gas_law.hold_constant, HoldConstant::Temperature);
        assert_eq!(config.lid, LidConfig::default());
    }

    #[test]
    fn insets_wider_than_min_width_rejected() {
        let mut config = SimConfig::default();
        config.lid.opening_left_inset = 3000.0;
        config.lid.opening_right_inset = 2500.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("insets"));
    }

    #[test]
    fn unknown_counter_period_rejected() {
        let mut config = SimConfig::default();
        config.statistics.collision_counter_period = 15.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SimConfig::from_toml_str("[container\nheight = 1").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn diffusion_settings_clamp() {
        let s = DiffusionSettings {
            count: 500,
            mass: 1.0,
            radius: 1000.0,
            initial_temperature: 5.0,
        }
        .clamped();
        assert_eq!(s.count, DIFFUSION_MAX_COUNT);
        assert_eq!(s.mass, DIFFUSION_MASS_RANGE.0);
        assert_eq!(s.radius, DIFFUSION_RADIUS_RANGE.1);
        assert_eq!(s.initial_temperature, DIFFUSION_TEMPERATURE_RANGE.0);
    }
}
