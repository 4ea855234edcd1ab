// sweep/config.rs
// Sweep definitions loaded from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::gas_law::HoldConstant;

// ====================
// Sweep Defaults
// ====================
pub const DEFAULT_SWEEP_DT: f64 = 0.05; // ps
pub const DEFAULT_WARMUP_STEPS: usize = 200;
pub const DEFAULT_MEASURE_STEPS: usize = 400;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Name of the study, used for output file names
    pub study_name: String,

    /// Base model configuration shared by every case
    #[serde(default)]
    pub base: SimConfig,

    /// Model time step (ps)
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Steps run before measuring, so the injected gas can spread
    #[serde(default = "default_warmup_steps")]
    pub warmup_steps: usize,

    /// Steps averaged into each result
    #[serde(default = "default_measure_steps")]
    pub measure_steps: usize,

    pub cases: Vec<SweepCase>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepCase {
    /// Unique case ID
    pub case_id: String,

    /// Container width (pm), clamped into the configured range
    pub width: f64,

    #[serde(default)]
    pub heavy: usize,

    #[serde(default)]
    pub light: usize,

    /// Injection temperature (K); the base configuration's when absent
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Mode selected once the warmup is over
    #[serde(default)]
    pub hold_constant: HoldConstant,
}

fn default_dt() -> f64 {
    DEFAULT_SWEEP_DT
}

fn default_warmup_steps() -> usize {
    DEFAULT_WARMUP_STEPS
}

fn default_measure_steps() -> usize {
    DEFAULT_MEASURE_STEPS
}

impl SweepConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SweepConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(Error::InvalidConfig("sweep dt must be > 0".to_string()));
        }
        if self.measure_steps == 0 {
            return Err(Error::InvalidConfig("sweep measure_steps must be > 0".to_string()));
        }
        for (i, case) in self.cases.iter().enumerate() {
            if self.cases[..i].iter().any(|c| c.case_id == case.case_id) {
                return Err(Error::InvalidConfig(format!("duplicate sweep case: {}", case.case_id)));
            }
            if let Some(t) = case.temperature {
                if !(t > 0.0 && t.is_finite()) {
                    return Err(Error::InvalidConfig(format!(
                        "case {}: temperature must be > 0",
                        case.case_id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn case(&self, case_id: &str) -> Result<&SweepCase> {
        self.cases
            .iter()
            .find(|c| c.case_id == case_id)
            .ok_or_else(|| Error::UnknownCase(case_id.to_string()))
    }

    /// Cases at `widths` sharing one particle load, named `V<width>`.
    pub fn volume_series(study_name: &str, widths: &[f64], heavy: usize, light: usize) -> Self {
        let cases = widths
            .iter()
            .map(|&width| SweepCase {
                case_id: format!("V{:.0}", width),
                width,
                heavy,
                light,
                temperature: None,
                hold_constant: HoldConstant::Nothing,
            })
            .collect();
        Self {
            study_name: study_name.to_string(),
            base: SimConfig::default(),
            dt: DEFAULT_SWEEP_DT,
            warmup_steps: DEFAULT_WARMUP_STEPS,
            measure_steps: DEFAULT_MEASURE_STEPS,
            cases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDY: &str = r#"
study_name = "boyle"
measure_steps = 50

[base.statistics]
gauge_noise = false

[[cases]]
case_id = "wide"
width = 14000.0
light = 100

[[cases]]
case_id = "narrow"
width = 7000.0
light = 100
temperature = 400.0
hold_constant = "Temperature"
"#;

    #[test]
    fn parses_study_with_defaults() {
        let config = SweepConfig::from_toml_str(STUDY).unwrap();
        assert_eq!(config.study_name, "boyle");
        assert_eq!(config.dt, DEFAULT_SWEEP_DT);
        assert_eq!(config.warmup_steps, DEFAULT_WARMUP_STEPS);
        assert_eq!(config.measure_steps, 50);
        assert!(!config.base.statistics.gauge_noise);
        assert_eq!(config.cases.len(), 2);
        let narrow = config.case("narrow").unwrap();
        assert_eq!(narrow.temperature, Some(400.0));
        assert_eq!(narrow.hold_constant, HoldConstant::Temperature);
        assert_eq!(config.case("wide").unwrap().heavy, 0);
    }

    #[test]
    fn unknown_case_is_an_error() {
        let config = SweepConfig::from_toml_str(STUDY).unwrap();
        assert!(matches!(config.case("missing"), Err(Error::UnknownCase(id)) if id == "missing"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut config = SweepConfig::volume_series("dup", &[8000.0, 9000.0], 10, 0);
        config.cases[1].case_id = config.cases[0].case_id.clone();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn volume_series_names_cases_by_width() {
        let config = SweepConfig::volume_series("s", &[6000.0, 12000.0], 0, 50);
        let ids: Vec<_> = config.cases.iter().map(|c| c.case_id.as_str()).collect();
        assert_eq!(ids, ["V6000", "V12000"]);
    }
}
