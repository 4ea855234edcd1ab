// sweep/runner.rs
// Runs sweep cases headlessly, one model per case, cases in parallel

use rayon::prelude::*;
use serde::Serialize;

use super::config::{SweepCase, SweepConfig};
use crate::error::Result;
use crate::gas_law::ideal_pressure;
use crate::profile_scope;
use crate::simulation::IdealGasModel;
use crate::species::ParticleType;
use crate::units::to_kilopascals;

/// Averages measured over one case's measurement steps.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseResult {
    pub case_id: String,
    /// pm
    pub width: f64,
    /// pm³
    pub volume: f64,
    /// Inside particles at the end of the run
    pub particles: usize,
    /// K
    pub temperature: f64,
    /// Sampled wall pressure (kPa)
    pub pressure_kpa: f64,
    /// NkT/V for the measured temperature (kPa)
    pub ideal_pressure_kpa: f64,
    /// Ratio of sampled to ideal pressure, absent for an empty container
    pub pv_over_nkt: Option<f64>,
    pub lid_on: bool,
}

pub struct SweepRunner {
    config: SweepConfig,
}

impl SweepRunner {
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run a specific case by ID
    pub fn run_case(&self, case_id: &str) -> Result<CaseResult> {
        let case = self.config.case(case_id)?;
        self.execute_case(case)
    }

    /// Run every case, in parallel. Results keep the order of the cases.
    pub fn run_all(&self) -> Result<Vec<CaseResult>> {
        tracing::info!(
            study = %self.config.study_name,
            cases = self.config.cases.len(),
            threads = rayon::current_num_threads(),
            "running sweep"
        );
        self.config
            .cases
            .par_iter()
            .map(|case| self.execute_case(case))
            .collect()
    }

    fn execute_case(&self, case: &SweepCase) -> Result<CaseResult> {
        profile_scope!("sweep_case");
        let mut config = self.config.base.clone();
        if let Some(t) = case.temperature {
            config.injection.initial_temperature = t;
        }
        let mut model = IdealGasModel::new(config)?;
        model.set_desired_width(case.width);
        model.add_particles(ParticleType::Heavy, case.heavy);
        model.add_particles(ParticleType::Light, case.light);

        let dt = self.config.dt;
        for _ in 0..self.config.warmup_steps {
            model.step_model_time(dt);
        }
        model.set_hold_constant(case.hold_constant);

        let mut pressure_sum = 0.0;
        let mut temperature_sum = 0.0;
        for _ in 0..self.config.measure_steps {
            model.step_model_time(dt);
            pressure_sum += model.pressure_kpa();
            temperature_sum += model.temperature().unwrap_or(0.0);
        }
        let samples = self.config.measure_steps as f64;
        let pressure_kpa = pressure_sum / samples;
        let temperature = temperature_sum / samples;

        let container = model.container();
        let volume = container.base.volume();
        let particles = model.total_particle_count();
        let ideal_pressure_kpa = to_kilopascals(ideal_pressure(particles, temperature, volume));
        let pv_over_nkt = (ideal_pressure_kpa > 0.0).then(|| pressure_kpa / ideal_pressure_kpa);

        tracing::info!(
            case = %case.case_id,
            width = container.base.width(),
            particles,
            temperature,
            pressure_kpa,
            ideal_pressure_kpa,
            "case complete"
        );

        Ok(CaseResult {
            case_id: case.case_id.clone(),
            width: container.base.width(),
            volume,
            particles,
            temperature,
            pressure_kpa,
            ideal_pressure_kpa,
            pv_over_nkt,
            lid_on: container.lid_on(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::gas_law::HoldConstant;

    fn quiet_series(widths: &[f64], light: usize) -> SweepConfig {
        let mut config = SweepConfig::volume_series("test", widths, 0, light);
        config.base.seed = Some(11);
        config.base.statistics.gauge_noise = false;
        config
    }

    #[test]
    fn sampled_pressure_follows_ideal_gas_law() {
        let runner = SweepRunner::new(quiet_series(&[8000.0, 12000.0], 300));
        let results = runner.run_all().unwrap();
        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.particles, 300);
            let ratio = r.pv_over_nkt.unwrap();
            assert!((ratio - 1.0).abs() < 0.25, "{}: PV/NkT = {ratio}", r.case_id);
        }
    }

    #[test]
    fn results_keep_case_order_and_widths() {
        let runner = SweepRunner::new(quiet_series(&[12000.0, 6000.0], 20));
        let results = runner.run_all().unwrap();
        assert_eq!(results[0].case_id, "V12000");
        assert_eq!(results[0].width, 12000.0);
        assert_eq!(results[1].width, 6000.0);
        assert!(results[1].volume < results[0].volume);
    }

    #[test]
    fn empty_case_has_no_ratio() {
        let runner = SweepRunner::new(quiet_series(&[10000.0], 0));
        let result = runner.run_case("V10000").unwrap();
        assert_eq!(result.pressure_kpa, 0.0);
        assert_eq!(result.pv_over_nkt, None);
    }

    #[test]
    fn held_temperature_case_stays_at_injection_temperature() {
        let mut config = quiet_series(&[10000.0], 100);
        config.cases[0].temperature = Some(500.0);
        config.cases[0].hold_constant = HoldConstant::Temperature;
        config.warmup_steps = 20;
        config.measure_steps = 20;
        let runner = SweepRunner::new(config);
        let result = runner.run_case("V10000").unwrap();
        assert!((result.temperature - 500.0).abs() < 100.0, "T = {}", result.temperature);
    }

    #[test]
    fn missing_case_reported() {
        let runner = SweepRunner::new(quiet_series(&[10000.0], 1));
        assert!(matches!(runner.run_case("nope"), Err(Error::UnknownCase(_))));
    }
}
