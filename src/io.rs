// io.rs
// Serializable snapshots of model observables, written as JSON lines.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gas_law::HoldConstant;
use crate::profile_scope;
use crate::simulation::{DiffusionModel, IdealGasModel};
use crate::species::ParticleType;
use crate::statistics::DiffusionData;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// ps
    pub time: f64,
    pub heavy: usize,
    pub light: usize,
    pub outside: usize,
    /// K, absent for an empty container
    pub temperature: Option<f64>,
    pub pressure_kpa: f64,
    pub gauge_kpa: f64,
    /// pm
    pub width: f64,
    /// pm³
    pub volume: f64,
    pub lid_on: bool,
    pub opening_width: f64,
    pub hold_constant: HoldConstant,
    pub total_kinetic_energy: f64,
    pub wall_collisions: usize,
    pub particle_collisions: usize,
    pub left_wall_average_velocity: f64,
    #[serde(default)]
    pub average_speed_heavy: Option<f64>,
    #[serde(default)]
    pub average_speed_light: Option<f64>,
}

impl Snapshot {
    pub fn capture(model: &IdealGasModel) -> Self {
        let container = model.container();
        Self {
            time: model.model_time(),
            heavy: model.particle_count(ParticleType::Heavy),
            light: model.particle_count(ParticleType::Light),
            outside: model.particles.outside.len(),
            temperature: model.temperature(),
            pressure_kpa: model.pressure_kpa(),
            gauge_kpa: model.gauge().pressure_kpa(),
            width: container.base.width(),
            volume: container.base.volume(),
            lid_on: container.lid_on(),
            opening_width: container.opening_width(),
            hold_constant: model.hold_constant(),
            total_kinetic_energy: model.total_kinetic_energy(),
            wall_collisions: model.number_of_particle_container_collisions(),
            particle_collisions: model.number_of_particle_particle_collisions(),
            left_wall_average_velocity: model.left_wall_average_velocity(),
            average_speed_heavy: model.average_speed(ParticleType::Heavy),
            average_speed_light: model.average_speed(ParticleType::Light),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffusionSnapshot {
    pub time: f64,
    pub has_divider: bool,
    pub data: DiffusionData,
    /// (left to right, right to left) particles/ps per species
    pub flow_rates: [(f64, f64); 2],
}

impl DiffusionSnapshot {
    pub fn capture(model: &DiffusionModel) -> Self {
        let flow = |species| {
            model
                .flow_rate(species)
                .map(|f| (f.left_to_right(), f.right_to_left()))
                .unwrap_or_default()
        };
        Self {
            time: model.model_time(),
            has_divider: model.has_divider(),
            data: model.data().clone(),
            flow_rates: [flow(ParticleType::Diffusion1), flow(ParticleType::Diffusion2)],
        }
    }
}

/// Write `value` as one line of JSON.
pub fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    profile_scope!("write_json_line");
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn snapshot_lines_parse_back() {
        let mut model = IdealGasModel::new(SimConfig::default()).unwrap();
        model.add_particles(ParticleType::Light, 20);
        model.step_model_time(0.1);
        let snapshot = Snapshot::capture(&model);
        let mut out = Vec::new();
        write_json_line(&mut out, &snapshot).unwrap();
        write_json_line(&mut out, &snapshot).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: Snapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.light, 20);
        assert_eq!(parsed.hold_constant, HoldConstant::Nothing);
    }

    #[test]
    fn empty_model_has_null_temperature() {
        let model = IdealGasModel::new(SimConfig::default()).unwrap();
        let json = serde_json::to_string(&Snapshot::capture(&model)).unwrap();
        assert!(json.contains("\"temperature\":null"));
    }

    #[test]
    fn diffusion_snapshot_serializes() {
        let model = DiffusionModel::new(SimConfig::default()).unwrap();
        let snapshot = DiffusionSnapshot::capture(&model);
        assert!(snapshot.has_divider);
        assert_eq!(snapshot.data.count(ParticleType::Diffusion1), (10, 0));
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("flow_rates"));
    }
}
