// simulation/diffusion.rs
// DiffusionModel: two user-configured species start on opposite sides of a
// removable divider and mix once it is lifted.

use crate::collision::CollisionDetector;
use crate::config::{DiffusionSettings, SimConfig};
use crate::container::DiffusionContainer;
use crate::error::Result;
use crate::particle_system::ParticleSystem;
use crate::profile_scope;
use crate::species::ParticleType;
use crate::statistics::{DiffusionData, ParticleFlowRate};
use crate::time::{TimeSpeed, TimeTransform};

pub struct DiffusionModel {
    pub config: SimConfig,
    pub container: DiffusionContainer,
    pub particles: ParticleSystem,
    detector: CollisionDetector,
    /// Indexed like `ParticleType::DIFFUSION`.
    settings: [DiffusionSettings; 2],
    flow_rates: [ParticleFlowRate; 2],
    data: DiffusionData,
    time: TimeTransform,
    playing: bool,
    model_time: f64,
}

impl DiffusionModel {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let container = DiffusionContainer::new(&config.container, &config.diffusion);
        let detector = CollisionDetector::new(
            container.base.max_bounds(),
            config.collisions.region_length,
            config.collisions.particle_particle_collisions,
        );
        let stats = &config.statistics;
        let flow_rate = |species| ParticleFlowRate::new(species, stats.flow_rate_sample_period, stats.flow_rate_samples);
        let mut model = Self {
            container,
            particles: ParticleSystem::new(config.seed(), config.injection.clone()),
            detector,
            settings: [config.diffusion.species1, config.diffusion.species2],
            flow_rates: [flow_rate(ParticleType::Diffusion1), flow_rate(ParticleType::Diffusion2)],
            data: DiffusionData::default(),
            time: TimeTransform::new(&config.time),
            playing: true,
            model_time: 0.0,
            config,
        };
        for species in ParticleType::DIFFUSION {
            model.seed_species(species);
        }
        model.update_data();
        model
    }

    pub fn reset(&mut self) {
        *self = Self::build(self.config.clone());
        tracing::info!("diffusion model reset");
    }

    /// Replace one species' particles according to its settings. Species 1
    /// starts left of the divider, species 2 right of it.
    fn seed_species(&mut self, species: ParticleType) {
        let Some(k) = species.diffusion_index() else { return };
        let s = self.settings[k];
        let side = if k == 0 {
            self.container.left_bounds()
        } else {
            self.container.right_bounds()
        };
        self.particles.clear_species(species);
        self.particles
            .scatter(species, s.count, s.mass, s.radius, &side, s.initial_temperature);
    }

    fn update_data(&mut self) {
        self.data = DiffusionData::compute(&self.particles.inside, self.container.divider_x());
    }

    pub fn step(&mut self, real_dt: f64) {
        if !self.playing {
            return;
        }
        let dt = self.time.model_dt(real_dt);
        self.step_model_time(dt);
    }

    pub fn step_model_time(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        profile_scope!("diffusion_step");
        self.particles.step(dt);
        let (inside, outside) = self.particles.populations_mut();
        self.detector.step(&self.container, inside, outside);
        let divider_x = self.container.divider_x();
        for flow in &mut self.flow_rates {
            flow.step(dt, divider_x, &self.particles.inside);
        }
        self.update_data();
        self.model_time += dt;
    }

    pub fn has_divider(&self) -> bool {
        self.container.has_divider()
    }

    pub fn set_divider(&mut self, present: bool) {
        if present != self.container.has_divider() {
            tracing::info!(present, "divider changed");
        }
        self.container.set_divider(present);
    }

    pub fn settings(&self, species: ParticleType) -> Option<DiffusionSettings> {
        species.diffusion_index().map(|k| self.settings[k])
    }

    /// Change a species' settings, clamped into range, and re-seed it.
    /// Only allowed while the divider is in place; returns false otherwise.
    pub fn set_settings(&mut self, species: ParticleType, settings: DiffusionSettings) -> bool {
        let Some(k) = species.diffusion_index() else {
            return false;
        };
        if !self.container.has_divider() {
            tracing::debug!(?species, "settings are locked while the divider is removed");
            return false;
        }
        self.settings[k] = settings.clamped();
        self.seed_species(species);
        self.flow_rates[k].reset();
        self.update_data();
        true
    }

    pub fn flow_rate(&self, species: ParticleType) -> Option<&ParticleFlowRate> {
        species.diffusion_index().map(|k| &self.flow_rates[k])
    }

    pub fn data(&self) -> &DiffusionData {
        &self.data
    }

    pub fn particle_count(&self, species: ParticleType) -> usize {
        self.particles.count(species)
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.total_kinetic_energy()
    }

    pub fn number_of_particle_particle_collisions(&self) -> usize {
        self.detector.number_of_particle_particle_collisions()
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_time_speed(&mut self, speed: TimeSpeed) {
        self.time.speed = speed;
    }

    pub fn set_particle_particle_collisions(&mut self, enabled: bool) {
        self.detector.particle_particle_collisions = enabled;
    }

    pub fn model_time(&self) -> f64 {
        self.model_time
    }
}
