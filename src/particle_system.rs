// particle_system.rs
// Owns the inside and outside particle populations: injection, removal,
// culling of escaped particles and thermal-energy rescaling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ultraviolet::DVec2;

use crate::config::{InjectionConfig, InjectionTemperature};
use crate::gas_law::temperature::{kinetic_energy_for_temperature, temperature_from_kinetic_energy};
use crate::particle::Particle;
use crate::species::ParticleType;
use crate::utils::{direction, sample_speed, sample_velocity, Bounds2};

pub struct ParticleSystem {
    /// Particles confined by the container.
    pub inside: Vec<Particle>,
    /// Particles that escaped through the lid; they only move until culled.
    pub outside: Vec<Particle>,
    pub injection: InjectionConfig,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(seed: u64, injection: InjectionConfig) -> Self {
        Self {
            inside: Vec::new(),
            outside: Vec::new(),
            injection,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn count(&self, species: ParticleType) -> usize {
        self.inside.iter().filter(|p| p.species == species).count()
    }

    pub fn total_count(&self) -> usize {
        self.inside.len()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.inside.iter().map(Particle::kinetic_energy).sum()
    }

    /// Temperature of the inside population, `None` when empty.
    pub fn temperature(&self) -> Option<f64> {
        temperature_from_kinetic_energy(self.total_kinetic_energy(), self.inside.len())
    }

    /// Temperature new particles are injected at.
    pub fn injection_temperature(&self) -> f64 {
        match self.injection.temperature_mode {
            InjectionTemperature::Fixed => self.injection.initial_temperature,
            InjectionTemperature::MatchExisting => self
                .temperature()
                .unwrap_or(self.injection.initial_temperature),
        }
    }

    /// Pump `count` particles of `species` in through the right wall of
    /// `interior`, respecting the per-species cap. Returns how many were added.
    pub fn inject(&mut self, species: ParticleType, count: usize, interior: &Bounds2) -> usize {
        let room = self
            .injection
            .max_particles_per_species
            .saturating_sub(self.count(species));
        let count = count.min(room);
        if count == 0 {
            return 0;
        }
        let temperature = self.injection_temperature();
        let (mass, radius) = (species.mass(), species.radius());
        let diameter = 2.0 * radius;
        let half_cone = self.injection.cone_angle / 2.0;
        let entry = DVec2::new(interior.max_x - radius, interior.min_y + interior.height() / 4.0);
        for _ in 0..count {
            let position = DVec2::new(
                entry.x - self.rng.random_range(0.0..diameter),
                entry.y + self.rng.random_range(-diameter..diameter),
            );
            let angle = std::f64::consts::PI + self.rng.random_range(-half_cone..=half_cone);
            let speed = sample_speed(&mut self.rng, mass, temperature);
            self.inside
                .push(Particle::new(species, mass, radius, position, direction(angle) * speed));
        }
        tracing::debug!(?species, count, temperature, "injected particles");
        count
    }

    /// Place `count` particles uniformly inside `region` with Gaussian velocities.
    pub fn scatter(
        &mut self,
        species: ParticleType,
        count: usize,
        mass: f64,
        radius: f64,
        region: &Bounds2,
        temperature: f64,
    ) {
        let area = region.eroded(radius);
        for _ in 0..count {
            let position = if area.width() > 0.0 && area.height() > 0.0 {
                DVec2::new(
                    self.rng.random_range(area.min_x..area.max_x),
                    self.rng.random_range(area.min_y..area.max_y),
                )
            } else {
                region.center()
            };
            let velocity = sample_velocity(&mut self.rng, mass, temperature);
            self.inside
                .push(Particle::new(species, mass, radius, position, velocity));
        }
    }

    /// Remove up to `count` of the most recently added inside particles of `species`.
    pub fn remove(&mut self, species: ParticleType, count: usize) -> usize {
        let mut removed = 0;
        let mut i = self.inside.len();
        while i > 0 && removed < count {
            i -= 1;
            if self.inside[i].species == species {
                self.inside.remove(i);
                removed += 1;
            }
        }
        removed
    }

    pub fn clear_species(&mut self, species: ParticleType) {
        self.inside.retain(|p| p.species != species);
        self.outside.retain(|p| p.species != species);
    }

    pub fn clear(&mut self) {
        self.inside.clear();
        self.outside.clear();
    }

    pub fn step(&mut self, dt: f64) {
        for p in self.inside.iter_mut().chain(self.outside.iter_mut()) {
            p.step(dt);
        }
    }

    /// Drop outside particles that no longer touch `model_bounds`.
    pub fn cull_outside(&mut self, model_bounds: &Bounds2) -> usize {
        let before = self.outside.len();
        self.outside.retain(|p| p.bounds().intersects(model_bounds));
        before - self.outside.len()
    }

    /// Both populations, for the collision detector.
    pub fn populations_mut(&mut self) -> (&mut Vec<Particle>, &mut Vec<Particle>) {
        (&mut self.inside, &mut self.outside)
    }

    /// Rescale inside velocities so the population's temperature becomes
    /// `target`. Motion relative to the center-of-mass velocity is scaled, so
    /// total momentum is unchanged; when that cannot reach the target (no
    /// relative motion, or bulk motion alone exceeds it) every velocity is
    /// scaled directly.
    pub fn scale_to_temperature(&mut self, target: f64) {
        let n = self.inside.len();
        if n == 0 {
            return;
        }
        let target_energy = kinetic_energy_for_temperature(target.max(0.0), n);
        let total_mass: f64 = self.inside.iter().map(Particle::mass).sum();
        let momentum = self
            .inside
            .iter()
            .fold(DVec2::zero(), |acc, p| acc + p.momentum());
        let mean_velocity = momentum / total_mass;
        let bulk_energy = 0.5 * total_mass * mean_velocity.mag_sq();
        let thermal_energy: f64 = self
            .inside
            .iter()
            .map(|p| 0.5 * p.mass() * (p.velocity - mean_velocity).mag_sq())
            .sum();

        let relative_floor = 1e-12 * (thermal_energy + bulk_energy);
        if thermal_energy > relative_floor && target_energy >= bulk_energy {
            let scale = ((target_energy - bulk_energy) / thermal_energy).sqrt();
            for p in &mut self.inside {
                p.velocity = mean_velocity + (p.velocity - mean_velocity) * scale;
            }
            return;
        }

        let current = thermal_energy + bulk_energy;
        if current > 0.0 {
            let scale = (target_energy / current).sqrt();
            for p in &mut self.inside {
                p.velocity *= scale;
            }
        }
    }

    /// Rescale one diffusion species' velocities to `target` without touching the others.
    pub fn scale_species_to_temperature(&mut self, species: ParticleType, target: f64) {
        let (energy, n) = self
            .inside
            .iter()
            .filter(|p| p.species == species)
            .fold((0.0, 0usize), |(e, n), p| (e + p.kinetic_energy(), n + 1));
        if n == 0 || energy <= 0.0 {
            return;
        }
        let scale = (kinetic_energy_for_temperature(target.max(0.0), n) / energy).sqrt();
        for p in self.inside.iter_mut().filter(|p| p.species == species) {
            p.velocity *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn interior() -> Bounds2 {
        Bounds2::new(-10_000.0, 0.0, 0.0, 8750.0)
    }

    fn system() -> ParticleSystem {
        ParticleSystem::new(3, InjectionConfig::default())
    }

    #[test]
    fn injection_respects_per_species_cap() {
        let mut s = system();
        s.injection.max_particles_per_species = 30;
        assert_eq!(s.inject(ParticleType::Heavy, 25, &interior()), 25);
        assert_eq!(s.inject(ParticleType::Heavy, 25, &interior()), 5);
        assert_eq!(s.inject(ParticleType::Light, 10, &interior()), 10);
        assert_eq!(s.count(ParticleType::Heavy), 30);
        assert_eq!(s.total_count(), 40);
    }

    #[test]
    fn injected_particles_enter_from_the_right_heading_left() {
        let mut s = system();
        s.inject(ParticleType::Light, 50, &interior());
        for p in &s.inside {
            assert!(p.right() <= 0.0 + 1e-9);
            assert!(p.position.x > -1000.0);
            assert!(p.velocity.x <= 0.0);
            let angle = p.velocity.y.atan2(-p.velocity.x).abs();
            assert!(angle <= std::f64::consts::FRAC_PI_4 + 1e-9);
        }
    }

    #[test]
    fn first_injection_uses_initial_temperature() {
        let mut s = system();
        s.inject(ParticleType::Heavy, 1000, &interior());
        let t = s.temperature().unwrap();
        assert!((t - 300.0).abs() < 45.0, "T = {t}");
    }

    #[test]
    fn match_existing_follows_current_temperature() {
        let mut s = system();
        s.inject(ParticleType::Heavy, 200, &interior());
        s.scale_to_temperature(900.0);
        assert_relative_eq!(s.injection_temperature(), 900.0, max_relative = 1e-9);
        s.injection.temperature_mode = InjectionTemperature::Fixed;
        assert_eq!(s.injection_temperature(), 300.0);
    }

    #[test]
    fn remove_takes_latest_of_species() {
        let mut s = system();
        s.inject(ParticleType::Heavy, 3, &interior());
        s.inject(ParticleType::Light, 2, &interior());
        assert_eq!(s.remove(ParticleType::Heavy, 5), 3);
        assert_eq!(s.count(ParticleType::Heavy), 0);
        assert_eq!(s.count(ParticleType::Light), 2);
    }

    #[test]
    fn cull_drops_far_outside_particles() {
        let mut s = system();
        s.outside.push(Particle::new_from_species(
            ParticleType::Heavy,
            DVec2::new(0.0, 50_000.0),
            DVec2::zero(),
        ));
        s.outside.push(Particle::new_from_species(
            ParticleType::Heavy,
            DVec2::new(-100.0, 9000.0),
            DVec2::zero(),
        ));
        assert_eq!(s.cull_outside(&interior().dilated(5000.0)), 1);
        assert_eq!(s.outside.len(), 1);
    }

    #[test]
    fn rescaling_preserves_momentum() {
        let mut s = system();
        s.inject(ParticleType::Heavy, 40, &interior());
        s.inject(ParticleType::Light, 40, &interior());
        let momentum = s.inside.iter().fold(DVec2::zero(), |a, p| a + p.momentum());
        s.scale_to_temperature(1200.0);
        let after = s.inside.iter().fold(DVec2::zero(), |a, p| a + p.momentum());
        assert_relative_eq!(s.temperature().unwrap(), 1200.0, max_relative = 1e-9);
        assert_relative_eq!(after.x, momentum.x, epsilon = 1e-6);
        assert_relative_eq!(after.y, momentum.y, epsilon = 1e-6);
    }

    #[test]
    fn single_particle_scales_directly() {
        let mut s = system();
        s.inject(ParticleType::Light, 1, &interior());
        s.scale_to_temperature(50.0);
        assert_relative_eq!(s.temperature().unwrap(), 50.0, max_relative = 1e-9);
    }

    #[test]
    fn scatter_places_particles_inside_region() {
        let mut s = system();
        let region = Bounds2::new(-16_000.0, 0.0, -8037.5, 8750.0);
        s.scatter(ParticleType::Diffusion1, 100, 20.0, 200.0, &region, 500.0);
        assert_eq!(s.count(ParticleType::Diffusion1), 100);
        assert!(s.inside.iter().all(|p| p.is_inside(&region)));
        assert!(s.inside.iter().all(|p| p.mass() == 20.0 && p.radius() == 200.0));
    }
}
