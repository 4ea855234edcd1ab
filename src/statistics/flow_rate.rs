// statistics/flow_rate.rs
// Particles crossing the divider line, per species and direction.

use crate::particle::Particle;
use crate::species::ParticleType;

use super::RunningAverage;

/// Flow of one species across a vertical line, in particles/ps.
#[derive(Clone, Debug)]
pub struct ParticleFlowRate {
    pub species: ParticleType,
    sample_period: f64,
    elapsed: f64,
    left_to_right_count: usize,
    right_to_left_count: usize,
    left_to_right: RunningAverage,
    right_to_left: RunningAverage,
}

impl ParticleFlowRate {
    pub fn new(species: ParticleType, sample_period: f64, samples: usize) -> Self {
        Self {
            species,
            sample_period,
            elapsed: 0.0,
            left_to_right_count: 0,
            right_to_left_count: 0,
            left_to_right: RunningAverage::new(samples),
            right_to_left: RunningAverage::new(samples),
        }
    }

    /// Count crossings of `divider_x` made by the latest particle step.
    pub fn step(&mut self, dt: f64, divider_x: f64, particles: &[Particle]) {
        for p in particles.iter().filter(|p| p.species == self.species) {
            let was_left = p.previous_position.x < divider_x;
            let is_left = p.position.x < divider_x;
            match (was_left, is_left) {
                (true, false) => self.left_to_right_count += 1,
                (false, true) => self.right_to_left_count += 1,
                _ => {}
            }
        }
        self.elapsed += dt;
        if self.elapsed >= self.sample_period {
            let period = self.elapsed;
            self.left_to_right.push(self.left_to_right_count as f64 / period);
            self.right_to_left.push(self.right_to_left_count as f64 / period);
            self.left_to_right_count = 0;
            self.right_to_left_count = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn left_to_right(&self) -> f64 {
        self.left_to_right.average()
    }

    pub fn right_to_left(&self) -> f64 {
        self.right_to_left.average()
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.left_to_right_count = 0;
        self.right_to_left_count = 0;
        self.left_to_right.clear();
        self.right_to_left.clear();
    }
}
