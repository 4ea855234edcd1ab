// statistics/average_speed.rs

use crate::particle::Particle;
use crate::species::ParticleType;

use super::RunningAverage;

/// Running average of mean speed for each ideal-gas species.
#[derive(Clone, Debug)]
pub struct AverageSpeed {
    heavy: RunningAverage,
    light: RunningAverage,
}

impl AverageSpeed {
    pub fn new(samples: usize) -> Self {
        Self {
            heavy: RunningAverage::new(samples),
            light: RunningAverage::new(samples),
        }
    }

    pub fn sample(&mut self, particles: &[Particle]) {
        for (species, average) in [
            (ParticleType::Heavy, &mut self.heavy),
            (ParticleType::Light, &mut self.light),
        ] {
            let (sum, n) = particles
                .iter()
                .filter(|p| p.species == species)
                .fold((0.0, 0usize), |(s, n), p| (s + p.speed(), n + 1));
            if n == 0 {
                average.clear();
            } else {
                average.push(sum / n as f64);
            }
        }
    }

    /// `None` when no particle of the species has been sampled.
    pub fn speed(&self, species: ParticleType) -> Option<f64> {
        let average = match species {
            ParticleType::Heavy => &self.heavy,
            ParticleType::Light => &self.light,
            ParticleType::Diffusion1 | ParticleType::Diffusion2 => return None,
        };
        (!average.is_empty()).then(|| average.average())
    }

    pub fn reset(&mut self) {
        self.heavy.clear();
        self.light.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultraviolet::DVec2;

    #[test]
    fn averages_per_species() {
        let ps = vec![
            Particle::new_from_species(ParticleType::Heavy, DVec2::zero(), DVec2::new(3.0, 4.0)),
            Particle::new_from_species(ParticleType::Heavy, DVec2::zero(), DVec2::new(0.0, 15.0)),
        ];
        let mut avg = AverageSpeed::new(5);
        avg.sample(&ps);
        assert_eq!(avg.speed(ParticleType::Heavy), Some(10.0));
        assert_eq!(avg.speed(ParticleType::Light), None);
    }
}
