// statistics/diffusion_data.rs
// Per-side composition and per-species center of mass for the diffusion container.

use serde::Serialize;

use crate::gas_law::temperature::temperature_from_kinetic_energy;
use crate::particle::Particle;
use crate::species::ParticleType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SideData {
    /// Indexed like `ParticleType::DIFFUSION`.
    pub counts: [usize; 2],
    /// `None` when the side is empty.
    pub average_temperature: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffusionData {
    pub left: SideData,
    pub right: SideData,
    /// x of each species' center of mass, `None` when the species is absent.
    pub center_of_mass_x: [Option<f64>; 2],
}

impl DiffusionData {
    pub fn compute(particles: &[Particle], divider_x: f64) -> Self {
        let mut sides = [(SideData::default(), 0.0_f64), (SideData::default(), 0.0_f64)];
        let mut mass_moment = [(0.0_f64, 0.0_f64); 2];
        for p in particles {
            let Some(k) = p.species.diffusion_index() else { continue };
            let side = if p.position.x < divider_x { 0 } else { 1 };
            sides[side].0.counts[k] += 1;
            sides[side].1 += p.kinetic_energy();
            mass_moment[k].0 += p.mass() * p.position.x;
            mass_moment[k].1 += p.mass();
        }
        for (side, energy) in sides.iter_mut() {
            let n = side.counts.iter().sum();
            side.average_temperature = temperature_from_kinetic_energy(*energy, n);
        }
        let center = |(moment, mass): (f64, f64)| (mass > 0.0).then(|| moment / mass);
        Self {
            left: sides[0].0,
            right: sides[1].0,
            center_of_mass_x: [center(mass_moment[0]), center(mass_moment[1])],
        }
    }

    pub fn count(&self, species: ParticleType) -> (usize, usize) {
        match species.diffusion_index() {
            Some(k) => (self.left.counts[k], self.right.counts[k]),
            None => (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultraviolet::DVec2;

    #[test]
    fn splits_by_divider() {
        let ps = vec![
            Particle::new(ParticleType::Diffusion1, 10.0, 100.0, DVec2::new(-300.0, 0.0), DVec2::new(1.0, 0.0)),
            Particle::new(ParticleType::Diffusion1, 10.0, 100.0, DVec2::new(-100.0, 0.0), DVec2::new(1.0, 0.0)),
            Particle::new(ParticleType::Diffusion2, 4.0, 50.0, DVec2::new(200.0, 0.0), DVec2::zero()),
        ];
        let data = DiffusionData::compute(&ps, 0.0);
        assert_eq!(data.count(ParticleType::Diffusion1), (2, 0));
        assert_eq!(data.count(ParticleType::Diffusion2), (0, 1));
        assert_eq!(data.center_of_mass_x, [Some(-200.0), Some(200.0)]);
        assert!(data.left.average_temperature.unwrap() > 0.0);
        assert_eq!(data.right.average_temperature, Some(0.0));
    }

    #[test]
    fn empty_container_has_no_data() {
        let data = DiffusionData::compute(&[], 0.0);
        assert_eq!(data.left.average_temperature, None);
        assert_eq!(data.center_of_mass_x, [None, None]);
    }
}
