// utils.rs
// Axis-aligned bounds and velocity sampling shared by containers, regions and the particle system.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use ultraviolet::DVec2;

use crate::units::BOLTZMANN;

/// Axis-aligned rectangle, y increasing upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2 {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Closed intersection: touching edges count.
    pub fn intersects(&self, other: &Bounds2) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn contains_bounds(&self, other: &Bounds2) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Grown by `margin` on every side.
    pub fn dilated(&self, margin: f64) -> Bounds2 {
        Bounds2::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Shrunk by `margin` on every side.
    pub fn eroded(&self, margin: f64) -> Bounds2 {
        self.dilated(-margin)
    }
}

/// Speed drawn so that <v²> = 3kT/m: two Gaussian components each with
/// variance 3kT/(2m). Matches the T = (2/3)·KE/k convention.
pub fn sample_speed<R: Rng + ?Sized>(rng: &mut R, mass: f64, temperature: f64) -> f64 {
    sample_velocity(rng, mass, temperature).mag()
}

/// Velocity vector with Maxwell-Boltzmann-consistent Gaussian components.
pub fn sample_velocity<R: Rng + ?Sized>(rng: &mut R, mass: f64, temperature: f64) -> DVec2 {
    if temperature <= 0.0 || mass <= 0.0 {
        return DVec2::zero();
    }
    let sigma = (1.5 * BOLTZMANN * temperature / mass).sqrt();
    let vx: f64 = StandardNormal.sample(rng);
    let vy: f64 = StandardNormal.sample(rng);
    DVec2::new(vx * sigma, vy * sigma)
}

/// Unit vector at `angle` radians from +x.
pub fn direction(angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn closed_intersection_counts_touching_edges() {
        let a = Bounds2::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds2::new(10.0, 0.0, 20.0, 10.0);
        let c = Bounds2::new(10.5, 0.0, 20.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn sampled_velocities_match_equipartition() {
        let mut rng = StdRng::seed_from_u64(7);
        let mass = 28.0;
        let temperature = 300.0;
        let n = 20_000;
        let mean_ke: f64 = (0..n)
            .map(|_| 0.5 * mass * sample_velocity(&mut rng, mass, temperature).mag_sq())
            .sum::<f64>()
            / n as f64;
        let t = (2.0 / 3.0) * mean_ke / BOLTZMANN;
        assert!((t - temperature).abs() / temperature < 0.03, "T = {}", t);
    }

    #[test]
    fn zero_temperature_gives_rest() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_velocity(&mut rng, 4.0, 0.0), DVec2::zero());
    }
}
