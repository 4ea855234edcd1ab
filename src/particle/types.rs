// particle/types.rs
// The Particle struct: a rigid disc moved in place every step.

use ultraviolet::DVec2;

use crate::species::ParticleType;
use crate::utils::Bounds2;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub species: ParticleType,
    pub position: DVec2,
    /// Position before the latest `step`, used for contact suppression and divider crossings.
    pub previous_position: DVec2,
    pub velocity: DVec2,
    radius: f64,
    mass: f64,
}

impl Particle {
    /// Mass in AMU and radius in pm must be finite and positive.
    pub fn new(species: ParticleType, mass: f64, radius: f64, position: DVec2, velocity: DVec2) -> Self {
        debug_assert!(mass.is_finite() && mass > 0.0, "invalid mass {mass}");
        debug_assert!(radius.is_finite() && radius > 0.0, "invalid radius {radius}");
        Self {
            species,
            position,
            previous_position: position,
            velocity,
            radius,
            mass,
        }
    }

    /// Create a particle using the species' default mass and radius.
    pub fn new_from_species(species: ParticleType, position: DVec2, velocity: DVec2) -> Self {
        Self::new(species, species.mass(), species.radius(), position, velocity)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Integrate one step: position += velocity * dt.
    #[inline]
    pub fn step(&mut self, dt: f64) {
        self.previous_position = self.position;
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.position.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.position.y + self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y - self.radius
    }

    pub fn set_left(&mut self, left: f64) {
        self.position.x = left + self.radius;
    }

    pub fn set_right(&mut self, right: f64) {
        self.position.x = right - self.radius;
    }

    pub fn set_top(&mut self, top: f64) {
        self.position.y = top - self.radius;
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.position.y = bottom + self.radius;
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::new(self.left(), self.bottom(), self.right(), self.top())
    }

    #[inline]
    pub fn invert_direction_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    #[inline]
    pub fn invert_direction_y(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    /// 1/2 m |v|^2
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.mag_sq()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.mag()
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    /// In contact now: center distance <= sum of radii.
    pub fn contacts_particle(&self, other: &Particle) -> bool {
        let r = self.radius + other.radius;
        (self.position - other.position).mag_sq() <= r * r
    }

    /// Were in contact before the latest step.
    pub fn contacted_particle(&self, other: &Particle) -> bool {
        let r = self.radius + other.radius;
        (self.previous_position - other.previous_position).mag_sq() <= r * r
    }

    pub fn is_inside(&self, bounds: &Bounds2) -> bool {
        bounds.contains_bounds(&self.bounds())
    }
}
