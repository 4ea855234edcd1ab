// collision/particle_particle.rs
// Elastic response for one overlapping pair of discs.

use ultraviolet::DVec2;

use crate::error::{Error, Result};
use crate::particle::Particle;

/// Centers closer than this have no usable collision normal (pm).
const MIN_CENTER_DISTANCE: f64 = 1e-9;

/// Coefficient of restitution; collisions are perfectly elastic.
const RESTITUTION: f64 = 1.0;

/// Borrow two distinct elements mutably.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i != j);
    if i < j {
        let (a, b) = particles.split_at_mut(j);
        (&mut a[i], &mut b[0])
    } else {
        let (a, b) = particles.split_at_mut(i);
        (&mut b[0], &mut a[j])
    }
}

/// Resolve an overlap between `particles[i]` and `particles[j]`.
///
/// Returns `Ok(true)` when an impulse was exchanged, `Ok(false)` when the
/// pair was already separating. Neither particle is modified on error.
pub fn resolve_pair(particles: &mut [Particle], i: usize, j: usize) -> Result<bool> {
    let (p1, p2) = pair_mut(particles, i, j);

    let offset = p1.position - p2.position;
    let distance = offset.mag();
    if !(distance >= MIN_CENTER_DISTANCE) {
        return Err(Error::CoincidentCenters { first: i, second: j });
    }
    let inverse_mass_sum = 1.0 / p1.mass() + 1.0 / p2.mass();
    if !(inverse_mass_sum.is_finite() && inverse_mass_sum > 0.0) {
        return Err(Error::DegenerateMass { first: i, second: j });
    }

    // normal points from p2 toward p1
    let normal = offset / distance;
    let relative_speed = (p1.velocity - p2.velocity).dot(normal);
    if relative_speed >= 0.0 {
        return Ok(false);
    }

    let contact = p1.position - normal * p1.radius();
    reflect_past_contact(p1, contact, normal);
    reflect_past_contact(p2, contact, -normal);

    let impulse = -relative_speed * (1.0 + RESTITUTION) / inverse_mass_sum;
    p1.velocity += normal * (impulse / p1.mass());
    p2.velocity -= normal * (impulse / p2.mass());
    Ok(true)
}

/// Reflect the particle's center back across the plane it would have touched
/// the contact point through, when it has moved past that plane.
/// `away` is the unit direction pointing from the other particle toward this one.
fn reflect_past_contact(particle: &mut Particle, contact: DVec2, away: DVec2) {
    let back = particle.previous_position - contact;
    let back_length = back.mag();
    if back_length < MIN_CENTER_DISTANCE {
        return;
    }
    // center at the moment of touching, along the line back to the previous position
    let touch = contact + back * (particle.radius() / back_length);
    let depth = (particle.position - touch).dot(away);
    if depth < 0.0 {
        particle.position -= away * (2.0 * depth);
    }
}
