// particle/tests.rs
// Kinematics and contact tests for Particle

use super::Particle;
use crate::species::ParticleType;
use ultraviolet::DVec2;

fn heavy_at(x: f64, y: f64) -> Particle {
    Particle::new_from_species(ParticleType::Heavy, DVec2::new(x, y), DVec2::zero())
}

#[test]
fn step_saves_previous_position() {
    let mut p = Particle::new_from_species(
        ParticleType::Light,
        DVec2::new(100.0, 200.0),
        DVec2::new(10.0, -5.0),
    );
    p.step(2.0);
    assert_eq!(p.previous_position, DVec2::new(100.0, 200.0));
    assert_eq!(p.position, DVec2::new(120.0, 190.0));
}

#[test]
fn step_zero_is_a_no_op() {
    let mut p = Particle::new_from_species(
        ParticleType::Heavy,
        DVec2::new(-300.0, 50.0),
        DVec2::new(400.0, 90.0),
    );
    let before = p.clone();
    p.step(0.0);
    assert_eq!(p.position, before.position);
    assert_eq!(p.velocity, before.velocity);
}

#[test]
fn geometry_follows_radius() {
    let mut p = heavy_at(0.0, 0.0);
    assert_eq!(p.left(), -125.0);
    assert_eq!(p.right(), 125.0);
    assert_eq!(p.top(), 125.0);
    assert_eq!(p.bottom(), -125.0);

    p.set_right(1000.0);
    assert_eq!(p.position.x, 875.0);
    p.set_bottom(0.0);
    assert_eq!(p.position.y, 125.0);
    let b = p.bounds();
    assert_eq!(b.max_x, 1000.0);
    assert_eq!(b.min_y, 0.0);
}

#[test]
fn invert_direction_flips_one_axis() {
    let mut p = Particle::new_from_species(
        ParticleType::Light,
        DVec2::zero(),
        DVec2::new(3.0, 4.0),
    );
    p.invert_direction_x();
    assert_eq!(p.velocity, DVec2::new(-3.0, 4.0));
    p.invert_direction_y();
    assert_eq!(p.velocity, DVec2::new(-3.0, -4.0));
    assert!((p.kinetic_energy() - 0.5 * 4.0 * 25.0).abs() < 1e-12);
}

#[test]
fn contact_uses_sum_of_radii() {
    let a = heavy_at(0.0, 0.0);
    let touching = heavy_at(250.0, 0.0);
    let apart = heavy_at(250.1, 0.0);
    assert!(a.contacts_particle(&touching));
    assert!(!a.contacts_particle(&apart));
}

#[test]
fn contacted_uses_previous_positions() {
    let mut a = heavy_at(0.0, 0.0);
    let mut b = heavy_at(200.0, 0.0);
    a.velocity = DVec2::new(-100.0, 0.0);
    b.velocity = DVec2::new(100.0, 0.0);
    a.step(1.0);
    b.step(1.0);
    assert!(a.contacted_particle(&b));
    assert!(!a.contacts_particle(&b));
}
