// collision/walls.rs
// Particle-container response: clamp inside the boundary and reflect the
// outgoing velocity component, x then y.

use crate::particle::Particle;
use crate::utils::Bounds2;

/// Boundary seen by one particle during one step.
#[derive(Clone, Copy, Debug)]
pub struct WallContact {
    pub bounds: Bounds2,
    /// x-velocity of the left wall (pm/ps).
    pub left_wall_velocity: f64,
    pub left_wall_does_work: bool,
    /// x-span of the top opening; no top wall inside it.
    pub opening: Option<(f64, f64)>,
}

/// Returns the momentum transferred to the walls (AMU·pm/ps), or `None`
/// when no velocity component changed.
pub fn collide_with_walls(particle: &mut Particle, contact: &WallContact) -> Option<f64> {
    let before = particle.velocity;
    let b = &contact.bounds;

    if particle.left() < b.min_x {
        particle.set_left(b.min_x);
        let u = contact.left_wall_velocity;
        if contact.left_wall_does_work && u != 0.0 {
            // reflect in the frame of the moving wall
            if particle.velocity.x < u {
                particle.velocity.x = 2.0 * u - particle.velocity.x;
            }
        } else if particle.velocity.x < 0.0 {
            particle.invert_direction_x();
        }
    } else if particle.right() > b.max_x {
        particle.set_right(b.max_x);
        if particle.velocity.x > 0.0 {
            particle.invert_direction_x();
        }
    }

    // Already above the interior top last step: the particle is inside the
    // opening, bounded sideways by the opening's edges instead of the top.
    let in_opening = match contact.opening {
        Some((l, r))
            if particle.previous_position.y + particle.radius() > b.max_y
                && r - l >= 2.0 * particle.radius() =>
        {
            if particle.left() < l {
                particle.set_left(l);
                if particle.velocity.x < 0.0 {
                    particle.invert_direction_x();
                }
            } else if particle.right() > r {
                particle.set_right(r);
                if particle.velocity.x > 0.0 {
                    particle.invert_direction_x();
                }
            }
            true
        }
        Some((l, r)) => particle.left() > l && particle.right() < r,
        None => false,
    };

    if particle.bottom() < b.min_y {
        particle.set_bottom(b.min_y);
        if particle.velocity.y < 0.0 {
            particle.invert_direction_y();
        }
    } else if particle.top() > b.max_y && !in_opening {
        particle.set_top(b.max_y);
        if particle.velocity.y > 0.0 {
            particle.invert_direction_y();
        }
    }

    let change = particle.velocity - before;
    if change.x == 0.0 && change.y == 0.0 {
        None
    } else {
        Some(particle.mass() * change.mag())
    }
}
