// collision/mod.rs
// Per-step collision pipeline: escape, region assignment, particle-particle
// and particle-container collisions.

pub mod particle_particle;
pub mod walls;


pub use particle_particle::resolve_pair;
pub use walls::{collide_with_walls, WallContact};

use crate::container::{DiffusionContainer, IdealGasLawContainer};
use crate::error::Error;
use crate::particle::Particle;
use crate::profile_scope;
use crate::region::RegionGrid;
use crate::utils::Bounds2;

/// What the detector needs to know about a container.
pub trait ContainerWalls {
    /// Boundary the particle is confined to this step.
    fn collision_bounds(&self, particle: &Particle) -> Bounds2;
    fn left_wall_velocity(&self) -> f64;
    fn left_wall_does_work(&self) -> bool;
    /// x-span of the top opening, `None` when closed.
    fn opening(&self) -> Option<(f64, f64)>;
    /// Top of the container including its wall.
    fn outer_top(&self) -> f64;
    fn max_bounds(&self) -> Bounds2;
}

impl ContainerWalls for IdealGasLawContainer {
    fn collision_bounds(&self, _particle: &Particle) -> Bounds2 {
        self.base.bounds()
    }

    fn left_wall_velocity(&self) -> f64 {
        self.base.left_wall_velocity()
    }

    fn left_wall_does_work(&self) -> bool {
        self.base.left_wall_does_work
    }

    fn opening(&self) -> Option<(f64, f64)> {
        self.is_open()
            .then(|| (self.opening_left(), self.opening_right()))
    }

    fn outer_top(&self) -> f64 {
        self.base.outer_top()
    }

    fn max_bounds(&self) -> Bounds2 {
        self.base.max_bounds()
    }
}

impl ContainerWalls for DiffusionContainer {
    /// Side comes from the previous position, so a particle is never assigned
    /// to the far side by a step that carried it into the divider.
    fn collision_bounds(&self, particle: &Particle) -> Bounds2 {
        self.bounds_for(particle.previous_position.x)
    }

    fn left_wall_velocity(&self) -> f64 {
        0.0
    }

    fn left_wall_does_work(&self) -> bool {
        false
    }

    fn opening(&self) -> Option<(f64, f64)> {
        None
    }

    fn outer_top(&self) -> f64 {
        self.base.outer_top()
    }

    fn max_bounds(&self) -> Bounds2 {
        self.base.max_bounds()
    }
}

pub struct CollisionDetector {
    grid: RegionGrid,
    pub particle_particle_collisions: bool,
    number_of_particle_particle_collisions: usize,
    number_of_particle_container_collisions: usize,
    /// Momentum delivered to the walls during the latest step.
    wall_impulse: f64,
    /// Pairs skipped this step because they had no valid collision normal or mass.
    degenerate_pairs: usize,
}

impl CollisionDetector {
    pub fn new(max_bounds: Bounds2, region_length: f64, particle_particle_collisions: bool) -> Self {
        Self {
            grid: RegionGrid::new(max_bounds, region_length),
            particle_particle_collisions,
            number_of_particle_particle_collisions: 0,
            number_of_particle_container_collisions: 0,
            wall_impulse: 0.0,
            degenerate_pairs: 0,
        }
    }

    pub fn grid(&self) -> &RegionGrid {
        &self.grid
    }

    pub fn number_of_particle_particle_collisions(&self) -> usize {
        self.number_of_particle_particle_collisions
    }

    pub fn number_of_particle_container_collisions(&self) -> usize {
        self.number_of_particle_container_collisions
    }

    pub fn wall_impulse(&self) -> f64 {
        self.wall_impulse
    }

    pub fn degenerate_pairs(&self) -> usize {
        self.degenerate_pairs
    }

    /// Run one pass of the pipeline. Escaped particles are moved from `inside`
    /// to `outside`; returns how many escaped.
    pub fn step<W: ContainerWalls>(
        &mut self,
        walls: &W,
        inside: &mut Vec<Particle>,
        outside: &mut Vec<Particle>,
    ) -> usize {
        profile_scope!("collision_step");
        self.number_of_particle_particle_collisions = 0;
        self.number_of_particle_container_collisions = 0;
        self.wall_impulse = 0.0;
        self.degenerate_pairs = 0;

        let escaped = match walls.opening() {
            Some(opening) => escape(inside, outside, opening, walls.outer_top()),
            None => 0,
        };

        {
            profile_scope!("regions");
            self.grid.clear();
            self.grid.assign(inside);
        }

        if self.particle_particle_collisions {
            self.particle_particle(inside);
        }
        self.particle_container(walls, inside);
        escaped
    }

    fn particle_particle(&mut self, inside: &mut [Particle]) {
        profile_scope!("particle_particle");
        for region in self.grid.regions() {
            let members = &region.particles;
            for a in 0..members.len() {
                for b in (a + 1)..members.len() {
                    let (i, j) = (members[a], members[b]);
                    if inside[i].contacted_particle(&inside[j]) || !inside[i].contacts_particle(&inside[j]) {
                        continue;
                    }
                    match resolve_pair(inside, i, j) {
                        Ok(true) => self.number_of_particle_particle_collisions += 1,
                        Ok(false) => {}
                        Err(e @ (Error::CoincidentCenters { .. } | Error::DegenerateMass { .. })) => {
                            tracing::warn!(error = %e, "skipping degenerate particle pair");
                            self.degenerate_pairs += 1;
                        }
                        Err(e) => tracing::warn!(error = %e, "unexpected pair resolution error"),
                    }
                }
            }
        }
    }

    fn particle_container<W: ContainerWalls>(&mut self, walls: &W, inside: &mut [Particle]) {
        profile_scope!("particle_container");
        let left_wall_velocity = walls.left_wall_velocity();
        let left_wall_does_work = walls.left_wall_does_work();
        let opening = walls.opening();
        for particle in inside.iter_mut() {
            let contact = WallContact {
                bounds: walls.collision_bounds(particle),
                left_wall_velocity,
                left_wall_does_work,
                opening,
            };
            if let Some(impulse) = collide_with_walls(particle, &contact) {
                self.number_of_particle_container_collisions += 1;
                self.wall_impulse += impulse;
            }
        }
    }
}

/// Move particles that cleared the top wall within the opening to `outside`.
/// The remaining inside particles keep their relative order.
fn escape(inside: &mut Vec<Particle>, outside: &mut Vec<Particle>, opening: (f64, f64), outer_top: f64) -> usize {
    let (opening_left, opening_right) = opening;
    let mut escaped = 0;
    for i in (0..inside.len()).rev() {
        let p = &inside[i];
        if p.top() > outer_top && p.left() > opening_left && p.right() < opening_right {
            outside.push(inside.remove(i));
            escaped += 1;
        }
    }
    if escaped > 0 {
        tracing::debug!(escaped, "particles escaped through the lid opening");
    }
    escaped
}
