// container/mod.rs
// Resizable rectangular containers. The right and bottom edges are fixed;
// width grows and shrinks by moving the left wall.

pub mod diffusion;
pub mod ideal_gas_law;


pub use diffusion::DiffusionContainer;
pub use ideal_gas_law::IdealGasLawContainer;

use ultraviolet::DVec2;

use crate::config::ContainerConfig;
use crate::utils::Bounds2;

#[derive(Clone, Debug)]
pub struct BaseContainer {
    /// Bottom-right corner of the interior.
    pub position: DVec2,
    pub height: f64,
    pub depth: f64,
    pub wall_thickness: f64,
    /// Allowed (min, max) width.
    pub width_range: (f64, f64),
    pub wall_speed_limit: f64,
    /// When set, width changes animate at `wall_speed_limit` and the left wall
    /// exchanges momentum with particles.
    pub left_wall_does_work: bool,
    width: f64,
    desired_width: f64,
    /// x-velocity of the left wall over the latest step (pm/ps).
    left_wall_velocity: f64,
}

impl BaseContainer {
    pub fn new(config: &ContainerConfig) -> Self {
        assert!(
            config.min_width > 0.0 && config.min_width <= config.max_width,
            "container width range must be positive and ordered"
        );
        let width = config.default_width.clamp(config.min_width, config.max_width);
        Self {
            position: DVec2::new(config.position_x, config.position_y),
            height: config.height,
            depth: config.depth,
            wall_thickness: config.wall_thickness,
            width_range: (config.min_width, config.max_width),
            wall_speed_limit: config.wall_speed_limit,
            left_wall_does_work: config.left_wall_does_work,
            width,
            desired_width: width,
            left_wall_velocity: 0.0,
        }
    }

    /// Container with a fixed width (min = max = width).
    pub fn fixed(config: &ContainerConfig, width: f64) -> Self {
        Self::new(&ContainerConfig {
            min_width: width,
            max_width: width,
            default_width: width,
            left_wall_does_work: false,
            ..config.clone()
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn desired_width(&self) -> f64 {
        self.desired_width
    }

    pub fn left_wall_velocity(&self) -> f64 {
        self.left_wall_velocity
    }

    pub fn right(&self) -> f64 {
        self.position.x
    }

    pub fn left(&self) -> f64 {
        self.position.x - self.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y
    }

    /// Interior top.
    pub fn top(&self) -> f64 {
        self.position.y + self.height
    }

    /// Outer top, including the wall.
    pub fn outer_top(&self) -> f64 {
        self.top() + self.wall_thickness
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::new(self.left(), self.bottom(), self.right(), self.top())
    }

    /// Interior at the maximum width.
    pub fn max_bounds(&self) -> Bounds2 {
        Bounds2::new(
            self.right() - self.width_range.1,
            self.bottom(),
            self.right(),
            self.top(),
        )
    }

    /// pm^3
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Wall length the gas presses on (pm); the open top of a lidless container still counts.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Request a new width, clamped to the allowed range. Animated when the
    /// left wall does work, applied immediately otherwise.
    pub fn set_desired_width(&mut self, width: f64) {
        self.desired_width = width.clamp(self.width_range.0, self.width_range.1);
        if !self.left_wall_does_work {
            self.width = self.desired_width;
        }
    }

    /// Animate toward `width` regardless of the work setting. Used by the
    /// pressure-via-volume feedback.
    pub fn animate_width_to(&mut self, width: f64) {
        self.desired_width = width.clamp(self.width_range.0, self.width_range.1);
    }

    /// Jump to `width` immediately (reset, tests).
    pub fn set_width(&mut self, width: f64) {
        self.width = width.clamp(self.width_range.0, self.width_range.1);
        self.desired_width = self.width;
        self.left_wall_velocity = 0.0;
    }

    /// Pin the width where it is, cancelling any animation in progress.
    pub fn stop_animation(&mut self) {
        self.desired_width = self.width;
        self.left_wall_velocity = 0.0;
    }

    /// Move the left wall toward the desired width, limited by the wall speed.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            self.left_wall_velocity = 0.0;
            return;
        }
        let delta = self.desired_width - self.width;
        let max_delta = self.wall_speed_limit * dt;
        let applied = if delta.abs() <= max_delta {
            delta
        } else {
            max_delta.copysign(delta)
        };
        self.width += applied;
        // left = right - width, so the wall moves opposite to the width change
        self.left_wall_velocity = -applied / dt;
    }

    pub fn is_animating(&self) -> bool {
        self.width != self.desired_width
    }
}
