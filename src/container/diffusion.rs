// container/diffusion.rs
// Fixed-width container split by a removable vertical divider at its center.

use crate::config::{ContainerConfig, DiffusionConfig};
use crate::utils::Bounds2;

use super::BaseContainer;

#[derive(Clone, Debug)]
pub struct DiffusionContainer {
    pub base: BaseContainer,
    pub divider_thickness: f64,
    has_divider: bool,
}

impl DiffusionContainer {
    pub fn new(container: &ContainerConfig, diffusion: &DiffusionConfig) -> Self {
        let base = BaseContainer::fixed(container, diffusion.width);
        assert!(
            diffusion.divider_thickness < base.width(),
            "divider must be thinner than the container"
        );
        Self {
            base,
            divider_thickness: diffusion.divider_thickness,
            has_divider: true,
        }
    }

    pub fn has_divider(&self) -> bool {
        self.has_divider
    }

    pub fn set_divider(&mut self, present: bool) {
        self.has_divider = present;
    }

    /// x of the divider's center line.
    pub fn divider_x(&self) -> f64 {
        self.base.left() + self.base.width() / 2.0
    }

    /// Interior left of the divider.
    pub fn left_bounds(&self) -> Bounds2 {
        let b = self.base.bounds();
        Bounds2::new(b.min_x, b.min_y, self.divider_x() - self.divider_thickness / 2.0, b.max_y)
    }

    /// Interior right of the divider.
    pub fn right_bounds(&self) -> Bounds2 {
        let b = self.base.bounds();
        Bounds2::new(self.divider_x() + self.divider_thickness / 2.0, b.min_y, b.max_x, b.max_y)
    }

    /// Boundary for a particle whose side is decided by `x`.
    pub fn bounds_for(&self, x: f64) -> Bounds2 {
        if !self.has_divider {
            self.base.bounds()
        } else if x < self.divider_x() {
            self.left_bounds()
        } else {
            self.right_bounds()
        }
    }
}
