// container/ideal_gas_law.rs
// Container with a lid. The lid slides in from the left edge; the uncovered
// part of the top is the opening particles can escape through.

use crate::config::{ContainerConfig, LidConfig};

use super::BaseContainer;

#[derive(Clone, Debug)]
pub struct IdealGasLawContainer {
    pub base: BaseContainer,
    pub opening_left_inset: f64,
    pub opening_right_inset: f64,
    pub min_vent_opening_width: f64,
    lid_width: f64,
    lid_on: bool,
    /// Width seen by the latest `step`; a resize closes the lid.
    last_width: f64,
}

impl IdealGasLawContainer {
    pub fn new(container: &ContainerConfig, lid: &LidConfig) -> Self {
        assert!(
            lid.opening_left_inset + lid.opening_right_inset < container.min_width,
            "opening insets must fit inside the minimum container width"
        );
        let base = BaseContainer::new(container);
        let lid_width = base.width() - lid.opening_right_inset;
        let last_width = base.width();
        Self {
            base,
            opening_left_inset: lid.opening_left_inset,
            opening_right_inset: lid.opening_right_inset,
            min_vent_opening_width: lid.min_vent_opening_width,
            lid_width,
            lid_on: true,
            last_width,
        }
    }

    pub fn lid_on(&self) -> bool {
        self.lid_on
    }

    pub fn lid_width(&self) -> f64 {
        self.lid_width
    }

    pub fn min_lid_width(&self) -> f64 {
        self.opening_left_inset
    }

    pub fn max_lid_width(&self) -> f64 {
        self.base.width() - self.opening_right_inset
    }

    /// Clamped into [min_lid_width, max_lid_width].
    pub fn set_lid_width(&mut self, lid_width: f64) {
        self.lid_width = lid_width.clamp(self.min_lid_width(), self.max_lid_width());
    }

    /// Putting the lid back on closes the opening.
    pub fn set_lid_on(&mut self, on: bool) {
        self.lid_on = on;
        if on {
            self.lid_width = self.max_lid_width();
        }
    }

    pub fn opening_left(&self) -> f64 {
        if self.lid_on {
            self.base.left() + self.lid_width
        } else {
            self.base.left() + self.opening_left_inset
        }
    }

    pub fn opening_right(&self) -> f64 {
        self.base.right() - self.opening_right_inset
    }

    pub fn opening_width(&self) -> f64 {
        (self.opening_right() - self.opening_left()).max(0.0)
    }

    pub fn is_open(&self) -> bool {
        self.opening_width() > 0.0
    }

    /// Whether over-pressure should blow the lid off: the lid is on and the
    /// opening is too narrow to vent.
    pub fn should_blow_lid_off(&self) -> bool {
        self.lid_on && self.opening_width() < self.min_vent_opening_width
    }

    pub fn blow_lid_off(&mut self) {
        self.lid_on = false;
    }

    /// Advance the wall. Any change of width closes a lid that is on.
    pub fn step(&mut self, dt: f64) {
        self.base.step(dt);
        if self.base.width() != self.last_width {
            if self.lid_on {
                self.lid_width = self.max_lid_width();
            } else {
                self.lid_width = self.lid_width.clamp(self.min_lid_width(), self.max_lid_width());
            }
            self.last_width = self.base.width();
        }
    }

    pub fn reset(&mut self, default_width: f64) {
        self.base.set_width(default_width);
        self.lid_on = true;
        self.lid_width = self.max_lid_width();
        self.last_width = self.base.width();
    }
}
