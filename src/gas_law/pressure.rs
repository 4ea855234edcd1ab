// gas_law/pressure.rs
// Pressure sampled from wall momentum transfer, and the ideal-gas value.

use std::collections::VecDeque;

use crate::units::BOLTZMANN;

/// P = NkT/V in AMU/(pm·ps²); zero for an empty container.
pub fn ideal_pressure(count: usize, temperature: f64, volume: f64) -> f64 {
    if count == 0 || volume <= 0.0 {
        return 0.0;
    }
    count as f64 * BOLTZMANN * temperature / volume
}

/// Sliding-window average of momentum delivered to the walls per unit wall area.
///
/// Particles move in 2D while temperature counts three degrees of freedom,
/// so the measured force per area is scaled by 2/3 to agree with NkT/V.
#[derive(Clone, Debug)]
pub struct PressureModel {
    window: f64,
    /// (dt, impulse per area) for each step inside the window.
    samples: VecDeque<(f64, f64)>,
    elapsed: f64,
    accumulated: f64,
}

impl PressureModel {
    pub fn new(window: f64) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
            elapsed: 0.0,
            accumulated: 0.0,
        }
    }

    /// Record one step. `wall_area` is perimeter × depth (pm²).
    pub fn sample(&mut self, dt: f64, wall_impulse: f64, wall_area: f64) {
        if dt <= 0.0 || wall_area <= 0.0 {
            return;
        }
        let per_area = wall_impulse / wall_area;
        self.samples.push_back((dt, per_area));
        self.elapsed += dt;
        self.accumulated += per_area;
        while self.elapsed > self.window && self.samples.len() > 1 {
            if let Some((old_dt, old)) = self.samples.pop_front() {
                self.elapsed -= old_dt;
                self.accumulated -= old;
            }
        }
    }

    /// Pressure in AMU/(pm·ps²).
    pub fn value(&self) -> f64 {
        if self.elapsed <= 0.0 {
            return 0.0;
        }
        ((2.0 / 3.0) * self.accumulated / self.elapsed).max(0.0)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.elapsed = 0.0;
        self.accumulated = 0.0;
    }
}
