// time.rs
// Mapping from real (wall-clock) seconds to model picoseconds.

use serde::{Deserialize, Serialize};

use crate::config::TimeConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSpeed {
    #[default]
    Normal,
    Slow,
}

#[derive(Clone, Debug)]
pub struct TimeTransform {
    pub speed: TimeSpeed,
    normal_ps_per_second: f64,
    slow_ps_per_second: f64,
    max_real_dt: f64,
}

impl TimeTransform {
    pub fn new(config: &TimeConfig) -> Self {
        Self {
            speed: TimeSpeed::Normal,
            normal_ps_per_second: config.normal_ps_per_second,
            slow_ps_per_second: config.slow_ps_per_second,
            max_real_dt: config.max_real_dt,
        }
    }

    pub fn ps_per_second(&self) -> f64 {
        match self.speed {
            TimeSpeed::Normal => self.normal_ps_per_second,
            TimeSpeed::Slow => self.slow_ps_per_second,
        }
    }

    /// Model time for a real frame; long frames are truncated.
    pub fn model_dt(&self, real_dt: f64) -> f64 {
        real_dt.clamp(0.0, self.max_real_dt) * self.ps_per_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn slow_is_a_quarter_of_normal() {
        let mut t = TimeTransform::new(&TimeConfig::default());
        assert_relative_eq!(t.model_dt(0.1), 0.25);
        t.speed = TimeSpeed::Slow;
        assert_relative_eq!(t.model_dt(0.1), 0.0625);
    }

    #[test]
    fn stalled_frames_are_truncated() {
        let t = TimeTransform::new(&TimeConfig::default());
        assert_eq!(t.model_dt(10.0), 0.25 * 2.5);
        assert_eq!(t.model_dt(-1.0), 0.0);
    }
}
