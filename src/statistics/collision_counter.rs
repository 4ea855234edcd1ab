// statistics/collision_counter.rs

use crate::config::COLLISION_COUNTER_PERIODS;

/// Counts particle-container collisions over a fixed sample period, then stops.
#[derive(Clone, Debug)]
pub struct CollisionCounter {
    sample_period: f64,
    running: bool,
    elapsed: f64,
    count: usize,
}

impl CollisionCounter {
    pub fn new(sample_period: f64) -> Self {
        Self {
            sample_period,
            running: false,
            elapsed: 0.0,
            count: 0,
        }
    }

    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    /// Only the allowed periods are accepted; returns false otherwise.
    pub fn set_sample_period(&mut self, period: f64) -> bool {
        if !COLLISION_COUNTER_PERIODS.contains(&period) {
            return false;
        }
        self.sample_period = period;
        self.reset_count();
        true
    }

    pub fn start(&mut self) {
        self.reset_count();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn reset_count(&mut self) {
        self.elapsed = 0.0;
        self.count = 0;
    }

    pub fn step(&mut self, dt: f64, wall_collisions: usize) {
        if !self.running {
            return;
        }
        self.count += wall_collisions;
        self.elapsed += dt;
        if self.elapsed >= self.sample_period {
            self.elapsed = self.sample_period;
            self.running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_while_running_and_stops_at_period() {
        let mut c = CollisionCounter::new(10.0);
        c.step(1.0, 5);
        assert_eq!(c.count(), 0);
        c.start();
        for _ in 0..12 {
            c.step(1.0, 2);
        }
        assert!(!c.is_running());
        assert_eq!(c.count(), 20);
        assert_eq!(c.elapsed(), 10.0);
    }

    #[test]
    fn rejects_unknown_period() {
        let mut c = CollisionCounter::new(10.0);
        assert!(!c.set_sample_period(12.0));
        assert!(c.set_sample_period(50.0));
        assert_eq!(c.sample_period(), 50.0);
    }
}
