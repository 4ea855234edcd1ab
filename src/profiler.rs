use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Scoped profiler accumulating wall-clock time per pipeline stage.
pub struct Profiler {
    pub timings: HashMap<&'static str, Duration>,
    pub calls: HashMap<&'static str, u64>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            calls: HashMap::new(),
        }
    }

    pub fn finish(&mut self, guard: &StageGuard) {
        let elapsed = guard.start.elapsed();
        *self.timings.entry(guard.stage).or_default() += elapsed;
        *self.calls.entry(guard.stage).or_default() += 1;
    }

    /// Stages ordered by total time, slowest first.
    pub fn report_sorted(&self) -> Vec<(&'static str, Duration, u64)> {
        let mut v: Vec<_> = self
            .timings
            .iter()
            .map(|(stage, d)| (*stage, *d, self.calls.get(stage).copied().unwrap_or(0)))
            .collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }

    pub fn clear(&mut self) {
        self.timings.clear();
        self.calls.clear();
    }

    pub fn log_and_clear(&mut self) {
        for (stage, total, calls) in self.report_sorted() {
            let per_call = if calls > 0 { total / calls as u32 } else { Duration::ZERO };
            tracing::info!(stage, ?total, calls, ?per_call, "profile");
        }
        self.clear();
    }
}

pub struct StageGuard {
    stage: &'static str,
    start: Instant,
}

/// Start timing a stage. The returned guard records into the global
/// profiler when dropped.
pub fn start(stage: &'static str) -> StageGuard {
    StageGuard {
        stage,
        start: Instant::now(),
    }
}

#[cfg(feature = "profiling")]
impl Drop for StageGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Time the enclosing scope, only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_sorted_slowest_first() {
        let mut p = Profiler::new();
        p.timings.insert("regions", Duration::from_millis(2));
        p.timings.insert("walls", Duration::from_millis(5));
        p.calls.insert("regions", 1);
        p.calls.insert("walls", 1);
        let report = p.report_sorted();
        assert_eq!(report[0].0, "walls");
        assert_eq!(report[1].0, "regions");
        p.clear();
        assert!(p.report_sorted().is_empty());
    }
}
