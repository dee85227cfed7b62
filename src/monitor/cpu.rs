use super::probe::CpuTimeSample;

/// Converts successive raw counter samples into a utilization percentage
/// normalized across logical CPUs. Each estimator owns its own state, so
/// independent instances (live probe, synthetic test feed) can coexist.
#[derive(Debug, Default)]
pub struct CpuEstimator {
    last: Option<CpuTimeSample>,
    last_pct: f64,
}

impl CpuEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `now` into the estimate. Always returns a finite value in
    /// `[0, 100]`.
    pub fn update(&mut self, now: CpuTimeSample) -> f64 {
        let Some(last) = self.last.replace(now) else {
            // No meaningful delta exists yet.
            return 0.0;
        };

        let deltas = (
            now.kernel_ticks.checked_sub(last.kernel_ticks),
            now.user_ticks.checked_sub(last.user_ticks),
            now.wall_ticks.checked_sub(last.wall_ticks),
        );
        let (Some(d_kernel), Some(d_user), Some(d_wall)) = deltas else {
            // Counter reset or clock adjustment: resynchronize from `now`.
            self.last_pct = 0.0;
            return 0.0;
        };

        if d_wall == 0 {
            // Two samples in the same tick; keep the previous reading.
            return self.last_pct;
        }

        let cpus = now.logical_cpus.max(1) as f64;
        let busy = d_kernel as f64 + d_user as f64;
        let pct = (busy / d_wall as f64 / cpus * 100.0).clamp(0.0, 100.0);
        self.last_pct = pct;
        pct
    }

    /// The most recently reported percentage, `0.0` before the first
    /// meaningful delta.
    pub fn last_pct(&self) -> f64 {
        self.last_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(wall: u64, kernel: u64, user: u64, cpus: u32) -> CpuTimeSample {
        CpuTimeSample {
            wall_ticks: wall,
            kernel_ticks: kernel,
            user_ticks: user,
            logical_cpus: cpus,
        }
    }

    #[test]
    fn first_update_returns_exactly_zero() {
        let mut est = CpuEstimator::new();
        assert_eq!(est.update(sample(500, 100, 100, 8)), 0.0);
    }

    #[test]
    fn steady_quarter_load_on_four_cores() {
        // (wall, sys, user) at 25% across 4 cores.
        let mut est = CpuEstimator::new();
        assert_eq!(est.update(sample(0, 0, 0, 4)), 0.0);
        assert!((est.update(sample(1000, 400, 600, 4)) - 25.0).abs() < 1e-9);
        assert!((est.update(sample(2000, 800, 1200, 4)) - 25.0).abs() < 1e-9);
        assert!((est.update(sample(3000, 1200, 1800, 4)) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn counter_reset_resynchronizes() {
        let mut est = CpuEstimator::new();
        assert_eq!(est.update(sample(0, 0, 0, 4)), 0.0);
        assert!((est.update(sample(1000, 500, 500, 4)) - 25.0).abs() < 1e-9);
        // Counters went backwards: report zero and pick up from the new base.
        assert_eq!(est.update(sample(2000, 100, 100, 4)), 0.0);
        assert!((est.update(sample(3000, 300, 300, 4)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_wall_delta_repeats_previous_value() {
        let mut est = CpuEstimator::new();
        est.update(sample(0, 0, 0, 2));
        let pct = est.update(sample(1000, 200, 300, 2));
        assert!((pct - 25.0).abs() < 1e-9);
        // Same wall tick again: no division, previous value stands.
        assert_eq!(est.update(sample(1000, 250, 350, 2)), pct);
    }

    #[test]
    fn zero_wall_delta_before_any_reading_returns_zero() {
        let mut est = CpuEstimator::new();
        est.update(sample(100, 0, 0, 2));
        assert_eq!(est.update(sample(100, 10, 10, 2)), 0.0);
    }

    #[test]
    fn over_hundred_from_timing_skew_is_clipped() {
        let mut est = CpuEstimator::new();
        est.update(sample(0, 0, 0, 1));
        // Busy ticks exceed wall ticks; clamp rather than report an error.
        assert_eq!(est.update(sample(10, 20, 20, 1)), 100.0);
    }

    #[test]
    fn zero_cpu_count_treated_as_one() {
        let mut est = CpuEstimator::new();
        est.update(sample(0, 0, 0, 0));
        assert!((est.update(sample(1000, 250, 250, 0)) - 50.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn output_always_finite_and_in_range(
            samples in proptest::collection::vec(
                (any::<u64>(), any::<u64>(), any::<u64>(), any::<u32>()),
                1..64,
            )
        ) {
            let mut est = CpuEstimator::new();
            for (wall, kernel, user, cpus) in samples {
                let pct = est.update(sample(wall, kernel, user, cpus));
                prop_assert!(pct.is_finite());
                prop_assert!((0.0..=100.0).contains(&pct));
            }
        }
    }
}
