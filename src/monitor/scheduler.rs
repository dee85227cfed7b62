use std::time::{Duration, Instant};

use super::cpu::CpuEstimator;
use super::lister::ProcessLister;
use super::probe::{ProbeError, TelemetryProbe};
use super::series::{RollingSeries, SeriesPoint};
use super::sink::DisplaySink;

/// Validated scheduler parameters. Range checking happens at the
/// configuration layer; these are the values the core runs with.
#[derive(Clone, Copy, Debug)]
pub struct SamplerSettings {
    pub period: Duration,
    pub series_capacity: usize,
    pub process_limit: Option<u32>,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        SamplerSettings {
            period: Duration::from_secs(1),
            series_capacity: super::series::DEFAULT_CAPACITY,
            process_limit: None,
        }
    }
}

/// Single-threaded periodic driver. Owns the probe, the estimator, and the
/// rolling series; an external timer (the app's event loop, a test harness
/// calling `tick_once`) supplies the cadence.
pub struct Scheduler<P> {
    probe: P,
    estimator: CpuEstimator,
    lister: ProcessLister,
    series: RollingSeries,
    period: Duration,
    origin: Option<Instant>,
    running: bool,
}

impl<P: TelemetryProbe> Scheduler<P> {
    pub fn new(probe: P, settings: SamplerSettings) -> Self {
        Scheduler {
            probe,
            estimator: CpuEstimator::new(),
            lister: ProcessLister::new(settings.process_limit),
            series: RollingSeries::new(settings.series_capacity),
            period: settings.period,
            origin: None,
            running: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn series_capacity(&self) -> usize {
        self.series.capacity()
    }

    /// Begins accepting periodic ticks. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
        if self.origin.is_none() {
            self.origin = Some(Instant::now());
        }
    }

    /// Halts periodic ticks. Synchronous and idempotent: the driver checks
    /// `is_running` before each tick, so no tick callback runs after this
    /// returns.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Performs exactly one tick synchronously, regardless of the running
    /// flag. Order within the tick is fixed: cpu, memory, append, notify.
    pub fn tick_once(&mut self, sink: &mut impl DisplaySink) {
        let t = self.elapsed_secs();

        let cpu_pct = match self.probe.sample_cpu_times() {
            Ok(sample) => self.estimator.update(sample),
            Err(err) => {
                // Flat-line the chart segment rather than publish a hole.
                tracing::warn!(%err, "cpu probe failed; reusing last percentage");
                self.estimator.last_pct()
            }
        };

        let memory = match self.probe.sample_memory() {
            Ok(memory) => memory,
            Err(err) => {
                // Without a memory reading the point would be fabricated;
                // skip the whole tick instead.
                tracing::warn!(%err, "memory probe failed; skipping tick");
                return;
            }
        };

        self.series.append(SeriesPoint {
            t_secs: t,
            cpu_pct,
            mem_pct: memory.used_pct(),
        });

        let snapshot = self.series.snapshot();
        sink.on_tick(&snapshot, cpu_pct, memory);
    }

    /// User-triggered path: take a fresh process snapshot and hand it to
    /// the sink. Returns how many processes could not be inspected.
    pub fn refresh_processes(
        &mut self,
        sink: &mut impl DisplaySink,
    ) -> Result<u32, ProbeError> {
        let started = Instant::now();
        let scan = self.lister.list(&mut self.probe)?;
        tracing::debug!(
            records = scan.records.len(),
            omitted = scan.omitted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "process list refreshed"
        );
        let omitted = scan.omitted;
        sink.on_process_list(scan.records);
        Ok(omitted)
    }

    /// Empties the chart history and restarts the timeline at zero, like
    /// the front-end's "clear chart" control.
    pub fn clear_series(&mut self) {
        self.series.clear();
        self.origin = None;
    }

    pub fn series(&self) -> &RollingSeries {
        &self.series
    }

    /// Monotonic seconds since the first tick (or since the last
    /// `clear_series`). Nudged forward if the clock resolution would
    /// produce a duplicate timestamp.
    fn elapsed_secs(&mut self) -> f64 {
        let origin = *self.origin.get_or_insert_with(Instant::now);
        let t = origin.elapsed().as_secs_f64();
        match self.series.last() {
            Some(last) if t <= last.t_secs => last.t_secs + 1e-9,
            _ => t,
        }
    }
}
