use super::probe::{MemorySample, ProcessRecord};
use super::series::SeriesPoint;

/// What the sampling core requires of any consumer. Callbacks run
/// synchronously on the scheduler's calling thread; a sink that must paint
/// elsewhere is responsible for its own marshaling.
pub trait DisplaySink {
    /// One scheduler tick: the full rolling window in chronological order,
    /// the latest CPU percentage, and the raw memory sample in bytes.
    fn on_tick(&mut self, series: &[SeriesPoint], cpu_pct: f64, memory: MemorySample);

    /// A fresh process list, already sorted and truncated. Unordered with
    /// respect to `on_tick`; it comes from a distinct trigger path.
    fn on_process_list(&mut self, processes: Vec<ProcessRecord>);
}
