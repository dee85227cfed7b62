pub mod cpu;
pub mod lister;
pub mod platform;
pub mod probe;
pub mod scheduler;
pub mod series;
pub mod sink;

pub use cpu::CpuEstimator;
pub use lister::ProcessLister;
pub use probe::{
    CpuTimeSample, MemorySample, ProbeError, ProcessRecord, ProcessScan, ScriptedProbe,
    SystemProbe, TelemetryProbe,
};
pub use scheduler::{SamplerSettings, Scheduler};
pub use series::{RollingSeries, SeriesPoint};
pub use sink::DisplaySink;
