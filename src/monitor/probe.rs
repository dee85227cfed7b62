use std::collections::VecDeque;
use std::fmt;
use std::io;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;

/// Snapshot of kernel time accounting at an instant. Ticks are in an
/// OS-defined monotonic unit; only differences between two samples carry
/// meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuTimeSample {
    pub wall_ticks: u64,
    pub kernel_ticks: u64,
    pub user_ticks: u64,
    pub logical_cpus: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemorySample {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    pub fn used_pct(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.used_bytes() as f64 / self.total_bytes as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// One live process: executable filename (lossily decoded), pid, and the
/// resident working set in bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    pub name: String,
    pub pid: u32,
    pub working_set_bytes: u64,
}

/// Result of one process enumeration. `omitted` counts processes that were
/// alive in the snapshot but could not be inspected; they are never errors.
#[derive(Clone, Debug, Default)]
pub struct ProcessScan {
    pub records: Vec<ProcessRecord>,
    pub omitted: u32,
}

#[derive(Debug)]
pub enum ProbeError {
    /// The OS refused or could not service a counter query.
    Unavailable {
        query: &'static str,
        source: Option<io::Error>,
    },
}

impl ProbeError {
    pub fn unavailable(query: &'static str) -> Self {
        ProbeError::Unavailable {
            query,
            source: None,
        }
    }

    pub fn unavailable_io(query: &'static str, source: io::Error) -> Self {
        ProbeError::Unavailable {
            query,
            source: Some(source),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Unavailable { query, source } => match source {
                Some(err) => write!(f, "{query} query unavailable: {err}"),
                None => write!(f, "{query} query unavailable"),
            },
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Unavailable { source, .. } => {
                source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// Sole boundary between the sampling core and OS telemetry. Everything
/// above this trait is portable.
pub trait TelemetryProbe {
    fn sample_cpu_times(&mut self) -> Result<CpuTimeSample, ProbeError>;
    fn sample_memory(&mut self) -> Result<MemorySample, ProbeError>;
    fn list_processes(&mut self) -> Result<ProcessScan, ProbeError>;
}

/// Production probe: sysinfo for memory and process enumeration, the
/// platform module for raw CPU time counters.
pub struct SystemProbe {
    sys: System,
    logical_cpus: u32,
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        let logical_cpus = match sys.cpus().len() {
            0 => std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(1),
            n => n as u32,
        };
        SystemProbe { sys, logical_cpus }
    }

    pub fn logical_cpus(&self) -> u32 {
        self.logical_cpus
    }
}

impl TelemetryProbe for SystemProbe {
    fn sample_cpu_times(&mut self) -> Result<CpuTimeSample, ProbeError> {
        let raw = platform::process_cpu_times()
            .map_err(|e| ProbeError::unavailable_io("cpu time", e))?;
        Ok(CpuTimeSample {
            wall_ticks: raw.wall_ticks,
            kernel_ticks: raw.kernel_ticks,
            user_ticks: raw.user_ticks,
            logical_cpus: self.logical_cpus,
        })
    }

    fn sample_memory(&mut self) -> Result<MemorySample, ProbeError> {
        self.sys.refresh_memory();
        let total_bytes = self.sys.total_memory();
        if total_bytes == 0 {
            return Err(ProbeError::unavailable("memory status"));
        }
        let available_bytes = self.sys.available_memory().min(total_bytes);
        Ok(MemorySample {
            total_bytes,
            available_bytes,
        })
    }

    fn list_processes(&mut self) -> Result<ProcessScan, ProbeError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        let mut scan = ProcessScan::default();
        for (pid, process) in self.sys.processes() {
            let pid = pid.as_u32();
            let name = process.name().to_string_lossy().to_string();
            if pid == 0 || name.is_empty() {
                scan.omitted += 1;
                continue;
            }
            scan.records.push(ProcessRecord {
                name,
                pid,
                working_set_bytes: process.memory(),
            });
        }

        if scan.records.is_empty() {
            return Err(ProbeError::unavailable("process snapshot"));
        }
        if scan.omitted > 0 {
            tracing::debug!(omitted = scan.omitted, "processes skipped during enumeration");
        }
        Ok(scan)
    }
}

/// A scripted probe that replays queued responses in order. Testing
/// utility; kept in-tree so unit and integration tests can drive the
/// scheduler deterministically.
#[derive(Default)]
pub struct ScriptedProbe {
    cpu: VecDeque<Result<CpuTimeSample, ProbeError>>,
    memory: VecDeque<Result<MemorySample, ProbeError>>,
    processes: VecDeque<Result<ProcessScan, ProbeError>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_cpu(&mut self, sample: Result<CpuTimeSample, ProbeError>) -> &mut Self {
        self.cpu.push_back(sample);
        self
    }

    pub fn push_memory(&mut self, sample: Result<MemorySample, ProbeError>) -> &mut Self {
        self.memory.push_back(sample);
        self
    }

    pub fn push_processes(&mut self, scan: Result<ProcessScan, ProbeError>) -> &mut Self {
        self.processes.push_back(scan);
        self
    }
}

impl TelemetryProbe for ScriptedProbe {
    fn sample_cpu_times(&mut self) -> Result<CpuTimeSample, ProbeError> {
        self.cpu
            .pop_front()
            .expect("scripted cpu samples should not be empty")
    }

    fn sample_memory(&mut self) -> Result<MemorySample, ProbeError> {
        self.memory
            .pop_front()
            .expect("scripted memory samples should not be empty")
    }

    fn list_processes(&mut self) -> Result<ProcessScan, ProbeError> {
        self.processes
            .pop_front()
            .expect("scripted process scans should not be empty")
    }
}
