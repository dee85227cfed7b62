use super::probe::{ProbeError, ProcessScan, TelemetryProbe};

/// Produces the displayable process view: descending by working set, ties
/// broken by ascending pid, optionally truncated to a row limit.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLister {
    limit: Option<u32>,
}

impl ProcessLister {
    pub fn new(limit: Option<u32>) -> Self {
        ProcessLister { limit }
    }

    /// Takes a fresh snapshot from the probe. The result is stale the
    /// instant it is produced; no process-existence guarantee is offered.
    pub fn list(&self, probe: &mut impl TelemetryProbe) -> Result<ProcessScan, ProbeError> {
        let mut scan = probe.list_processes()?;
        scan.records.sort_unstable_by(|a, b| {
            b.working_set_bytes
                .cmp(&a.working_set_bytes)
                .then_with(|| a.pid.cmp(&b.pid))
        });
        if let Some(limit) = self.limit {
            scan.records.truncate(limit as usize);
        }
        Ok(scan)
    }
}
