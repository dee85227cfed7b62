//! Smoke tests against the real host probe. These touch the live OS, so
//! they assert shapes and invariants rather than exact values.

use std::thread;
use std::time::Duration;

use pulsetop::monitor::{CpuEstimator, ProcessLister, SystemProbe, TelemetryProbe};

#[test]
fn memory_sample_holds_invariants() {
    let mut probe = SystemProbe::new();
    let mem = probe.sample_memory().expect("host memory should be readable");
    assert!(mem.total_bytes > 0);
    assert!(mem.available_bytes <= mem.total_bytes);
    assert!((0.0..=100.0).contains(&mem.used_pct()));
}

#[test]
fn cpu_times_feed_the_estimator_within_range() {
    let mut probe = SystemProbe::new();
    let mut estimator = CpuEstimator::new();

    let first = probe.sample_cpu_times().expect("cpu times should be readable");
    assert!(first.logical_cpus >= 1);
    assert_eq!(estimator.update(first), 0.0);

    thread::sleep(Duration::from_millis(30));

    let second = probe.sample_cpu_times().expect("cpu times should be readable");
    let pct = estimator.update(second);
    assert!(pct.is_finite());
    assert!((0.0..=100.0).contains(&pct));
}

#[test]
fn live_process_list_contains_this_process_sorted() {
    let mut probe = SystemProbe::new();
    let scan = ProcessLister::new(None)
        .list(&mut probe)
        .expect("process snapshot should succeed");

    assert!(!scan.records.is_empty());
    for record in &scan.records {
        assert_ne!(record.pid, 0);
        assert!(!record.name.is_empty());
    }
    for pair in scan.records.windows(2) {
        assert!(pair[0].working_set_bytes >= pair[1].working_set_bytes);
        if pair[0].working_set_bytes == pair[1].working_set_bytes {
            assert!(pair[0].pid < pair[1].pid);
        }
    }

    let me = std::process::id();
    assert!(scan.records.iter().any(|r| r.pid == me));
}

#[test]
fn process_limit_caps_live_rows() {
    let mut probe = SystemProbe::new();
    let scan = ProcessLister::new(Some(5))
        .list(&mut probe)
        .expect("process snapshot should succeed");
    assert!(scan.records.len() <= 5);
}
