use std::fs;
use std::io;

use super::{PlatformTimes, RawCpuTimes};

pub struct Platform;

impl PlatformTimes for Platform {
    fn process_cpu_times() -> io::Result<RawCpuTimes> {
        let hz = clock_ticks_per_second();

        // Wall time: first field of /proc/uptime, seconds since boot.
        let uptime = fs::read_to_string("/proc/uptime")?;
        let uptime_secs: f64 = uptime
            .split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed /proc/uptime"))?;

        // CPU time: /proc/self/stat. The comm field may contain spaces and
        // parens, so fields are counted from the closing ')'.
        let stat = fs::read_to_string("/proc/self/stat")?;
        let after_comm = stat
            .rfind(')')
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed /proc/self/stat"))?
            + 1;
        let fields: Vec<&str> = stat[after_comm..].split_whitespace().collect();
        // Fields after comm: state(0) ppid(1) pgrp(2) session(3) tty_nr(4)
        // tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
        // utime(11) stime(12)
        let utime: u64 = parse_stat_field(&fields, 11)?;
        let stime: u64 = parse_stat_field(&fields, 12)?;

        Ok(RawCpuTimes {
            wall_ticks: (uptime_secs * hz as f64) as u64,
            kernel_ticks: stime,
            user_ticks: utime,
        })
    }
}

fn parse_stat_field(fields: &[&str], index: usize) -> io::Result<u64> {
    fields
        .get(index)
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed /proc/self/stat"))
}

/// USER_HZ, the unit of utime/stime. Matches the wall conversion above so
/// all three counters share one tick unit.
fn clock_ticks_per_second() -> u64 {
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if hz > 0 { hz as u64 } else { 100 }
}
