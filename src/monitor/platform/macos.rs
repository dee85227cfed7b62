use std::io;

use libproc::libproc::proc_pid;
use libproc::libproc::task_info::TaskInfo;

use super::{PlatformTimes, RawCpuTimes};

pub struct Platform;

impl PlatformTimes for Platform {
    fn process_cpu_times() -> io::Result<RawCpuTimes> {
        let pid = std::process::id() as i32;
        let info = proc_pid::pidinfo::<TaskInfo>(pid, 0).map_err(io::Error::other)?;

        // pti totals are in mach absolute time units; scale to nanoseconds
        // so they share a unit with the uptime clock.
        let (numer, denom) = mach_timebase();
        let kernel_ticks = info.pti_total_system.wrapping_mul(numer) / denom;
        let user_ticks = info.pti_total_user.wrapping_mul(numer) / denom;

        let wall_ticks = unsafe { libc::clock_gettime_nsec_np(libc::CLOCK_UPTIME_RAW) };

        Ok(RawCpuTimes {
            wall_ticks,
            kernel_ticks,
            user_ticks,
        })
    }
}

fn mach_timebase() -> (u64, u64) {
    let mut info = libc::mach_timebase_info_data_t { numer: 0, denom: 0 };
    let rc = unsafe { libc::mach_timebase_info(&mut info) };
    if rc != 0 || info.denom == 0 {
        return (1, 1);
    }
    (info.numer as u64, info.denom as u64)
}
