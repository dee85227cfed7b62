use std::io;

use windows_sys::Win32::Foundation::FILETIME;
use windows_sys::Win32::System::SystemInformation::GetSystemTimeAsFileTime;
use windows_sys::Win32::System::Threading::{GetCurrentProcess, GetProcessTimes};

use super::{PlatformTimes, RawCpuTimes};

pub struct Platform;

impl PlatformTimes for Platform {
    fn process_cpu_times() -> io::Result<RawCpuTimes> {
        unsafe {
            let mut wall: FILETIME = std::mem::zeroed();
            GetSystemTimeAsFileTime(&mut wall);

            let mut created: FILETIME = std::mem::zeroed();
            let mut exited: FILETIME = std::mem::zeroed();
            let mut kernel: FILETIME = std::mem::zeroed();
            let mut user: FILETIME = std::mem::zeroed();

            // GetCurrentProcess returns a pseudo-handle; nothing to close.
            let ok = GetProcessTimes(
                GetCurrentProcess(),
                &mut created,
                &mut exited,
                &mut kernel,
                &mut user,
            );
            if ok == 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(RawCpuTimes {
                wall_ticks: filetime_ticks(&wall),
                kernel_ticks: filetime_ticks(&kernel),
                user_ticks: filetime_ticks(&user),
            })
        }
    }
}

/// FILETIME is 100 ns ticks split across two 32-bit words.
fn filetime_ticks(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | ft.dwLowDateTime as u64
}
