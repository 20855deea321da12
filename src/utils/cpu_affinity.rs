//! Thread pinning for stable measurements.
//!
//! On Linux the measuring thread is pinned with `sched_setaffinity` and the
//! previous mask is restored when the guard drops. Elsewhere pinning is a
//! no-op and the guard reports itself as unpinned.

#[cfg(target_os = "linux")]
mod platform {
    pub type Saved = libc::cpu_set_t;

    /// The core the calling thread is running on right now
    pub fn current_cpu() -> Option<usize> {
        // SAFETY: sched_getcpu has no preconditions.
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn online_cpus() -> Option<usize> {
        // SAFETY: sysconf has no preconditions.
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (n > 0).then_some(n as usize)
    }

    pub fn save_affinity() -> Option<Saved> {
        // SAFETY: cpu_set_t is plain data; the kernel fills it in.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            (libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(set)
        }
    }

    pub fn set_affinity(core_id: usize) -> bool {
        // SAFETY: the set is initialized by CPU_ZERO before use.
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore_affinity(saved: &Saved) -> bool {
        // SAFETY: `saved` came from sched_getaffinity.
        unsafe { libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), saved) == 0 }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type Saved = ();

    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn online_cpus() -> Option<usize> {
        None
    }
    pub fn save_affinity() -> Option<Saved> {
        None
    }
    pub fn set_affinity(_core_id: usize) -> bool {
        false
    }
    pub fn restore_affinity(_saved: &Saved) -> bool {
        true
    }
}

/// Number of online CPUs, if the platform reports it
pub fn online_cpus() -> Option<usize> {
    platform::online_cpus()
}

/// RAII guard: pins the current thread on creation, restores its previous
/// affinity on drop.
///
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new(); // pinned
///     // ... timed region ...
/// } // previous affinity restored
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::Saved>,
}

impl CpuPinGuard {
    /// Pin to the core the thread is currently running on (core 0 if unknown).
    pub fn new() -> Self {
        Self::with_core(platform::current_cpu().unwrap_or(0))
    }

    /// Pin to a specific core.
    pub fn with_core(core_id: usize) -> Self {
        let saved = platform::save_affinity();
        let pinned_core = (saved.is_some() && platform::set_affinity(core_id)).then_some(core_id);
        if pinned_core.is_none() {
            tracing::debug!(core_id, "thread pinning unavailable, measuring unpinned");
        }
        Self { pinned_core, saved }
    }

    /// Core the thread is pinned to, if any
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_some() {
            if let Some(saved) = &self.saved {
                if !platform::restore_affinity(saved) {
                    tracing::warn!("failed to restore CPU affinity");
                }
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_guard_reports_core() {
        let guard = CpuPinGuard::new();
        if guard.is_pinned() {
            assert!(guard.core_id().is_some());
        } else {
            assert!(guard.core_id().is_none());
        }
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_pin_then_restore() {
        let before = platform::save_affinity().map(|s| unsafe { libc::CPU_COUNT(&s) });
        {
            let guard = CpuPinGuard::new();
            if guard.is_pinned() {
                let during = platform::save_affinity().map(|s| unsafe { libc::CPU_COUNT(&s) });
                assert_eq!(during, Some(1));
            }
        }
        let after = platform::save_affinity().map(|s| unsafe { libc::CPU_COUNT(&s) });
        assert_eq!(before, after);
    }
}
