#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// 可選的系統監控，透過 --monitor 啟用
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Pid,
    start_time: Instant,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid,
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn log_stats(&self, phase: &str) {
        if !self.enabled {
            return;
        }

        let Ok(mut system) = self.system.lock() else {
            return;
        };
        system.refresh_all();

        if let Some(process) = system.process(self.pid) {
            let memory_mb = process.memory() / 1024 / 1024;
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Elapsed: {:?}",
                phase,
                process.cpu_usage(),
                memory_mb,
                self.start_time.elapsed()
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
