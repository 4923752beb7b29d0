use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone};
use sysinfo::{Disks, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::error::{MonitorError, Result};
use crate::platform::net;

use super::metrics::*;
use super::provider::MetricsProvider;

/// Collects samples from the host through sysinfo (and procfs for sockets).
///
/// The `System` and `Disks` handles are reused between calls only as refresh
/// caches; every call returns freshly built samples.
pub struct SystemCollector {
    system: System,
    disks: Disks,
    last_cpu_refresh: Option<Instant>,
}

impl SystemCollector {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());

        Self {
            system,
            disks: Disks::new_with_refreshed_list(),
            last_cpu_refresh: Some(Instant::now()),
        }
    }

    /// CPU usage is a delta between two refreshes; wait out the minimum
    /// interval when the previous refresh is too recent.
    fn settle_cpu_interval(&mut self) {
        if let Some(last) = self.last_cpu_refresh {
            let elapsed = last.elapsed();
            if elapsed < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
                std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL - elapsed);
            }
        }
        self.last_cpu_refresh = Some(Instant::now());
    }
}

impl Default for SystemCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn process_refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing().with_cpu().with_memory()
}

impl MetricsProvider for SystemCollector {
    fn list_processes(&mut self) -> Result<Vec<ProcessSample>> {
        self.settle_cpu_interval();
        self.system.refresh_memory();
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());

        let processes = self.system.processes();
        if processes.is_empty() {
            return Err(MonitorError::provider_unavailable(
                "process table could not be read",
            ));
        }

        let total_memory = self.system.total_memory();
        let samples = processes
            .values()
            .map(|proc| ProcessSample {
                pid: proc.pid().as_u32(),
                name: proc.name().to_string_lossy().to_string(),
                cpu_percent: proc.cpu_usage(),
                memory_percent: percent_of(proc.memory(), total_memory),
            })
            .collect();

        Ok(samples)
    }

    fn list_connections(&mut self) -> Result<Vec<ConnectionSample>> {
        net::open_connections()
    }

    fn list_disks(&mut self) -> Result<Vec<DiskSample>> {
        self.disks.refresh(true);

        let samples = self
            .disks
            .iter()
            .filter_map(|disk| {
                let total = disk.total_space();
                if total == 0 {
                    log::debug!("skipping unreadable partition {:?}", disk.mount_point());
                    return None;
                }
                let free = disk.available_space();
                let used = total.saturating_sub(free);

                Some(DiskSample {
                    device: disk.name().to_string_lossy().to_string(),
                    mountpoint: disk.mount_point().to_string_lossy().to_string(),
                    filesystem_type: disk.file_system().to_string_lossy().to_string(),
                    total_bytes: total,
                    used_bytes: used,
                    free_bytes: free,
                    used_percent: percent_of(used, total),
                })
            })
            .collect();

        Ok(samples)
    }

    fn system_info(&mut self) -> Result<SystemInfo> {
        self.system.refresh_memory();
        self.system.refresh_cpu_list(sysinfo::CpuRefreshKind::nothing());
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());

        let total_memory = self.system.total_memory();
        if total_memory == 0 {
            return Err(MonitorError::provider_unavailable(
                "memory statistics could not be read",
            ));
        }

        let os_name = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name,
            _ => "Unknown".to_string(),
        };

        Ok(SystemInfo {
            os_name,
            architecture: std::env::consts::ARCH.to_string(),
            physical_cores: System::physical_core_count().unwrap_or(0),
            logical_cores: self.system.cpus().len(),
            running_process_count: self.system.processes().len(),
            total_memory_bytes: total_memory,
            used_memory_bytes: self.system.used_memory(),
            boot_time: boot_time_local(System::boot_time()),
            uptime: Duration::from_secs(System::uptime()),
        })
    }

    fn global_cpu_percent(&mut self) -> Result<f32> {
        self.settle_cpu_interval();
        self.system.refresh_cpu_usage();
        Ok(self.system.global_cpu_usage())
    }
}

fn boot_time_local(secs: u64) -> DateTime<Local> {
    Local
        .timestamp_opt(secs as i64, 0)
        .single()
        .unwrap_or_else(Local::now)
}
