//! Plain-text snapshot files: `<dir>/<category>_<YYYY-MM-DD_HH-MM-SS>.txt`.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};

use crate::core::system_monitor::selection::{top_processes, NETWORK_DISPLAY_LIMIT};
use crate::core::system_monitor::{
    ConnectionSample, DiskSample, MetricKind, MetricsProvider, ProcessSample, SystemInfo,
};
use crate::error::{MonitorError, Result};
use crate::ui::formatters::{
    format_address, format_gb, format_owner, format_percent, system_info_entries,
};

pub const DEFAULT_LOG_DIR: &str = "logs";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const SEPARATOR_WIDTH: usize = 40;
/// Processes written by the cpu and memory logs
const PROCESS_LOG_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Summary,
    Cpu,
    Memory,
    Network,
    Disk,
}

impl LogCategory {
    /// File name prefix
    pub fn file_stem(&self) -> &'static str {
        match self {
            LogCategory::Summary => "summary",
            LogCategory::Cpu => "cpu",
            LogCategory::Memory => "memory",
            LogCategory::Network => "network",
            LogCategory::Disk => "disk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LogCategory::Summary => "Summary",
            LogCategory::Cpu => "CPU usage",
            LogCategory::Memory => "Memory usage",
            LogCategory::Network => "Network connections",
            LogCategory::Disk => "Disk usage",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for LogCategory {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(LogCategory::Summary),
            "cpu" => Ok(LogCategory::Cpu),
            "mem" | "memory" => Ok(LogCategory::Memory),
            "net" | "network" => Ok(LogCategory::Network),
            "disk" => Ok(LogCategory::Disk),
            _ => Err(()),
        }
    }
}

fn with_header(title: &str, entries: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut lines = vec![title.to_string(), "-".repeat(SEPARATOR_WIDTH)];
    lines.extend(entries);
    lines
}

pub fn process_lines(kind: MetricKind, samples: &[ProcessSample]) -> Vec<String> {
    let title = match kind {
        MetricKind::Cpu => "Top 5 CPU-consuming processes",
        MetricKind::Memory => "Top 5 Memory-consuming processes",
    };
    with_header(
        title,
        samples.iter().map(|p| {
            format!(
                "{} {} CPU: {} MEM: {}",
                p.pid,
                p.name,
                format_percent(p.cpu_percent),
                format_percent(p.memory_percent)
            )
        }),
    )
}

pub fn connection_lines(connections: &[ConnectionSample]) -> Vec<String> {
    with_header(
        "Open Network Connections",
        connections.iter().map(|conn| {
            format!(
                "{} -> {} | {} | {}",
                format_address(conn.local_address.as_deref()),
                format_address(conn.remote_address.as_deref()),
                conn.status,
                format_owner(conn)
            )
        }),
    )
}

pub fn disk_lines(disks: &[DiskSample]) -> Vec<String> {
    with_header(
        "Disk Usage Report",
        disks.iter().map(|disk| {
            format!(
                "{} {} {} Total: {} GB Used: {} GB Free: {} GB Usage: {}",
                disk.device,
                disk.mountpoint,
                disk.filesystem_type,
                format_gb(disk.total_bytes),
                format_gb(disk.used_bytes),
                format_gb(disk.free_bytes),
                format_percent(disk.used_percent)
            )
        }),
    )
}

pub fn summary_lines(info: &SystemInfo) -> Vec<String> {
    with_header(
        "System Summary",
        system_info_entries(info)
            .into_iter()
            .map(|(metric, value)| format!("{}: {}", metric, value)),
    )
}

/// Take one snapshot for a category and format it
pub fn capture<P>(provider: &mut P, category: LogCategory) -> Result<Vec<String>>
where
    P: MetricsProvider + ?Sized,
{
    let lines = match category {
        LogCategory::Summary => summary_lines(&provider.system_info()?),
        LogCategory::Cpu => process_lines(
            MetricKind::Cpu,
            &top_processes(provider.list_processes()?, MetricKind::Cpu, PROCESS_LOG_LIMIT),
        ),
        LogCategory::Memory => process_lines(
            MetricKind::Memory,
            &top_processes(
                provider.list_processes()?,
                MetricKind::Memory,
                PROCESS_LOG_LIMIT,
            ),
        ),
        LogCategory::Network => {
            let mut connections = provider.list_connections()?;
            connections.truncate(NETWORK_DISPLAY_LIMIT);
            connection_lines(&connections)
        }
        LogCategory::Disk => disk_lines(&provider.list_disks()?),
    };
    Ok(lines)
}

/// Writes one new file per snapshot; existing files are never touched
#[derive(Debug, Clone)]
pub struct SnapshotLogger {
    dir: PathBuf,
}

impl SnapshotLogger {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, category: LogCategory, lines: &[String]) -> Result<PathBuf> {
        self.write_at(category, lines, Local::now())
    }

    pub fn write_at(
        &self,
        category: LogCategory,
        lines: &[String],
        at: DateTime<Local>,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            MonitorError::snapshot_log(format!(
                "Failed to create log directory {:?}: {}",
                self.dir, e
            ))
        })?;

        let base = format!("{}_{}", category.file_stem(), at.format(TIMESTAMP_FORMAT));
        let content = lines.join("\n");

        // Two snapshots within the same second get a numeric suffix
        let mut attempt = 1u32;
        loop {
            let name = if attempt == 1 {
                format!("{}.txt", base)
            } else {
                format!("{}_{}.txt", base, attempt)
            };
            let path = self.dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())?;
                    log::info!("wrote {} snapshot to {:?}", category, path);
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => {
                    return Err(MonitorError::snapshot_log(format!(
                        "Failed to create {:?}: {}",
                        path, e
                    )))
                }
            }
        }
    }
}

impl Default for SnapshotLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_DIR)
    }
}
