use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One process observed during a tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    /// Summed across cores, so it may exceed 100 on multi-core hosts
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Established,
    SynSent,
    SynRecv,
    FinWait1,
    FinWait2,
    TimeWait,
    Close,
    CloseWait,
    LastAck,
    Listen,
    Closing,
    #[default]
    Unknown,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Established => "ESTABLISHED",
            ConnectionStatus::SynSent => "SYN_SENT",
            ConnectionStatus::SynRecv => "SYN_RECV",
            ConnectionStatus::FinWait1 => "FIN_WAIT1",
            ConnectionStatus::FinWait2 => "FIN_WAIT2",
            ConnectionStatus::TimeWait => "TIME_WAIT",
            ConnectionStatus::Close => "CLOSE",
            ConnectionStatus::CloseWait => "CLOSE_WAIT",
            ConnectionStatus::LastAck => "LAST_ACK",
            ConnectionStatus::Listen => "LISTEN",
            ConnectionStatus::Closing => "CLOSING",
            ConnectionStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One IP socket observed during a tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSample {
    pub local_address: Option<String>,
    pub remote_address: Option<String>,
    pub status: ConnectionStatus,
    pub pid: Option<u32>,
    /// "System" when no owning pid, "Unknown" when the owner's name is unreadable
    pub process_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskSample {
    pub device: String,
    pub mountpoint: String,
    pub filesystem_type: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub used_percent: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os_name: String,
    pub architecture: String,
    pub physical_cores: usize,
    pub logical_cores: usize,
    pub running_process_count: usize,
    pub total_memory_bytes: u64,
    pub used_memory_bytes: u64,
    pub boot_time: DateTime<Local>,
    pub uptime: Duration,
}

impl SystemInfo {
    pub fn memory_percent(&self) -> f32 {
        percent_of(self.used_memory_bytes, self.total_memory_bytes)
    }
}

/// One representative value per category, for the combined view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overview {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub memory_total_bytes: u64,
    pub disk: Option<DiskSample>,
    pub connections: Vec<ConnectionSample>,
}

/// Everything sampled during one tick, already selected for display
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Processes {
        kind: MetricKind,
        samples: Vec<ProcessSample>,
    },
    Connections(Vec<ConnectionSample>),
    Disks(Vec<DiskSample>),
    Summary(SystemInfo),
    Overview(Overview),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Cpu,
    Memory,
}

impl MetricKind {
    /// Value of the metric this kind selects
    pub fn of(&self, sample: &ProcessSample) -> f32 {
        match self {
            MetricKind::Cpu => sample.cpu_percent,
            MetricKind::Memory => sample.memory_percent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Memory => "Memory",
        }
    }
}

pub(crate) fn percent_of(part: u64, total: u64) -> f32 {
    if total > 0 {
        (part as f64 / total as f64 * 100.0) as f32
    } else {
        0.0
    }
}
