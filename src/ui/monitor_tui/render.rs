//! Turns a tick's snapshot and breaches into a `DisplayFrame`.
//!
//! Pure formatting: nothing here filters, sorts or reads the OS.

use std::collections::HashSet;

use crate::core::system_monitor::{
    Breach, ConnectionSample, DiskSample, MetricKind, Overview, ProcessSample, Snapshot,
    SystemInfo,
};
use crate::ui::formatters::{
    format_address, format_gb, format_owner, format_percent, format_size, system_info_entries,
    truncate_name,
};

use super::frame::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn frame(&self, snapshot: &Snapshot, breaches: &[Breach]) -> DisplayFrame {
        match snapshot {
            Snapshot::Processes { kind, samples } => DisplayFrame {
                title: process_title(*kind).to_string(),
                body: FrameBody::Table(process_table(samples, breaches)),
                banner: alert_banner(breaches),
            },
            Snapshot::Connections(connections) => DisplayFrame {
                title: "Open network connections (max 10)".to_string(),
                body: FrameBody::Table(connection_table(connections)),
                banner: None,
            },
            Snapshot::Disks(disks) => DisplayFrame {
                title: "Disk Usage".to_string(),
                body: FrameBody::Table(disk_table(disks)),
                banner: None,
            },
            Snapshot::Summary(info) => DisplayFrame {
                title: "System Summary".to_string(),
                body: FrameBody::Table(summary_table(info)),
                banner: None,
            },
            Snapshot::Overview(overview) => DisplayFrame {
                title: "System Overview".to_string(),
                body: FrameBody::Panels(overview_panels(overview)),
                banner: None,
            },
        }
    }

    /// Search results use the process table without alerting
    pub fn search_results(&self, term: &str, matches: &[ProcessSample]) -> DisplayFrame {
        DisplayFrame {
            title: format!("Search results for '{}'", term),
            body: FrameBody::Table(process_table(matches, &[])),
            banner: None,
        }
    }
}

fn process_title(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Cpu => "Top CPU-consuming processes",
        MetricKind::Memory => "Top 5 Memory-consuming processes",
    }
}

fn process_table(samples: &[ProcessSample], breaches: &[Breach]) -> TableView {
    let breaching: HashSet<u32> = breaches.iter().map(|b| b.subject.pid).collect();

    TableView {
        columns: vec![
            Column::right("PID", Some(Accent::Cyan)),
            Column::left("Process Name", Accent::Magenta),
            Column::right("CPU %", Some(Accent::Green)),
            Column::right("Memory %", Some(Accent::Yellow)),
        ],
        rows: samples
            .iter()
            .map(|sample| TableRow {
                cells: vec![
                    sample.pid.to_string(),
                    truncate_name(&sample.name),
                    format_percent(sample.cpu_percent),
                    format_percent(sample.memory_percent),
                ],
                breach: breaching.contains(&sample.pid),
            })
            .collect(),
    }
}

fn connection_table(connections: &[ConnectionSample]) -> TableView {
    TableView {
        columns: vec![
            Column::left("Local Address", Accent::Cyan),
            Column::left("Remote Address", Accent::Magenta),
            Column::left("Status", Accent::Green),
            Column::left("Process (PID)", Accent::Yellow),
        ],
        rows: connections
            .iter()
            .map(|conn| TableRow {
                cells: vec![
                    format_address(conn.local_address.as_deref()),
                    format_address(conn.remote_address.as_deref()),
                    conn.status.to_string(),
                    format_owner(conn),
                ],
                breach: false,
            })
            .collect(),
    }
}

fn disk_table(disks: &[DiskSample]) -> TableView {
    TableView {
        columns: vec![
            Column::left("Device", Accent::Cyan),
            Column::left("Mountpoint", Accent::Magenta),
            Column::left("FS Type", Accent::Green),
            Column::right("Total (GB)", None),
            Column::right("Used (GB)", None),
            Column::right("Free (GB)", None),
            Column::right("Usage %", None),
        ],
        rows: disks
            .iter()
            .map(|disk| TableRow {
                cells: vec![
                    disk.device.clone(),
                    disk.mountpoint.clone(),
                    disk.filesystem_type.clone(),
                    format_gb(disk.total_bytes),
                    format_gb(disk.used_bytes),
                    format_gb(disk.free_bytes),
                    format_percent(disk.used_percent),
                ],
                breach: false,
            })
            .collect(),
    }
}

fn summary_table(info: &SystemInfo) -> TableView {
    TableView {
        columns: vec![
            Column::left("Metric", Accent::Cyan),
            Column::left("Value", Accent::Magenta),
        ],
        rows: system_info_entries(info)
            .into_iter()
            .map(|(metric, value)| TableRow {
                cells: vec![metric.to_string(), value],
                breach: false,
            })
            .collect(),
    }
}

fn overview_panels(overview: &Overview) -> Vec<Panel> {
    let disk = match &overview.disk {
        Some(disk) => format!(
            "{} used on {}",
            format_percent(disk.used_percent),
            disk.mountpoint
        ),
        None => "No disk data".to_string(),
    };

    let network = if overview.connections.is_empty() {
        "No connections".to_string()
    } else {
        overview
            .connections
            .iter()
            .map(|conn| {
                format!(
                    "{} -> {} ({})",
                    format_address(conn.local_address.as_deref()),
                    format_address(conn.remote_address.as_deref()),
                    conn.status
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    vec![
        Panel {
            title: "CPU Usage".to_string(),
            body: format_percent(overview.cpu_percent),
            accent: Accent::Green,
        },
        Panel {
            title: "Memory Usage".to_string(),
            body: format!(
                "{} of {}",
                format_percent(overview.memory_percent),
                format_size(overview.memory_total_bytes)
            ),
            accent: Accent::Magenta,
        },
        Panel {
            title: "Disk Usage".to_string(),
            body: disk,
            accent: Accent::Yellow,
        },
        Panel {
            title: "Network Connections".to_string(),
            body: network,
            accent: Accent::Cyan,
        },
    ]
}

fn alert_banner(breaches: &[Breach]) -> Option<AlertBanner> {
    let kind = breaches.first()?.metric_kind;

    Some(AlertBanner {
        heading: format!("High {} Usage Alert", kind.label()),
        lines: breaches
            .iter()
            .map(|breach| {
                format!(
                    " - {} (PID {}) at {} {}",
                    breach.subject.name,
                    breach.subject.pid,
                    format_percent(breach.observed_percent),
                    breach.metric_kind.label()
                )
            })
            .collect(),
    })
}
