use std::time::Duration;

use humansize::{format_size as human_format_size, BINARY};

use crate::core::system_monitor::{ConnectionSample, SystemInfo};

/// Display width for process names
pub const NAME_WIDTH: usize = 30;
/// Placeholder for an absent address
pub const NO_ADDRESS: &str = "—";

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Truncate a process name for display. The sample itself is untouched.
pub fn truncate_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}

/// One decimal, never clamped (CPU may exceed 100 on multi-core hosts)
pub fn format_percent(value: f32) -> String {
    format!("{:.1}%", value)
}

/// Bytes as GiB with two decimals, without unit
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / GIB)
}

/// Human readable size (e.g. "15.52 GiB")
pub fn format_size(bytes: u64) -> String {
    human_format_size(bytes, BINARY)
}

pub fn format_address(address: Option<&str>) -> String {
    address.unwrap_or(NO_ADDRESS).to_string()
}

/// "<name> (<pid>)", with "—" for sockets without an owning pid
pub fn format_owner(connection: &ConnectionSample) -> String {
    match connection.pid {
        Some(pid) => format!("{} ({})", connection.process_name, pid),
        None => format!("{} ({})", connection.process_name, NO_ADDRESS),
    }
}

/// Format uptime as "<hours>h <minutes>m"
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}

/// Ordered metric/value pairs shared by the summary view and the summary log
pub fn system_info_entries(info: &SystemInfo) -> Vec<(&'static str, String)> {
    vec![
        ("OS", info.os_name.clone()),
        ("Architecture", info.architecture.clone()),
        ("CPU Cores", info.physical_cores.to_string()),
        ("Logical CPUs", info.logical_cores.to_string()),
        ("Total Memory (GB)", format_gb(info.total_memory_bytes)),
        ("Used Memory (GB)", format_gb(info.used_memory_bytes)),
        ("Uptime", format_uptime(info.uptime)),
        (
            "Boot Time",
            info.boot_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        ("Running Processes", info.running_process_count.to_string()),
    ]
}
