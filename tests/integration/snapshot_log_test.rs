use std::fs;

use chrono::{Local, TimeZone};
use tempfile::TempDir;
use termwatch::core::snapshot_log::{capture, LogCategory, SnapshotLogger};

use super::support::{process, FakeProvider};

fn provider() -> FakeProvider {
    FakeProvider::with_processes(vec![
        process(1, "init", 0.1, 9.0),
        process(2, "a", 5.0, 1.0),
        process(3, "b", 4.0, 2.0),
        process(4, "c", 3.0, 3.0),
        process(5, "d", 2.0, 4.0),
        process(6, "e", 1.0, 5.0),
    ])
}

#[test]
fn test_cpu_log_lists_top_five() {
    let lines = capture(&mut provider(), LogCategory::Cpu).unwrap();

    assert_eq!(lines.len(), 2 + 5);
    assert_eq!(lines[2], "2 a CPU: 5.0% MEM: 1.0%");
    assert!(!lines.iter().any(|line| line.contains("init")));
}

#[test]
fn test_memory_log_sorted_by_memory() {
    let lines = capture(&mut provider(), LogCategory::Memory).unwrap();

    assert_eq!(lines[0], "Top 5 Memory-consuming processes");
    assert_eq!(lines[2], "1 init CPU: 0.1% MEM: 9.0%");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_network_log_lines() {
    let lines = capture(&mut provider(), LogCategory::Network).unwrap();

    assert_eq!(
        lines,
        vec![
            "Open Network Connections".to_string(),
            "-".repeat(40),
            "127.0.0.1:5432 -> 127.0.0.1:50000 | ESTABLISHED | postgres (42)".to_string(),
        ]
    );
}

#[test]
fn test_summary_log_lines() {
    let lines = capture(&mut provider(), LogCategory::Summary).unwrap();

    assert_eq!(lines[0], "System Summary");
    assert_eq!(lines[2], "OS: TestOS 1.0");
    assert!(lines.contains(&"Uptime: 2h 5m".to_string()));
    assert!(lines.contains(&"Boot Time: 2024-01-01 08:00:00".to_string()));
    assert!(lines.contains(&"Running Processes: 6".to_string()));
}

#[test]
fn test_written_file_matches_captured_lines() {
    let temp = TempDir::new().unwrap();
    let logger = SnapshotLogger::new(temp.path().join("logs"));
    let at = Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 1).unwrap();

    let lines = capture(&mut provider(), LogCategory::Disk).unwrap();
    let path = logger.write_at(LogCategory::Disk, &lines, at).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str(),
        Some("disk_2025-12-31_23-59-01.txt")
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), lines.join("\n"));
}
