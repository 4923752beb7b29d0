use std::fs;
use std::io::Cursor;

use tempfile::TempDir;
use termwatch::ui::prompts::Notice;
use termwatch::{Flow, Settings};

use super::support::{process, FakeProvider, Harness, RecordingSurfaces};

fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        tick_interval_ms: 10,
        log_dir: dir.path().join("logs"),
        ..Settings::default()
    }
}

fn busy_host() -> FakeProvider {
    FakeProvider::with_processes(vec![
        process(10, "x", 75.0, 5.0),
        process(42, "postgres", 12.3, 3.0),
        process(7, "init", 0.1, 0.2),
    ])
}

#[test]
fn test_kill_unknown_pid_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    assert_eq!(harness.session.handle_line("kill 99999"), Flow::Continue);
    assert_eq!(
        harness.console.messages(Notice::Error),
        vec!["No process found with PID 99999."]
    );
}

#[test]
fn test_filter_without_term_starts_no_loop() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    assert_eq!(harness.session.handle_line("monitor cpu --filter"), Flow::Continue);

    assert!(harness.surfaces.created.lock().is_empty());
    assert_eq!(*harness.process_calls.lock(), 0);
    let errors = harness.console.messages(Notice::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("--filter"));
}

#[test]
fn test_search_without_matches_prints_no_table() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.handle_line("search nomatch123");

    assert_eq!(
        harness.console.messages(Notice::Info),
        vec!["No matches for 'nomatch123'"]
    );
    assert!(harness.frames().is_empty());
}

#[test]
fn test_search_by_pid_is_exact() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.handle_line("search 7");

    let frames = harness.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].title, "Search results for '7'");
    let rows = &frames[0].table().unwrap().rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells[1], "init");
    assert!(frames[0].banner.is_none());
}

#[test]
fn test_one_shot_monitor_shows_one_frame() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.handle_line("monitor cpu");

    assert_eq!(*harness.surfaces.created.lock(), vec![false]);
    let frames = harness.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].breaching_rows(), 1);
    assert!(harness.console.messages(Notice::Info).is_empty());
}

#[test]
fn test_live_monitor_returns_to_prompt_when_stopped() {
    let temp = TempDir::new().unwrap();
    let surfaces = RecordingSurfaces {
        live_stop_after: Some(2),
        ..RecordingSurfaces::default()
    };
    let mut harness = Harness::with_surfaces(busy_host(), settings_in(&temp), surfaces);
    let interrupts = harness.session.interrupt_handle();

    assert_eq!(harness.session.handle_line("monitor mem --live"), Flow::Continue);

    assert_eq!(*harness.surfaces.created.lock(), vec![true]);
    assert_eq!(harness.frames().len(), 2);
    assert_eq!(
        harness.console.messages(Notice::Info),
        vec!["Exiting mem monitor..."]
    );
    assert!(!interrupts.is_armed());
    assert!(!interrupts.interrupt());
}

#[test]
fn test_configured_threshold_is_used() {
    let temp = TempDir::new().unwrap();
    let settings = Settings {
        cpu_threshold: 80.0,
        ..settings_in(&temp)
    };
    let mut harness = Harness::new(busy_host(), settings);

    harness.session.handle_line("monitor cpu");

    let frames = harness.frames();
    assert_eq!(frames[0].breaching_rows(), 0);
    assert!(frames[0].banner.is_none());
}

#[test]
fn test_filter_on_other_views_is_ignored_with_warning() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.handle_line("monitor disk --filter sda");

    assert_eq!(harness.console.messages(Notice::Warning).len(), 1);
    let frames = harness.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].title, "Disk Usage");
}

#[test]
fn test_log_writes_snapshot_file() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.handle_line("log cpu");

    let entries: Vec<_> = fs::read_dir(temp.path().join("logs"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("cpu_"));
    assert!(name.ends_with(".txt"));

    let content = fs::read_to_string(&entries[0]).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "Top 5 CPU-consuming processes");
    assert_eq!(lines[1], "-".repeat(40));
    assert_eq!(lines[2], "10 x CPU: 75.0% MEM: 5.0%");
    assert_eq!(lines[3], "42 postgres CPU: 12.3% MEM: 3.0%");

    let saved = harness.console.messages(Notice::Success);
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("CPU usage saved to "));
}

#[test]
fn test_log_content_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.handle_line("log disk");
    harness.session.handle_line("log disk");

    let mut contents: Vec<_> = fs::read_dir(temp.path().join("logs"))
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert_eq!(contents.len(), 2);
    assert_eq!(contents[0], contents[1]);

    let content = contents.pop().unwrap();
    assert_eq!(
        content.lines().nth(2),
        Some("/dev/sda1 / ext4 Total: 100.00 GB Used: 40.00 GB Free: 60.00 GB Usage: 40.0%")
    );
}

#[test]
fn test_provider_failure_keeps_session_alive() {
    let temp = TempDir::new().unwrap();
    let provider = FakeProvider {
        unavailable: true,
        ..FakeProvider::default()
    };
    let mut harness = Harness::new(provider, settings_in(&temp));

    assert_eq!(harness.session.handle_line("monitor cpu"), Flow::Continue);
    assert_eq!(harness.session.handle_line("search x"), Flow::Continue);

    let errors = harness.console.messages(Notice::Error);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("process table unreadable"));
}

#[test]
fn test_repl_stops_at_exit() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    let input = Cursor::new("\nbogus\nhelp\nexit\nmonitor cpu\n");
    harness.session.run(input).unwrap();

    // Nothing after `exit` runs
    assert!(harness.frames().is_empty());
    assert_eq!(harness.console.messages(Notice::Error).len(), 1);
    assert!(harness
        .console
        .plain
        .lock()
        .iter()
        .any(|text| text.contains("kill <pid>")));
    assert_eq!(
        harness.console.messages(Notice::Info).last().map(String::as_str),
        Some("Goodbye!")
    );
}

#[test]
fn test_repl_ends_with_input() {
    let temp = TempDir::new().unwrap();
    let mut harness = Harness::new(busy_host(), settings_in(&temp));

    harness.session.run(Cursor::new("monitor summary\n")).unwrap();

    let frames = harness.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].title, "System Summary");
    assert_eq!(
        harness.console.messages(Notice::Info),
        vec!["Input ended. Exiting..."]
    );
}
