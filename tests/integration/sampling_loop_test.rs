use std::time::Duration;

use termwatch::core::system_monitor::{
    sample_tick, LoopConfig, MonitorMode, SamplingLoop, Snapshot, StopReason, StopSignal,
};
use termwatch::MonitorError;

use super::support::{connection, process, FakeProvider, RecordingSurface, SurfaceEvent};

fn crowded_host() -> FakeProvider {
    FakeProvider {
        processes: (0..40)
            .map(|pid| process(pid, "worker", pid as f32, 0.5))
            .collect(),
        connections: Some(
            (0..15)
                .map(|n| connection(&format!("l{}", n), 100 + n))
                .collect(),
        ),
        ..FakeProvider::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_one_shot_runs_exactly_one_tick() {
    let mut provider = FakeProvider::with_processes(vec![process(1, "init", 0.5, 0.1)]);
    let surface = RecordingSurface::default();
    let events = surface.events.clone();

    let report = SamplingLoop::new(
        LoopConfig::new(MonitorMode::Disk),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.ticks, 1);
    assert_eq!(report.reason, StopReason::OneShot);

    let events = events.lock();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], SurfaceEvent::Opened);
    assert_eq!(events[2], SurfaceEvent::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_live_loop_runs_until_stopped() {
    let mut provider = FakeProvider::with_processes(vec![process(1, "init", 0.5, 0.1)]);
    let calls = provider.process_calls.clone();
    let surface = RecordingSurface::stopping_after(3);
    let events = surface.events.clone();

    let report = SamplingLoop::new(
        LoopConfig::new(MonitorMode::Cpu).live(true),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.ticks, 3);
    assert_eq!(report.reason, StopReason::Interrupted);
    assert_eq!(*calls.lock(), 3);
    assert_eq!(events.lock().last(), Some(&SurfaceEvent::Closed));
}

#[tokio::test(start_paused = true)]
async fn test_stop_requested_before_start_runs_no_tick() {
    let mut provider = FakeProvider::default();
    let stop = StopSignal::new();
    stop.request();

    let report = SamplingLoop::new(
        LoopConfig::new(MonitorMode::Cpu).live(true),
        &mut provider,
        RecordingSurface::default(),
        stop,
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.ticks, 0);
    assert_eq!(report.reason, StopReason::Interrupted);
}

#[tokio::test(start_paused = true)]
async fn test_high_cpu_process_raises_alert() {
    let mut provider = FakeProvider::with_processes(vec![
        process(10, "x", 75.0, 5.0),
        process(11, "idle", 1.0, 1.0),
    ]);
    let surface = RecordingSurface::default();
    let recorder = surface.clone();

    SamplingLoop::new(
        LoopConfig::new(MonitorMode::Cpu),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    let frames = recorder.frames();
    assert_eq!(frames.len(), 1);
    let frame = &frames[0];
    assert_eq!(frame.title, "Top CPU-consuming processes");
    assert_eq!(frame.breaching_rows(), 1);

    let banner = frame.banner.as_ref().unwrap();
    assert_eq!(banner.heading, "High CPU Usage Alert");
    assert_eq!(banner.lines, vec![" - x (PID 10) at 75.0% CPU"]);
}

#[tokio::test(start_paused = true)]
async fn test_alerts_only_cover_visible_subset() {
    // Six busy processes: only the top five rows are alerted on
    let processes = (1..=6)
        .map(|pid| process(pid, "busy", 100.0 - pid as f32, 1.0))
        .collect();
    let mut provider = FakeProvider::with_processes(processes);
    let surface = RecordingSurface::default();
    let recorder = surface.clone();

    SamplingLoop::new(
        LoopConfig::new(MonitorMode::Cpu),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    let frame = &recorder.frames()[0];
    assert_eq!(frame.table().unwrap().rows.len(), 6);
    assert_eq!(frame.breaching_rows(), 5);
    assert!(!frame.table().unwrap().rows[5].breach);
}

#[tokio::test(start_paused = true)]
async fn test_filter_applies_before_truncation() {
    let mut processes: Vec<_> = (1..=30)
        .map(|pid| process(pid, "worker", 50.0 + pid as f32, 1.0))
        .collect();
    processes.push(process(99, "postgres", 0.1, 2.0));
    let mut provider = FakeProvider::with_processes(processes);
    let surface = RecordingSurface::default();
    let recorder = surface.clone();

    SamplingLoop::new(
        LoopConfig::new(MonitorMode::Cpu).with_filter(Some("POST".to_string())),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    let frame = &recorder.frames()[0];
    let rows = &frame.table().unwrap().rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells[0], "99");
    assert!(frame.banner.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_memory_mode_uses_memory_threshold() {
    let mut provider = FakeProvider::with_processes(vec![
        process(5, "hog", 1.0, 60.0),
        process(6, "cpu-heavy", 90.0, 1.0),
    ]);
    let surface = RecordingSurface::default();
    let recorder = surface.clone();

    SamplingLoop::new(
        LoopConfig::new(MonitorMode::Memory),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    let frame = &recorder.frames()[0];
    assert_eq!(frame.table().unwrap().rows[0].cells[0], "5");
    let banner = frame.banner.as_ref().unwrap();
    assert_eq!(banner.heading, "High Memory Usage Alert");
    assert_eq!(banner.lines, vec![" - hog (PID 5) at 60.0% Memory"]);
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_aborts_and_closes_surface() {
    let mut provider = FakeProvider {
        unavailable: true,
        ..FakeProvider::default()
    };
    let surface = RecordingSurface::default();
    let events = surface.events.clone();

    let result = SamplingLoop::new(
        LoopConfig::new(MonitorMode::Cpu).live(true),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await;

    assert!(matches!(result, Err(MonitorError::ProviderUnavailable(_))));
    assert_eq!(
        *events.lock(),
        vec![SurfaceEvent::Opened, SurfaceEvent::Closed]
    );
}

#[test]
fn test_cpu_view_keeps_top_twenty() {
    let (snapshot, breaches) =
        sample_tick(&mut crowded_host(), &LoopConfig::new(MonitorMode::Cpu)).unwrap();

    let Snapshot::Processes { samples, .. } = snapshot else {
        panic!("expected processes, got {:?}", snapshot);
    };
    assert_eq!(samples.len(), 20);
    assert_eq!(samples[0].pid, 39);
    assert_eq!(samples[19].pid, 20);
    assert!(samples.windows(2).all(|w| w[0].cpu_percent >= w[1].cpu_percent));
    // 39% tops the list, under the 50% default
    assert!(breaches.is_empty());
}

#[test]
fn test_network_view_keeps_first_ten_in_order() {
    let (snapshot, breaches) =
        sample_tick(&mut crowded_host(), &LoopConfig::new(MonitorMode::Network)).unwrap();

    let Snapshot::Connections(connections) = snapshot else {
        panic!("expected connections, got {:?}", snapshot);
    };
    let locals: Vec<_> = connections
        .iter()
        .map(|c| c.local_address.clone().unwrap())
        .collect();
    let expected: Vec<_> = (0..10).map(|n| format!("l{}", n)).collect();
    assert_eq!(locals, expected);
    assert!(breaches.is_empty());
}

#[test]
fn test_all_view_aggregates_every_category() {
    let (snapshot, breaches) =
        sample_tick(&mut crowded_host(), &LoopConfig::new(MonitorMode::All)).unwrap();

    let Snapshot::Overview(overview) = snapshot else {
        panic!("expected overview, got {:?}", snapshot);
    };
    assert_eq!(overview.cpu_percent, 12.5);
    assert_eq!(overview.memory_percent, 25.0);
    assert_eq!(overview.memory_total_bytes, 16 * 1024 * 1024 * 1024);
    assert_eq!(overview.disk.unwrap().mountpoint, "/");
    assert_eq!(overview.connections.len(), 3);
    assert_eq!(overview.connections[2].local_address.as_deref(), Some("l2"));
    assert!(breaches.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_all_view_renders_one_overview_frame() {
    let mut provider = crowded_host();
    let surface = RecordingSurface::default();
    let recorder = surface.clone();

    let report = SamplingLoop::new(
        LoopConfig::new(MonitorMode::All),
        &mut provider,
        surface,
        StopSignal::new(),
        Duration::from_secs(1),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.ticks, 1);
    let frames = recorder.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].title, "System Overview");
    assert!(frames[0].banner.is_none());
}
