//! The sampling loop: pull samples, select, evaluate alerts, render, repeat.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;
use crate::ui::monitor_tui::{DisplaySurface, Renderer};

use super::alerts::{evaluate, AlertThreshold, Breach, DEFAULT_LIMIT_PERCENT};
use super::metrics::{MetricKind, Overview, Snapshot};
use super::provider::MetricsProvider;
use super::selection::{
    alert_subset, filter_processes, first_connections, top_processes, CPU_DISPLAY_LIMIT,
    MEMORY_DISPLAY_LIMIT, NETWORK_DISPLAY_LIMIT, OVERVIEW_CONNECTION_LIMIT,
};
use super::ticker::{StopSignal, TickWait, Ticker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorMode {
    Cpu,
    Memory,
    Network,
    Disk,
    Summary,
    All,
}

impl MonitorMode {
    /// Metric the mode alerts on, if any
    pub fn alert_metric(&self) -> Option<MetricKind> {
        match self {
            MonitorMode::Cpu => Some(MetricKind::Cpu),
            MonitorMode::Memory => Some(MetricKind::Memory),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MonitorMode::Cpu => "cpu",
            MonitorMode::Memory => "mem",
            MonitorMode::Network => "net",
            MonitorMode::Disk => "disk",
            MonitorMode::Summary => "summary",
            MonitorMode::All => "all",
        }
    }
}

impl fmt::Display for MonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MonitorMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(MonitorMode::Cpu),
            "mem" | "memory" => Ok(MonitorMode::Memory),
            "net" | "network" => Ok(MonitorMode::Network),
            "disk" => Ok(MonitorMode::Disk),
            "summary" => Ok(MonitorMode::Summary),
            "all" => Ok(MonitorMode::All),
            _ => Err(()),
        }
    }
}

/// Everything one loop invocation needs, fixed for its lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    pub mode: MonitorMode,
    pub live: bool,
    /// Only honoured in CPU mode
    pub filter_term: Option<String>,
    pub threshold: Option<AlertThreshold>,
}

impl LoopConfig {
    /// Config with the mode's default threshold (50% for CPU and memory)
    pub fn new(mode: MonitorMode) -> Self {
        Self {
            mode,
            live: false,
            filter_term: None,
            threshold: mode
                .alert_metric()
                .map(|kind| AlertThreshold::new(kind, DEFAULT_LIMIT_PERCENT)),
        }
    }

    pub fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    pub fn with_filter(mut self, term: Option<String>) -> Self {
        self.filter_term = term;
        self
    }

    pub fn with_threshold(mut self, threshold: Option<AlertThreshold>) -> Self {
        self.threshold = threshold;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Not live: exactly one tick ran
    OneShot,
    /// A stop was requested (Ctrl+C, q, Esc)
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub ticks: u64,
    pub reason: StopReason,
}

/// Pull and select one tick's samples, and evaluate alerts on the visible subset
pub fn sample_tick<P>(provider: &mut P, config: &LoopConfig) -> Result<(Snapshot, Vec<Breach>)>
where
    P: MetricsProvider + ?Sized,
{
    let snapshot = match config.mode {
        MonitorMode::Cpu => {
            let mut samples = provider.list_processes()?;
            if let Some(term) = &config.filter_term {
                samples = filter_processes(samples, term);
            }
            Snapshot::Processes {
                kind: MetricKind::Cpu,
                samples: top_processes(samples, MetricKind::Cpu, CPU_DISPLAY_LIMIT),
            }
        }
        MonitorMode::Memory => Snapshot::Processes {
            kind: MetricKind::Memory,
            samples: top_processes(
                provider.list_processes()?,
                MetricKind::Memory,
                MEMORY_DISPLAY_LIMIT,
            ),
        },
        MonitorMode::Network => Snapshot::Connections(first_connections(
            provider.list_connections()?,
            NETWORK_DISPLAY_LIMIT,
        )),
        MonitorMode::Disk => Snapshot::Disks(provider.list_disks()?),
        MonitorMode::Summary => Snapshot::Summary(provider.system_info()?),
        MonitorMode::All => {
            let cpu_percent = provider.global_cpu_percent()?;
            let info = provider.system_info()?;
            Snapshot::Overview(Overview {
                cpu_percent,
                memory_percent: info.memory_percent(),
                memory_total_bytes: info.total_memory_bytes,
                disk: provider.list_disks()?.into_iter().next(),
                connections: first_connections(
                    provider.list_connections()?,
                    OVERVIEW_CONNECTION_LIMIT,
                ),
            })
        }
    };

    let breaches = match &snapshot {
        Snapshot::Processes { kind, samples } => {
            evaluate(alert_subset(samples, *kind), config.threshold.as_ref())
        }
        _ => Vec::new(),
    };

    Ok((snapshot, breaches))
}

/// Drives ticks for one `monitor` command.
///
/// The surface is opened when `run` starts and closed on every exit path.
pub struct SamplingLoop<'a, P: MetricsProvider + ?Sized, S: DisplaySurface> {
    config: LoopConfig,
    provider: &'a mut P,
    surface: S,
    renderer: Renderer,
    ticker: Ticker,
    stop: StopSignal,
    ticks: u64,
}

impl<'a, P: MetricsProvider + ?Sized, S: DisplaySurface> SamplingLoop<'a, P, S> {
    pub fn new(
        config: LoopConfig,
        provider: &'a mut P,
        surface: S,
        stop: StopSignal,
        interval: Duration,
    ) -> Self {
        Self {
            config,
            provider,
            surface,
            renderer: Renderer::new(),
            ticker: Ticker::new(interval, stop.clone()),
            stop,
            ticks: 0,
        }
    }

    pub async fn run(mut self) -> Result<LoopReport> {
        log::info!(
            "starting {} monitor (live: {}, interval: {:?})",
            self.config.mode,
            self.config.live,
            self.ticker.interval()
        );

        self.surface.open(&self.stop)?;
        let outcome = self.drive().await;
        let closed = self.surface.close();
        let reason = outcome?;
        closed?;

        log::info!(
            "{} monitor stopped after {} tick(s): {:?}",
            self.config.mode,
            self.ticks,
            reason
        );
        Ok(LoopReport {
            ticks: self.ticks,
            reason,
        })
    }

    async fn drive(&mut self) -> Result<StopReason> {
        loop {
            if self.stop.is_requested() {
                return Ok(StopReason::Interrupted);
            }

            self.tick()?;

            if !self.config.live {
                return Ok(StopReason::OneShot);
            }

            if self.ticker.wait().await == TickWait::Stopped {
                return Ok(StopReason::Interrupted);
            }
        }
    }

    /// One sampling-render-alert cycle
    fn tick(&mut self) -> Result<()> {
        let (snapshot, breaches) = sample_tick(&mut *self.provider, &self.config)?;
        if !breaches.is_empty() {
            log::debug!("{} breach(es) on tick {}", breaches.len(), self.ticks + 1);
        }

        let frame = self.renderer.frame(&snapshot, &breaches);
        self.surface.present(&frame)?;
        self.ticks += 1;
        log::trace!("tick {} presented", self.ticks);
        Ok(())
    }
}
