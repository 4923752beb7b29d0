//! System monitoring core functionality.
//!
//! Sampling of processes, connections, disks and system information, the
//! alert evaluator, and the loop that drives them.

pub mod alerts;
mod collector;
mod metrics;
mod provider;
pub mod sampling;
pub mod selection;
mod ticker;

pub use alerts::{evaluate, AlertThreshold, Breach, DEFAULT_LIMIT_PERCENT};
pub use collector::SystemCollector;
pub use metrics::{
    ConnectionSample, ConnectionStatus, DiskSample, MetricKind, Overview, ProcessSample,
    Snapshot, SystemInfo,
};
pub use provider::MetricsProvider;
pub use sampling::{
    sample_tick, LoopConfig, LoopReport, MonitorMode, SamplingLoop, StopReason,
};
pub use ticker::{StopSignal, TickWait, Ticker, DEFAULT_TICK_INTERVAL};
