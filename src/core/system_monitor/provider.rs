//! The OS metrics provider seam.

use crate::error::Result;

use super::metrics::{ConnectionSample, DiskSample, ProcessSample, SystemInfo};

/// Point-in-time queries against the host.
///
/// Implementations skip entries that vanish or are unreadable mid-enumeration
/// and return `MonitorError::ProviderUnavailable` only when the OS layer as a
/// whole cannot be reached.
pub trait MetricsProvider {
    fn list_processes(&mut self) -> Result<Vec<ProcessSample>>;

    /// IP sockets that are listening or have a remote peer
    fn list_connections(&mut self) -> Result<Vec<ConnectionSample>>;

    fn list_disks(&mut self) -> Result<Vec<DiskSample>>;

    fn system_info(&mut self) -> Result<SystemInfo>;

    /// Host-wide CPU usage averaged over all cores
    fn global_cpu_percent(&mut self) -> Result<f32>;
}
