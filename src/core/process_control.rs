//! Graceful-then-forceful process termination.

use std::fmt;
use std::time::{Duration, Instant};

use crate::platform::signal::{self, SignalError};

/// How long a terminated process gets to exit before it is killed
pub const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(3);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Low-level process operations, swappable for tests
pub trait ProcessControl {
    fn terminate(&mut self, pid: u32) -> Result<(), SignalError>;
    fn force_kill(&mut self, pid: u32) -> Result<(), SignalError>;
    fn is_running(&mut self, pid: u32) -> bool;
}

impl<C: ProcessControl + ?Sized> ProcessControl for Box<C> {
    fn terminate(&mut self, pid: u32) -> Result<(), SignalError> {
        (**self).terminate(pid)
    }

    fn force_kill(&mut self, pid: u32) -> Result<(), SignalError> {
        (**self).force_kill(pid)
    }

    fn is_running(&mut self, pid: u32) -> bool {
        (**self).is_running(pid)
    }
}

/// Signals delivered to real OS processes
#[derive(Debug, Default)]
pub struct OsProcessControl;

impl ProcessControl for OsProcessControl {
    fn terminate(&mut self, pid: u32) -> Result<(), SignalError> {
        signal::terminate(pid)
    }

    fn force_kill(&mut self, pid: u32) -> Result<(), SignalError> {
        signal::force_kill(pid)
    }

    fn is_running(&mut self, pid: u32) -> bool {
        signal::is_running(pid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    /// Exited after the graceful request
    Terminated,
    /// Ignored the graceful request and was killed after the timeout
    ForceKilled,
    NotFound,
    PermissionDenied,
    Failed(String),
}

impl KillOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, KillOutcome::Terminated | KillOutcome::ForceKilled)
    }
}

impl fmt::Display for KillOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KillOutcome::Terminated => write!(f, "terminated"),
            KillOutcome::ForceKilled => write!(f, "killed after timeout"),
            KillOutcome::NotFound => write!(f, "not found"),
            KillOutcome::PermissionDenied => write!(f, "permission denied"),
            KillOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Runs the terminate -> wait -> kill sequence against a `ProcessControl`
pub struct ProcessKiller<C: ProcessControl> {
    control: C,
    timeout: Duration,
}

impl<C: ProcessControl> ProcessKiller<C> {
    pub fn new(control: C) -> Self {
        Self::with_timeout(control, DEFAULT_KILL_TIMEOUT)
    }

    pub fn with_timeout(control: C, timeout: Duration) -> Self {
        Self { control, timeout }
    }

    pub fn kill(&mut self, pid: u32) -> KillOutcome {
        log::info!("terminating pid {}", pid);

        match self.control.terminate(pid) {
            Ok(()) => {}
            Err(SignalError::NotFound) => return KillOutcome::NotFound,
            Err(SignalError::PermissionDenied) => return KillOutcome::PermissionDenied,
            Err(SignalError::Other(reason)) => return KillOutcome::Failed(reason),
        }

        if self.wait_for_exit(pid) {
            return KillOutcome::Terminated;
        }

        log::warn!(
            "pid {} still running after {:?}, sending kill",
            pid,
            self.timeout
        );
        match self.control.force_kill(pid) {
            Ok(()) => KillOutcome::ForceKilled,
            // Exited between the last poll and the kill
            Err(SignalError::NotFound) => KillOutcome::Terminated,
            Err(SignalError::PermissionDenied) => KillOutcome::PermissionDenied,
            Err(SignalError::Other(reason)) => KillOutcome::Failed(reason),
        }
    }

    fn wait_for_exit(&mut self, pid: u32) -> bool {
        let deadline = Instant::now() + self.timeout;
        loop {
            if !self.control.is_running(pid) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}
