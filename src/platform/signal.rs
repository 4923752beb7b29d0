//! Signal delivery to other processes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("no such process")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("{0}")]
    Other(String),
}

#[cfg(unix)]
fn to_pid(pid: u32) -> Result<libc::pid_t, SignalError> {
    // 0 and negative values address process groups
    match libc::pid_t::try_from(pid) {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(SignalError::NotFound),
    }
}

#[cfg(unix)]
fn send(pid: u32, signal: libc::c_int) -> Result<(), SignalError> {
    let pid = to_pid(pid)?;
    let result = unsafe { libc::kill(pid, signal) };
    if result == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(SignalError::NotFound),
        Some(libc::EPERM) => Err(SignalError::PermissionDenied),
        _ => Err(SignalError::Other(err.to_string())),
    }
}

/// Ask a process to exit (SIGTERM)
#[cfg(unix)]
pub fn terminate(pid: u32) -> Result<(), SignalError> {
    send(pid, libc::SIGTERM)
}

/// Kill a process outright (SIGKILL)
#[cfg(unix)]
pub fn force_kill(pid: u32) -> Result<(), SignalError> {
    send(pid, libc::SIGKILL)
}

#[cfg(unix)]
pub fn is_running(pid: u32) -> bool {
    let alive = match send(pid, 0) {
        Ok(()) | Err(SignalError::PermissionDenied) => true,
        Err(_) => false,
    };
    alive && !is_zombie(pid)
}

#[cfg(target_os = "linux")]
fn is_zombie(pid: u32) -> bool {
    procfs::process::Process::new(pid as i32)
        .and_then(|process| process.stat())
        .map(|stat| stat.state == 'Z')
        .unwrap_or(false)
}

#[cfg(all(unix, not(target_os = "linux")))]
fn is_zombie(_pid: u32) -> bool {
    false
}

#[cfg(not(unix))]
fn with_process<T>(pid: u32, f: impl FnOnce(&sysinfo::Process) -> T) -> Option<T> {
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing(),
    );
    system.process(pid).map(f)
}

#[cfg(not(unix))]
pub fn terminate(pid: u32) -> Result<(), SignalError> {
    let delivered = with_process(pid, |process| {
        process
            .kill_with(sysinfo::Signal::Term)
            .unwrap_or_else(|| process.kill())
    })
    .ok_or(SignalError::NotFound)?;

    if delivered {
        Ok(())
    } else {
        Err(SignalError::Other("terminate request was rejected".to_string()))
    }
}

#[cfg(not(unix))]
pub fn force_kill(pid: u32) -> Result<(), SignalError> {
    let delivered = with_process(pid, |process| process.kill()).ok_or(SignalError::NotFound)?;

    if delivered {
        Ok(())
    } else {
        Err(SignalError::Other("kill request was rejected".to_string()))
    }
}

#[cfg(not(unix))]
pub fn is_running(pid: u32) -> bool {
    with_process(pid, |_| ()).is_some()
}
