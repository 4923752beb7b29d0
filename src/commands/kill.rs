//! `kill <pid>`

use anyhow::Result;

use crate::core::process_control::KillOutcome;
use crate::ui::prompts::Notice;

use super::Session;

/// Execute the kill command. Every outcome is reported, none is an error.
pub fn execute(session: &mut Session, pid: u32) -> Result<()> {
    let outcome = session.killer.kill(pid);
    log::info!("kill {}: {}", pid, outcome);

    let (kind, message) = match outcome {
        KillOutcome::Terminated => (
            Notice::Success,
            format!("Process {} terminated successfully.", pid),
        ),
        KillOutcome::ForceKilled => (
            Notice::Warning,
            format!(
                "Process {} did not terminate within {}s and was killed.",
                pid, session.settings.kill_timeout_secs
            ),
        ),
        KillOutcome::NotFound => (Notice::Error, format!("No process found with PID {}.", pid)),
        KillOutcome::PermissionDenied => (
            Notice::Error,
            format!("Permission denied to terminate PID {}.", pid),
        ),
        KillOutcome::Failed(reason) => (
            Notice::Error,
            format!("Failed to kill process {}: {}", pid, reason),
        ),
    };

    session.console.notice(kind, &message);
    Ok(())
}
