// Core monitoring logic

pub mod config;
pub mod process_control;
pub mod snapshot_log;
pub mod system_monitor;

// Re-export commonly used items
pub use config::Settings;
pub use process_control::{KillOutcome, OsProcessControl, ProcessControl, ProcessKiller};
pub use snapshot_log::{LogCategory, SnapshotLogger};
