// UI and formatting module

pub mod formatters;
pub mod monitor_tui;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_percent, format_size};
pub use prompts::{error, info, success, warn, Console, Notice, StdoutConsole};
