// Operator-facing notices and the session prompt

use colored::Colorize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Info,
    Warning,
    Error,
}

/// Sink for everything the session says to the operator outside of frames
pub trait Console {
    fn notice(&mut self, kind: Notice, message: &str);

    /// Uncoloured text such as the command reference
    fn plain(&mut self, text: &str);

    fn prompt(&mut self, text: &str);
}

/// Colored output on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn notice(&mut self, kind: Notice, message: &str) {
        match kind {
            Notice::Success => success(message),
            Notice::Info => info(message),
            Notice::Warning => warn(message),
            Notice::Error => error(message),
        }
    }

    fn plain(&mut self, text: &str) {
        println!("{}", text);
    }

    fn prompt(&mut self, text: &str) {
        print!("{}", text.white().bold());
        let _ = io::stdout().flush();
    }
}

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", message.green().bold());
}

/// Display an error message
pub fn error(message: &str) {
    println!("{}", message.red().bold());
}
