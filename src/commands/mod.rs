//! Session commands: the typed grammar and one handler per verb.

pub mod kill;
pub mod log_snapshot;
pub mod monitor;
pub mod search;
pub mod session;

pub use session::{Flow, InterruptHandle, Session};

use thiserror::Error;

use crate::core::snapshot_log::LogCategory;
use crate::core::system_monitor::MonitorMode;

pub const MONITOR_USAGE: &str = "monitor <cpu|mem|net|disk|summary|all> [--live] [--filter <term>]";
pub const LOG_USAGE: &str = "log <summary|cpu|mem|net|disk>";
pub const KILL_USAGE: &str = "kill <pid>";
pub const SEARCH_USAGE: &str = "search <term>";

pub const HELP_TEXT: &str = "\
Commands:
  monitor <cpu|mem|net|disk|summary|all> [--live] [--filter <term>]
      Show a view once, or keep refreshing it with --live (q, Esc or Ctrl+C stops).
      --filter narrows the cpu view to matching process names, or to one pid.
  log <summary|cpu|mem|net|disk>
      Write one snapshot to a timestamped file in the log directory.
  kill <pid>
      Ask a process to terminate, and kill it if it is still running after the timeout.
  search <term>
      List processes whose name contains the term, or whose pid equals it.
  help
      Show this reference.
  exit | quit
      Leave the session.";

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorArgs {
    pub mode: MonitorMode,
    pub live: bool,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Monitor(MonitorArgs),
    Log(LogCategory),
    Kill(u32),
    Search(String),
    Help,
    Exit,
}

/// Usage errors. The session prints them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    UnknownCommand(String),

    #[error("Missing argument. Usage: {0}")]
    MissingTarget(&'static str),

    #[error("Unknown target '{target}'. Usage: {usage}")]
    UnknownTarget { target: String, usage: &'static str },

    #[error("--filter needs a search term. Usage: {usage}", usage = MONITOR_USAGE)]
    MissingFilterTerm,

    #[error("Unknown option '{0}'. Usage: {usage}", usage = MONITOR_USAGE)]
    UnknownFlag(String),

    #[error("'{0}' is not a valid PID. Usage: {usage}", usage = KILL_USAGE)]
    InvalidPid(String),

    #[error("Unexpected argument '{argument}'. Usage: {usage}")]
    UnexpectedArgument {
        argument: String,
        usage: &'static str,
    },
}

impl Command {
    /// Parse one input line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = tokens.collect();

        let command = match verb.to_lowercase().as_str() {
            "monitor" => Command::Monitor(parse_monitor(&rest)?),
            "log" => Command::Log(parse_log(&rest)?),
            "kill" => Command::Kill(parse_kill(&rest)?),
            "search" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingTarget(SEARCH_USAGE));
                }
                Command::Search(rest.join(" "))
            }
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(ParseError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_monitor(args: &[&str]) -> Result<MonitorArgs, ParseError> {
    let (target, flags) = args
        .split_first()
        .ok_or(ParseError::MissingTarget(MONITOR_USAGE))?;
    let mode = target
        .parse::<MonitorMode>()
        .map_err(|_| ParseError::UnknownTarget {
            target: target.to_string(),
            usage: MONITOR_USAGE,
        })?;

    let mut parsed = MonitorArgs {
        mode,
        live: false,
        filter: None,
    };

    let mut flags = flags.iter().peekable();
    while let Some(flag) = flags.next() {
        match flag.to_lowercase().as_str() {
            "--live" => parsed.live = true,
            "--filter" => {
                // The term runs to the next flag, so names may contain spaces
                let mut words = Vec::new();
                while let Some(word) = flags.next_if(|word| !word.starts_with("--")) {
                    words.push(*word);
                }
                if words.is_empty() {
                    return Err(ParseError::MissingFilterTerm);
                }
                parsed.filter = Some(words.join(" "));
            }
            other if other.starts_with("--") => {
                return Err(ParseError::UnknownFlag(flag.to_string()))
            }
            _ => {
                return Err(ParseError::UnexpectedArgument {
                    argument: flag.to_string(),
                    usage: MONITOR_USAGE,
                })
            }
        }
    }

    Ok(parsed)
}

fn parse_log(args: &[&str]) -> Result<LogCategory, ParseError> {
    match args {
        [] => Err(ParseError::MissingTarget(LOG_USAGE)),
        [target] => target.parse().map_err(|_| ParseError::UnknownTarget {
            target: target.to_string(),
            usage: LOG_USAGE,
        }),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument {
            argument: extra.to_string(),
            usage: LOG_USAGE,
        }),
    }
}

fn parse_kill(args: &[&str]) -> Result<u32, ParseError> {
    match args {
        [] => Err(ParseError::MissingTarget(KILL_USAGE)),
        [pid] if pid.chars().all(|c| c.is_ascii_digit()) => pid
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidPid(pid.to_string())),
        [pid] => Err(ParseError::InvalidPid(pid.to_string())),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument {
            argument: extra.to_string(),
            usage: KILL_USAGE,
        }),
    }
}
