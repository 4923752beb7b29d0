use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use colored::*;
use std::io;
use std::path::PathBuf;

use termwatch::{Flow, Session, Settings};

fn main() -> Result<()> {
    let matches = Command::new("termwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive terminal dashboard for processes, connections and disks")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Settings file (defaults to the user config directory)")
                .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .value_name("DIR")
                .help("Directory for 'log' snapshots (default: logs)")
                .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("command")
                .short('c')
                .long("command")
                .value_name("LINE")
                .help("Run a session command and exit; repeat to run several in order")
                .action(ArgAction::Append)
        )
        .get_matches();

    if matches.get_flag("version") {
        println!("termwatch version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    termwatch::init_logging();

    let mut settings = match matches.get_one::<PathBuf>("config") {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(dir) = matches.get_one::<PathBuf>("log-dir") {
        settings.log_dir = dir.clone();
    }
    log::debug!("settings: {:?}", settings);

    let mut session = Session::new(settings)?;

    // While a loop runs Ctrl+C stops it; at the prompt it ends the session
    let interrupts = session.interrupt_handle();
    ctrlc::set_handler(move || {
        if !interrupts.interrupt() {
            println!();
            println!("{}", "Keyboard interrupt detected. Exiting...".yellow());
            std::process::exit(0);
        }
    })
    .context("Failed to set Ctrl+C handler")?;

    if let Some(lines) = matches.get_many::<String>("command") {
        for line in lines {
            if session.handle_line(line) == Flow::Exit {
                break;
            }
        }
        return Ok(());
    }

    session.run(io::stdin().lock())
}
