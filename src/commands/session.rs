//! Interactive session: read a line, parse it, run it, repeat.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio::runtime::{Builder, Runtime};

use crate::core::config::Settings;
use crate::core::process_control::{OsProcessControl, ProcessControl, ProcessKiller};
use crate::core::snapshot_log::SnapshotLogger;
use crate::core::system_monitor::{
    LoopConfig, LoopReport, MetricsProvider, SamplingLoop, StopSignal, SystemCollector,
};
use crate::ui::monitor_tui::{DefaultSurfaces, DisplayFrame, DisplaySurface, SurfaceFactory};
use crate::ui::prompts::{Console, Notice, StdoutConsole};

use super::{kill, log_snapshot, monitor, search, Command, HELP_TEXT};

const BANNER: &str = "=== termwatch: terminal system monitor ===";
const COMMAND_SUMMARY: &str = "Commands: monitor <cpu|mem|net|disk|summary|all> [--live] [--filter <term>] | log <summary|cpu|mem|net|disk> | kill <pid> | search <term> | help | exit";
const PROMPT: &str = ">> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Routes Ctrl+C to whichever loop is running. Cloned into the ctrlc handler.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle {
    active: Arc<Mutex<Option<StopSignal>>>,
}

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the running loop. Returns false when no loop is running.
    pub fn interrupt(&self) -> bool {
        match self.active.lock().as_ref() {
            Some(stop) => {
                stop.request();
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.active.lock().is_some()
    }

    fn arm(&self, stop: StopSignal) {
        *self.active.lock() = Some(stop);
    }

    fn disarm(&self) {
        self.active.lock().take();
    }
}

pub struct Session {
    pub(super) provider: Box<dyn MetricsProvider>,
    pub(super) killer: ProcessKiller<Box<dyn ProcessControl>>,
    pub(super) surfaces: Box<dyn SurfaceFactory>,
    pub(super) console: Box<dyn Console>,
    pub(super) settings: Settings,
    pub(super) logger: SnapshotLogger,
    runtime: Runtime,
    interrupts: InterruptHandle,
}

impl Session {
    /// Session against the local machine, printing to stdout
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_parts(
            settings,
            Box::new(SystemCollector::new()),
            Box::new(OsProcessControl),
            Box::new(DefaultSurfaces),
            Box::new(StdoutConsole),
        )
    }

    pub fn with_parts(
        settings: Settings,
        provider: Box<dyn MetricsProvider>,
        control: Box<dyn ProcessControl>,
        surfaces: Box<dyn SurfaceFactory>,
        console: Box<dyn Console>,
    ) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to start the sampling runtime")?;

        Ok(Self {
            killer: ProcessKiller::with_timeout(control, settings.kill_timeout()),
            logger: SnapshotLogger::new(settings.log_dir.clone()),
            provider,
            surfaces,
            console,
            settings,
            runtime,
            interrupts: InterruptHandle::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupts.clone()
    }

    /// Interactive loop until `exit` or end of input
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        self.console.plain(BANNER);
        self.console.plain(COMMAND_SUMMARY);

        loop {
            self.console.prompt(PROMPT);

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .context("Failed to read command")?;
            if read == 0 {
                self.console.plain("");
                self.console.notice(Notice::Info, "Input ended. Exiting...");
                return Ok(());
            }

            if self.handle_line(&line) == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Run one line. Usage and command errors are reported, never returned.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(None) => Flow::Continue,
            Ok(Some(command)) => self.dispatch(command),
            Err(e) => {
                self.console.notice(Notice::Error, &e.to_string());
                Flow::Continue
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Flow {
        log::debug!("dispatching {:?}", command);

        let result = match command {
            Command::Exit => {
                self.console.notice(Notice::Info, "Goodbye!");
                return Flow::Exit;
            }
            Command::Help => {
                self.console.plain(HELP_TEXT);
                Ok(())
            }
            Command::Monitor(args) => monitor::execute(self, &args),
            Command::Log(category) => log_snapshot::execute(self, category),
            Command::Kill(pid) => kill::execute(self, pid),
            Command::Search(term) => search::execute(self, &term),
        };

        if let Err(e) = result {
            log::debug!("command failed: {:?}", e);
            self.console.notice(Notice::Error, &format!("{:#}", e));
        }
        Flow::Continue
    }

    /// Block on a sampling loop. Ctrl+C is routed to it while it runs.
    pub(super) fn run_loop(&mut self, config: LoopConfig) -> Result<LoopReport> {
        let stop = StopSignal::new();
        let surface = self.surfaces.create(config.live);
        let interval = self.settings.tick_interval();

        self.interrupts.arm(stop.clone());
        let sampling = SamplingLoop::new(config, self.provider.as_mut(), surface, stop, interval);
        let result = self.runtime.block_on(sampling.run());
        self.interrupts.disarm();

        Ok(result?)
    }

    /// Print a single frame outside of any loop
    pub(super) fn show_once(&mut self, frame: &DisplayFrame) -> Result<()> {
        let mut surface = self.surfaces.create(false);
        surface.open(&StopSignal::new())?;
        let presented = surface.present(frame);
        surface.close()?;
        Ok(presented?)
    }
}
