use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::system_monitor::StopSignal;
use crate::error::{MonitorError, Result};

use super::event_handler::MonitorEvent;
use super::frame::DisplayFrame;
use super::widgets::draw_frame;
use super::DisplaySurface;

const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen ratatui surface for live loops
pub struct TerminalSurface {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    listener: Option<JoinHandle<()>>,
    closed: Arc<AtomicBool>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            terminal: None,
            listener: None,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn stop keys into a stop request until the surface closes
fn spawn_key_listener(stop: StopSignal, closed: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("monitor-keys".to_string())
        .spawn(move || {
            while !closed.load(Ordering::Relaxed) && !stop.is_requested() {
                match event::poll(KEY_POLL_INTERVAL) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if MonitorEvent::from_key(key) == MonitorEvent::Stop {
                                stop.request();
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        log::warn!("key polling failed: {}", e);
                        break;
                    }
                }
            }
        })
}

impl DisplaySurface for TerminalSurface {
    fn open(&mut self, stop: &StopSignal) -> Result<()> {
        enable_raw_mode().map_err(|e| MonitorError::tui(format!("Failed to enable raw mode: {}", e)))?;
        let mut stdout = io::stdout();
        let terminal = execute!(stdout, EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(stdout)));
        let terminal = match terminal {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(MonitorError::tui(format!("Failed to set up terminal: {}", e)));
            }
        };
        self.terminal = Some(terminal);

        self.closed.store(false, Ordering::Relaxed);
        self.listener = Some(spawn_key_listener(stop.clone(), self.closed.clone())?);
        Ok(())
    }

    fn present(&mut self, frame: &DisplayFrame) -> Result<()> {
        let terminal = self
            .terminal
            .as_mut()
            .ok_or_else(|| MonitorError::tui("terminal surface is not open"))?;
        terminal.draw(|f| draw_frame(f, frame))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::Relaxed);
        if let Some(listener) = self.listener.take() {
            let _ = listener.join();
        }

        let Some(mut terminal) = self.terminal.take() else {
            return Ok(());
        };

        // Restore terminal
        disable_raw_mode().map_err(|e| MonitorError::tui(format!("Failed to disable raw mode: {}", e)))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| MonitorError::tui(format!("Failed to leave alternate screen: {}", e)))?;
        terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if self.terminal.is_some() {
            let _ = self.close();
        }
    }
}
