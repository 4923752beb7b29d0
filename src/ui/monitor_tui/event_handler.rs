use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events that can occur while a live monitor is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Stop the running loop and return to the prompt
    Stop,
    /// No action
    None,
}

impl MonitorEvent {
    /// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key press
    pub fn from_key(key: KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return MonitorEvent::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Stop,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                MonitorEvent::Stop
            }
            _ => MonitorEvent::None,
        }
    }
}
