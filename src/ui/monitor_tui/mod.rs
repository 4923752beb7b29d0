//! Display surfaces for the sampling loop.
//!
//! A `Renderer` builds surface-independent `DisplayFrame`s; a `DisplaySurface`
//! shows them. Live loops draw full screen through ratatui, one-shot views are
//! printed to stdout.

mod console;
mod event_handler;
pub mod frame;
mod render;
mod terminal;
mod widgets;

pub use console::{table_lines, ConsoleSurface};
pub use event_handler::MonitorEvent;
pub use frame::{AlertBanner, DisplayFrame, FrameBody, Panel, TableRow, TableView};
pub use render::Renderer;
pub use terminal::TerminalSurface;

use crate::core::system_monitor::StopSignal;
use crate::error::Result;

/// Where frames end up. Opened when a loop starts and closed when it stops.
pub trait DisplaySurface {
    fn open(&mut self, stop: &StopSignal) -> Result<()>;
    fn present(&mut self, frame: &DisplayFrame) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn open(&mut self, stop: &StopSignal) -> Result<()> {
        (**self).open(stop)
    }

    fn present(&mut self, frame: &DisplayFrame) -> Result<()> {
        (**self).present(frame)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Creates a fresh surface for every loop or one-shot view
pub trait SurfaceFactory {
    fn create(&self, live: bool) -> Box<dyn DisplaySurface>;
}

/// Terminal surface for live loops, console surface otherwise
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSurfaces;

impl SurfaceFactory for DefaultSurfaces {
    fn create(&self, live: bool) -> Box<dyn DisplaySurface> {
        if live {
            Box::new(TerminalSurface::new())
        } else {
            Box::new(ConsoleSurface::stdout())
        }
    }
}
