use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::core::system_monitor::StopSignal;
use crate::error::Result;

use super::frame::{Accent, AlertBanner, Align, DisplayFrame, FrameBody, Panel, TableView};
use super::DisplaySurface;

/// Prints each frame once as plain, colored text. Used for one-shot views.
pub struct ConsoleSurface<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn paint(text: &str, accent: Option<Accent>) -> ColoredString {
    match accent {
        Some(Accent::Cyan) => text.cyan(),
        Some(Accent::Green) => text.green(),
        Some(Accent::Magenta) => text.magenta(),
        Some(Accent::Yellow) => text.yellow(),
        None => text.normal(),
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

/// Render a table as lines of padded text; breaching rows in bold red
pub fn table_lines(view: &TableView) -> Vec<String> {
    let widths: Vec<usize> = view
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            view.rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(column.header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = view
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| pad(column.header, width, column.align).bold().to_string())
        .collect::<Vec<_>>()
        .join("  ");

    let separator = widths
        .iter()
        .map(|&width| "─".repeat(width))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![header, separator.dimmed().to_string()];
    for row in &view.rows {
        let cells = row
            .cells
            .iter()
            .zip(view.columns.iter().zip(&widths))
            .map(|(cell, (column, &width))| {
                let text = pad(cell, width, column.align);
                if row.breach {
                    text.red().bold().to_string()
                } else {
                    paint(&text, column.accent).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(cells);
    }
    lines
}

fn panel_lines(panels: &[Panel]) -> Vec<String> {
    let mut lines = Vec::new();
    for panel in panels {
        lines.push(paint(&format!("[ {} ]", panel.title), Some(panel.accent)).bold().to_string());
        for body_line in panel.body.lines() {
            lines.push(format!("  {}", paint(body_line, Some(panel.accent))));
        }
    }
    lines
}

fn banner_lines(banner: &AlertBanner) -> Vec<String> {
    let mut lines = vec![format!("⚠️ {}:", banner.heading).red().bold().to_string()];
    lines.extend(banner.lines.iter().map(|line| line.red().to_string()));
    lines
}

impl<W: Write> DisplaySurface for ConsoleSurface<W> {
    fn open(&mut self, _stop: &StopSignal) -> Result<()> {
        Ok(())
    }

    fn present(&mut self, frame: &DisplayFrame) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", frame.title.bold().bright_cyan())?;

        let body = match &frame.body {
            FrameBody::Table(view) => table_lines(view),
            FrameBody::Panels(panels) => panel_lines(panels),
        };
        for line in body {
            writeln!(self.out, "{}", line)?;
        }

        if let Some(banner) = &frame.banner {
            writeln!(self.out)?;
            for line in banner_lines(banner) {
                writeln!(self.out, "{}", line)?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
