use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::frame::{Accent, AlertBanner, Align, DisplayFrame, FrameBody, Panel, TableView};

pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Cyan => Color::Cyan,
        Accent::Green => Color::Green,
        Accent::Magenta => Color::Magenta,
        Accent::Yellow => Color::Yellow,
    }
}

fn breach_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
}

/// Draw a whole display frame: banner (if any), body, footer
pub fn draw_frame(frame: &mut Frame, display: &DisplayFrame) {
    let area = frame.area();

    let banner_height = display
        .banner
        .as_ref()
        .map(|banner| (banner.lines.len().min(5) + 3) as u16)
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Body
            Constraint::Length(banner_height), // Alerts banner
            Constraint::Length(1),             // Footer
        ])
        .split(area);

    match &display.body {
        FrameBody::Table(table) => draw_table(frame, chunks[0], &display.title, table),
        FrameBody::Panels(panels) => draw_panels(frame, chunks[0], &display.title, panels),
    }

    if let Some(banner) = &display.banner {
        draw_banner(frame, chunks[1], banner);
    }

    let footer = Paragraph::new(" q / Esc / Ctrl+C: stop monitoring ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);
}

fn draw_table(frame: &mut Frame, area: Rect, title: &str, view: &TableView) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL);

    let header = Row::new(view.columns.iter().map(|column| {
        Cell::from(aligned(column.header.to_string(), column.align))
            .style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            let cells = row.cells.iter().zip(&view.columns).map(|(text, column)| {
                let style = match column.accent {
                    Some(accent) => Style::default().fg(accent_color(accent)),
                    None => Style::default(),
                };
                Cell::from(aligned(text.clone(), column.align)).style(style)
            });
            let row_widget = Row::new(cells);
            if row.breach {
                row_widget.style(breach_style())
            } else {
                row_widget
            }
        })
        .collect();

    let table = Table::new(rows, column_widths(view))
        .header(header)
        .block(block);
    frame.render_widget(table, area);
}

fn aligned(text: String, align: Align) -> Line<'static> {
    let line = Line::from(text);
    match align {
        Align::Left => line.alignment(Alignment::Left),
        Align::Right => line.alignment(Alignment::Right),
    }
}

fn column_widths(view: &TableView) -> Vec<Constraint> {
    view.columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let widest = view
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(column.header.width()))
                .max()
                .unwrap_or(0);
            Constraint::Length(widest as u16 + 1)
        })
        .collect()
}

fn draw_panels(frame: &mut Frame, area: Rect, title: &str, panels: &[Panel]) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if panels.is_empty() {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, panels.len() as u32); panels.len()])
        .split(inner);

    for (panel, slot) in panels.iter().zip(columns.iter()) {
        let color = accent_color(panel.accent);
        let widget = Paragraph::new(panel.body.clone())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(format!(" {} ", panel.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(widget, *slot);
    }
}

fn draw_banner(frame: &mut Frame, area: Rect, banner: &AlertBanner) {
    let block = Block::default()
        .title(format!(" ⚠ {} ", banner.heading))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text: Vec<Line> = banner
        .lines
        .iter()
        .map(|line| Line::from(line.clone()).style(breach_style()))
        .collect();

    frame.render_widget(Paragraph::new(text).block(block), area);
}
