//! `search <term>`

use anyhow::Result;

use crate::core::system_monitor::selection::{filter_processes, top_processes, SEARCH_LIMIT};
use crate::core::system_monitor::MetricKind;
use crate::ui::monitor_tui::Renderer;
use crate::ui::prompts::Notice;

use super::Session;

/// Execute the search command over the busiest processes
pub fn execute(session: &mut Session, term: &str) -> Result<()> {
    let busiest = top_processes(
        session.provider.list_processes()?,
        MetricKind::Cpu,
        SEARCH_LIMIT,
    );
    let matches = filter_processes(busiest, term);

    if matches.is_empty() {
        session
            .console
            .notice(Notice::Info, &format!("No matches for '{}'", term));
        return Ok(());
    }

    let frame = Renderer::new().search_results(term, &matches);
    session.show_once(&frame)
}
