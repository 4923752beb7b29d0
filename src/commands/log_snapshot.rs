//! `log <category>`: write one snapshot file

use anyhow::{Context, Result};

use crate::core::snapshot_log::{capture, LogCategory};
use crate::ui::prompts::Notice;

use super::Session;

/// Execute the log command
pub fn execute(session: &mut Session, category: LogCategory) -> Result<()> {
    let lines = capture(session.provider.as_mut(), category)
        .with_context(|| format!("Could not sample {}", category.description().to_lowercase()))?;
    let path = session.logger.write(category, &lines)?;

    session.console.notice(
        Notice::Success,
        &format!("{} saved to {}", category.description(), path.display()),
    );
    Ok(())
}
