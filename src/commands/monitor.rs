//! `monitor <mode> [--live] [--filter <term>]`

use anyhow::{Context, Result};

use crate::core::system_monitor::{AlertThreshold, LoopConfig, MonitorMode, StopReason};
use crate::ui::prompts::Notice;

use super::{MonitorArgs, Session};

/// Execute the monitor command
pub fn execute(session: &mut Session, args: &MonitorArgs) -> Result<()> {
    let mut filter = args.filter.clone();
    if filter.is_some() && args.mode != MonitorMode::Cpu {
        session.console.notice(
            Notice::Warning,
            &format!("--filter only applies to 'monitor cpu', ignoring it for '{}'", args.mode),
        );
        filter = None;
    }

    let threshold = args
        .mode
        .alert_metric()
        .map(|kind| AlertThreshold::new(kind, session.settings.threshold_for(kind)));

    let config = LoopConfig::new(args.mode)
        .live(args.live)
        .with_filter(filter)
        .with_threshold(threshold);

    let report = session
        .run_loop(config)
        .with_context(|| format!("{} monitor failed", args.mode))?;

    if report.reason == StopReason::Interrupted {
        session
            .console
            .notice(Notice::Info, &format!("Exiting {} monitor...", args.mode));
    }
    Ok(())
}
