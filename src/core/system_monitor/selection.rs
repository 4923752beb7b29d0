//! Filtering, ordering and truncation rules applied to each tick's samples.

use std::cmp::Ordering;

use super::metrics::{ConnectionSample, MetricKind, ProcessSample};

/// Rows shown by the CPU monitor
pub const CPU_DISPLAY_LIMIT: usize = 20;
/// Rows the CPU monitor raises alerts on
pub const CPU_ALERT_LIMIT: usize = 5;
/// Rows shown (and alerted on) by the memory monitor
pub const MEMORY_DISPLAY_LIMIT: usize = 5;
pub const NETWORK_DISPLAY_LIMIT: usize = 10;
/// Connections listed in the combined view
pub const OVERVIEW_CONNECTION_LIMIT: usize = 3;
/// Processes considered by `search`
pub const SEARCH_LIMIT: usize = 100;

/// Whether a process matches a filter term.
///
/// A purely numeric term is a pid and must equal the pid exactly. Anything
/// else is a case-insensitive substring of the process name.
pub fn matches_term(sample: &ProcessSample, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    if term.chars().all(|c| c.is_ascii_digit()) {
        return sample.pid.to_string() == term;
    }

    sample.name.to_lowercase().contains(&term.to_lowercase())
}

pub fn filter_processes(samples: Vec<ProcessSample>, term: &str) -> Vec<ProcessSample> {
    samples
        .into_iter()
        .filter(|sample| matches_term(sample, term))
        .collect()
}

/// Sort descending by the selected metric. Ties keep provider order.
pub fn sort_descending(samples: &mut [ProcessSample], kind: MetricKind) {
    samples.sort_by(|a, b| {
        kind.of(b)
            .partial_cmp(&kind.of(a))
            .unwrap_or(Ordering::Equal)
    });
}

pub fn top_processes(
    mut samples: Vec<ProcessSample>,
    kind: MetricKind,
    limit: usize,
) -> Vec<ProcessSample> {
    sort_descending(&mut samples, kind);
    samples.truncate(limit);
    samples
}

pub fn first_connections(mut connections: Vec<ConnectionSample>, limit: usize) -> Vec<ConnectionSample> {
    connections.truncate(limit);
    connections
}

/// The leading rows thresholds are enforced on
pub fn alert_subset(samples: &[ProcessSample], kind: MetricKind) -> &[ProcessSample] {
    let limit = match kind {
        MetricKind::Cpu => CPU_ALERT_LIMIT,
        MetricKind::Memory => MEMORY_DISPLAY_LIMIT,
    };
    &samples[..samples.len().min(limit)]
}
