//! Alert system for per-process thresholds.
//!
//! Compares process samples against a configured threshold and yields breaches.

use serde::{Deserialize, Serialize};

use super::metrics::{MetricKind, ProcessSample};

/// Default limit for both CPU and memory monitors (%)
pub const DEFAULT_LIMIT_PERCENT: f32 = 50.0;

/// Threshold supplied at loop start, fixed for the loop's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    pub metric_kind: MetricKind,
    pub limit_percent: f32,
}

impl AlertThreshold {
    pub fn new(metric_kind: MetricKind, limit_percent: f32) -> Self {
        Self {
            metric_kind,
            limit_percent,
        }
    }

    pub fn is_breached_by(&self, sample: &ProcessSample) -> bool {
        self.metric_kind.of(sample) > self.limit_percent
    }
}

/// A single observation over its threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub subject: ProcessSample,
    pub metric_kind: MetricKind,
    pub observed_percent: f32,
}

/// Evaluate samples against a threshold, preserving input order.
///
/// A sample breaches only when its selected field is strictly greater than
/// the limit. Without a threshold nothing breaches.
pub fn evaluate(samples: &[ProcessSample], threshold: Option<&AlertThreshold>) -> Vec<Breach> {
    let Some(threshold) = threshold else {
        return Vec::new();
    };

    samples
        .iter()
        .filter(|sample| threshold.is_breached_by(sample))
        .map(|sample| Breach {
            subject: sample.clone(),
            metric_kind: threshold.metric_kind,
            observed_percent: threshold.metric_kind.of(sample),
        })
        .collect()
}
