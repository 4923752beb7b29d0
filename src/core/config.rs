use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::snapshot_log::DEFAULT_LOG_DIR;
use crate::core::system_monitor::{MetricKind, DEFAULT_LIMIT_PERCENT};

/// Operator settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CPU alert limit for `monitor cpu` (%)
    pub cpu_threshold: f32,
    /// Memory alert limit for `monitor mem` (%)
    pub memory_threshold: f32,
    pub tick_interval_ms: u64,
    /// Grace period between terminate and kill
    pub kill_timeout_secs: u64,
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cpu_threshold: DEFAULT_LIMIT_PERCENT,
            memory_threshold: DEFAULT_LIMIT_PERCENT,
            tick_interval_ms: 1000,
            kill_timeout_secs: 3,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Settings {
    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::debug!("no config directory ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("termwatch").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if !(self.cpu_threshold >= 0.0) || !(self.memory_threshold >= 0.0) {
            anyhow::bail!("thresholds must be non-negative percentages");
        }
        if self.tick_interval_ms == 0 {
            anyhow::bail!("tick_interval_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn threshold_for(&self, kind: MetricKind) -> f32 {
        match kind {
            MetricKind::Cpu => self.cpu_threshold,
            MetricKind::Memory => self.memory_threshold,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn kill_timeout(&self) -> Duration {
        Duration::from_secs(self.kill_timeout_secs)
    }
}
