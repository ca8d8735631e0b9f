//! Window configuration — TOML-friendly duration strings.
//!
//! ```toml
//! duration = "5m"
//! granularity = "60s"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WindowError, WindowResult};
use crate::time_window::TimeWindow;

/// Trailing span and bucket width of a [`TimeWindow`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    /// How far back samples are retained (e.g., "5m").
    pub duration: String,
    /// Width of one bucket (e.g., "60s").
    pub granularity: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            duration: "5m".to_string(),
            granularity: "60s".to_string(),
        }
    }
}

impl WindowConfig {
    pub fn from_toml_str(s: &str) -> WindowResult<Self> {
        toml::from_str(s).map_err(|e| WindowError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> WindowResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WindowError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> WindowResult<String> {
        toml::to_string_pretty(self).map_err(|e| WindowError::Config(e.to_string()))
    }

    /// Parsed `(duration, granularity)`.
    pub fn durations(&self) -> WindowResult<(Duration, Duration)> {
        let duration = parse_duration(&self.duration)
            .ok_or_else(|| WindowError::InvalidDuration(self.duration.clone()))?;
        let granularity = parse_duration(&self.granularity)
            .ok_or_else(|| WindowError::InvalidDuration(self.granularity.clone()))?;
        Ok((duration, granularity))
    }

    /// Construct the configured window.
    pub fn build(&self) -> WindowResult<TimeWindow> {
        let (duration, granularity) = self.durations()?;
        TimeWindow::new(duration, granularity)
    }
}

/// Parse a duration string like "500ms", "30s", "5m", "1h" or "10" (seconds).
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else if let Some(hours) = s.strip_suffix('h') {
        hours
            .parse::<u64>()
            .ok()
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
