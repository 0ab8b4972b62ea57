//! Debouncer configuration
//!
//! Delays are stored as signed milliseconds so that hand-written config files
//! with a negative value still load; those values clamp to zero.

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::error::Result;

/// Default quiet period in milliseconds
pub const DEFAULT_DELAY_MS: i64 = 300;

/// Debouncer configuration
///
/// ```toml
/// delay_ms = 600
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period before the callback fires (default: 300)
    pub delay_ms: i64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl DebounceConfig {
    /// Parse configuration from TOML text
    ///
    /// Missing keys take their defaults, so an empty document is valid.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AnyResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read debounce config {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse debounce config {}", path.display()))
    }

    /// Effective delay, with negative values clamped to zero
    pub fn delay(&self) -> Duration {
        delay_from_millis(self.delay_ms)
    }
}

/// Convert a signed millisecond count into a delay
///
/// Negative counts are clamped to [`Duration::ZERO`].
pub fn delay_from_millis(ms: i64) -> Duration {
    if ms < 0 {
        warn!("Negative debounce delay {}ms clamped to 0ms", ms);
        return Duration::ZERO;
    }
    Duration::from_millis(ms.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_delay_is_300ms() {
        let config = DebounceConfig::default();
        assert_eq!(config.delay_ms, 300);
        assert_eq!(config.delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DebounceConfig::from_toml_str("").unwrap();
        assert_eq!(config, DebounceConfig::default());
    }

    #[test]
    fn test_custom_delay_overrides_default() {
        let config = DebounceConfig::from_toml_str("delay_ms = 600").unwrap();
        assert_eq!(config.delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_negative_delay_clamps_to_zero() {
        let config = DebounceConfig::from_toml_str("delay_ms = -25").unwrap();
        assert_eq!(config.delay_ms, -25);
        assert_eq!(config.delay(), Duration::ZERO);
        assert_eq!(delay_from_millis(i64::MIN), Duration::ZERO);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let err = DebounceConfig::from_toml_str("delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, crate::DebounceError::Config(_)));
    }

    #[test]
    fn test_load_from_file() -> AnyResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("debounce.toml");
        fs::write(&path, "delay_ms = 150\n")?;

        let config = DebounceConfig::load(&path)?;
        assert_eq!(config.delay(), Duration::from_millis(150));
        Ok(())
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = DebounceConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
