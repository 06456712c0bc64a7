//! Configuration structures for kitchen-kompanion.
//!
//! - [`StoreConfig`] - Where the persisted key-value store lives
//! - [`TuiConfig`] - Terminal UI settings (tick rate, frame rate, colors)
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] and deserialize with
//! `#[serde(default)]`, so a config file only needs the keys it overrides.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// File name of the store document when no path is configured.
pub const DEFAULT_STORE_FILE: &str = "kitchen-kompanion.json";

/// Color scheme for the TUI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ColorScheme {
    /// Automatically detect based on terminal settings.
    #[default]
    Auto,
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
}

/// Configuration for the persisted store.
///
/// # Examples
///
/// ```
/// use kk_core::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.path, "kitchen-kompanion.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the JSON document holding every store key.
    pub path: Utf8PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Utf8PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

/// Configuration for the terminal user interface.
///
/// # Examples
///
/// ```
/// use kk_core::{TuiConfig, ColorScheme};
///
/// let config = TuiConfig::default();
/// assert_eq!(config.tick_rate_ms, 250);
/// assert_eq!(config.color_scheme, ColorScheme::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds (status message expiry, housekeeping).
    pub tick_rate_ms: u64,

    /// Render rate in frames per second.
    pub frame_rate: u32,

    /// Color scheme for the interface.
    pub color_scheme: ColorScheme,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30,
            color_scheme: ColorScheme::Auto,
        }
    }
}

/// Root configuration for kitchen-kompanion.
///
/// # Examples
///
/// ```
/// use kk_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"tui": {"frame_rate": 60}}"#).unwrap();
/// assert_eq!(config.tui.frame_rate, 60);
/// assert_eq!(config.tui.tick_rate_ms, 250);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted store configuration.
    pub store: StoreConfig,

    /// Terminal UI configuration.
    pub tui: TuiConfig,
}

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file is missing,
    /// [`ConfigError::Parse`] if it is not valid JSON for [`Config`], and
    /// [`ConfigError::InvalidOption`] if a value fails validation.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_owned()));
        }

        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;

        debug!(path = %path, store = %config.store.path, "Loaded configuration");
        Ok(config)
    }

    /// Checks option values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.as_str().is_empty() {
            return Err(ConfigError::invalid_option("store.path", "must not be empty"));
        }
        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigError::invalid_option(
                "tui.tick_rate_ms",
                "must be positive",
            ));
        }
        if self.tui.frame_rate == 0 {
            return Err(ConfigError::invalid_option("tui.frame_rate", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.path, Utf8PathBuf::from(DEFAULT_STORE_FILE));
    }

    #[test]
    fn test_tui_config_defaults() {
        let config = TuiConfig::default();
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.color_scheme, ColorScheme::Auto);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"store": {"path": "/var/lib/kk/store.json"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store.path, "/var/lib/kk/store.json");
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_color_scheme_serialization() {
        assert_eq!(
            serde_json::to_string(&ColorScheme::Auto).unwrap(),
            r#""auto""#
        );
        assert_eq!(
            serde_json::to_string(&ColorScheme::Light).unwrap(),
            r#""light""#
        );
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        let mut config = Config::default();
        config.tui.tick_rate_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOption { ref option, .. }) if option == "tui.tick_rate_ms"
        ));

        let mut config = Config::default();
        config.tui.frame_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(Utf8Path::new("/nonexistent/kk-config.json"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("kk.json")).unwrap();
        std::fs::write(&path, r#"{"tui": {"color_scheme": "light"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.tui.color_scheme, ColorScheme::Light);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("kk.json")).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse(_))));
    }
}
