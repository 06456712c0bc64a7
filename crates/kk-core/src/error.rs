//! Error types for the kk-core crate.
//!
//! This module provides [`ConfigError`] for configuration loading and
//! validation, and [`DraftError`] for rejected recipe form input.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use kk_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "tui.tick_rate_ms".to_owned(),
///     reason: "must be positive".to_owned(),
/// };
/// assert!(error.to_string().contains("tick_rate_ms"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    NotFound(Utf8PathBuf),

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Errors produced when a recipe form submission cannot become a recipe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DraftError {
    /// The recipe name was empty or whitespace only.
    #[error("recipe name must not be empty")]
    EmptyName,
}
