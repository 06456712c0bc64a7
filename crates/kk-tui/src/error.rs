//! TUI-specific error types.
//!
//! This module provides the [`TuiError`] type for handling errors
//! that can occur during TUI operations.

use kk_store::StoreError;
use thiserror::Error;

/// Errors that can occur in the TUI.
///
/// Store failures raised by user actions are shown in the status bar and
/// never reach the caller; only terminal and startup failures do.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TuiError {
    /// Terminal initialization or operation failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Event channel was closed unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// Persisted store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TuiError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Non-recoverable errors typically require restarting the TUI.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_recoverable(),
            Self::Terminal(_) | Self::ChannelClosed | Self::Config(_) => false,
        }
    }
}
