//! Event types for the TUI event loop.
//!
//! Events come from the terminal (keys, mouse, resize, focus) and from two
//! timers: a tick for housekeeping such as expiring status messages, and a
//! render signal at the configured frame rate.

use crossterm::event::{KeyEvent, MouseEvent};

/// Events that can be processed by the TUI.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A key press event from the terminal.
    Key(KeyEvent),

    /// A mouse event from the terminal.
    Mouse(MouseEvent),

    /// Terminal window was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Periodic tick.
    ///
    /// The tick rate is configured via [`kk_core::TuiConfig::tick_rate_ms`].
    Tick,

    /// Signal to render a new frame.
    Render,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,
}
