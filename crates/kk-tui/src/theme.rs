//! Theme and styling for the TUI.
//!
//! Supports dark and light color schemes. Allergy warnings and the
//! "safe" allergy filter indicator get dedicated colors.
//!
//! # Example
//!
//! ```
//! use kk_tui::Theme;
//!
//! let theme = Theme::dark();
//! let style = theme.allergy_style(true);
//! assert_eq!(style.fg, Some(theme.warning_fg));
//! ```

use kk_core::ColorScheme;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // =========================================================================
    // Allergy Colors
    // =========================================================================
    /// Foreground for allergy warnings and flagged recipes.
    pub warning_fg: Color,

    /// Foreground for the active allergy filter indicator.
    pub safe_fg: Color,

    // =========================================================================
    // Base Colors
    // =========================================================================
    /// Primary foreground color.
    pub fg: Color,

    /// Dimmed/secondary text color.
    pub dimmed_fg: Color,

    /// Accent color for highlights.
    pub accent: Color,

    /// Error color.
    pub error_fg: Color,

    /// Background for modal overlays.
    pub overlay_bg: Color,

    // =========================================================================
    // Border Styles
    // =========================================================================
    /// Style for normal borders.
    pub border_style: Style,

    /// Style for focused borders.
    pub focused_border_style: Style,

    // =========================================================================
    // Component Styles
    // =========================================================================
    /// Style for highlighted/selected items.
    pub highlight_style: Style,

    /// Style for the header bar and panel titles.
    pub header_style: Style,

    /// Style for the status bar.
    pub status_bar_style: Style,
}

impl Theme {
    /// Creates a dark theme (light text on dark background).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            warning_fg: Color::Rgb(255, 170, 60),
            safe_fg: Color::Rgb(100, 220, 120),

            fg: Color::Rgb(220, 220, 220),
            dimmed_fg: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(240, 140, 90),
            error_fg: Color::Rgb(255, 80, 80),
            overlay_bg: Color::Rgb(35, 30, 30),

            border_style: Style::default().fg(Color::Rgb(90, 80, 80)),
            focused_border_style: Style::default().fg(Color::Rgb(240, 140, 90)),

            highlight_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(70, 55, 50))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(240, 140, 90))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .bg(Color::Rgb(45, 40, 40)),
        }
    }

    /// Creates a light theme (dark text on light background).
    #[must_use]
    pub fn light() -> Self {
        Self {
            warning_fg: Color::Rgb(190, 90, 0),
            safe_fg: Color::Rgb(40, 130, 60),

            fg: Color::Rgb(30, 30, 30),
            dimmed_fg: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(180, 80, 30),
            error_fg: Color::Rgb(180, 40, 40),
            overlay_bg: Color::Rgb(245, 238, 232),

            border_style: Style::default().fg(Color::Rgb(170, 155, 150)),
            focused_border_style: Style::default().fg(Color::Rgb(180, 80, 30)),

            highlight_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(235, 215, 200))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(180, 80, 30))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(60, 60, 60))
                .bg(Color::Rgb(230, 222, 215)),
        }
    }

    /// Creates a theme from a [`ColorScheme`] configuration.
    ///
    /// [`ColorScheme::Auto`] uses the dark theme.
    #[must_use]
    pub fn from_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark | ColorScheme::Auto | _ => Self::dark(),
        }
    }

    /// Returns the list marker for a recipe with or without warnings.
    #[must_use]
    pub const fn allergy_indicator(has_warnings: bool) -> &'static str {
        if has_warnings { "[!]" } else { "   " }
    }

    /// Returns the style for a recipe row with or without warnings.
    #[must_use]
    pub fn allergy_style(&self, has_warnings: bool) -> Style {
        if has_warnings {
            Style::default().fg(self.warning_fg)
        } else {
            self.base_style()
        }
    }

    /// Returns a style with the base foreground color.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Returns a style for dimmed/secondary text.
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed_fg)
    }

    /// Returns a style for accent/highlighted text.
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns a bold accent style for overlay titles.
    #[must_use]
    pub fn title_style(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    /// Returns a style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }

    /// Returns a style for allergy warning text.
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Returns the background style for modal overlays.
    #[must_use]
    pub fn overlay_style(&self) -> Style {
        Style::default().bg(self.overlay_bg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_scheme() {
        assert_eq!(Theme::from_scheme(ColorScheme::Dark), Theme::dark());
        assert_eq!(Theme::from_scheme(ColorScheme::Light), Theme::light());
        assert_eq!(Theme::from_scheme(ColorScheme::Auto), Theme::dark());
    }

    #[test]
    fn test_allergy_indicator() {
        assert_eq!(Theme::allergy_indicator(true), "[!]");
        assert_eq!(Theme::allergy_indicator(false).trim(), "");
    }

    #[test]
    fn test_allergy_style() {
        let theme = Theme::light();
        assert_eq!(theme.allergy_style(true).fg, Some(theme.warning_fg));
        assert_eq!(theme.allergy_style(false), theme.base_style());
    }

    #[test]
    fn test_theme_default() {
        assert_eq!(Theme::default(), Theme::dark());
    }
}
