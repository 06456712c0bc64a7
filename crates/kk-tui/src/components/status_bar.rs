//! Status bar component.
//!
//! Displays the mode badge, the latest status message, active filters and
//! the visible/total recipe count.

use kk_store::KeyValueStore;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::App;
use crate::theme::Theme;

/// The status bar component.
pub struct StatusBar<'a, S> {
    app: &'a App<S>,
    theme: &'a Theme,
}

impl<'a, S: KeyValueStore> StatusBar<'a, S> {
    /// Creates a new status bar.
    #[must_use]
    pub const fn new(app: &'a App<S>, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn build_line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.app.mode.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if let Some(status) = &self.app.status {
            let style = if status.is_error {
                self.theme.error_style()
            } else {
                self.theme.base_style()
            };
            spans.push(Span::styled(status.text.clone(), style));
            spans.push(Span::raw(" │ "));
        }

        let filter = self.app.filter();
        if !filter.query().is_empty() {
            spans.push(Span::styled("Search: ", self.theme.dimmed_style()));
            spans.push(Span::styled(
                format!("\"{}\"", filter.query()),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(" │ "));
        }

        if let Some(allergy) = filter.allergy() {
            spans.push(Span::styled(
                format!("Safe for {}", allergy.user()),
                Style::default().fg(self.theme.safe_fg),
            ));
            spans.push(Span::raw(" │ "));
        }

        spans.push(Span::styled(
            format!("{}/{}", self.app.visible_count(), self.app.recipe_count()),
            self.theme.dimmed_style(),
        ));

        Line::from(spans)
    }
}

impl<S: KeyValueStore> Widget for &StatusBar<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_line())
            .style(self.theme.status_bar_style)
            .render(area, buf);
    }
}
