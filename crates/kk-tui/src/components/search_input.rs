//! Search input component.
//!
//! Displays a text input overlay for the recipe search query.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::theme::Theme;

/// A search input overlay widget.
///
/// Shown as a modal overlay while search mode is active. The list behind it
/// updates on every keystroke.
pub struct SearchInput<'a> {
    query: &'a str,
    theme: &'a Theme,
}

impl<'a> SearchInput<'a> {
    /// Creates a new search input widget.
    #[must_use]
    pub const fn new(query: &'a str, theme: &'a Theme) -> Self {
        Self { query, theme }
    }

    fn content(&self) -> Line<'a> {
        let cursor = Span::styled("▌", self.theme.accent_style());
        if self.query.is_empty() {
            Line::from(vec![
                Span::styled(
                    "Search names, descriptions and tags...",
                    self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
                ),
                cursor,
            ])
        } else {
            Line::from(vec![
                Span::styled(self.query, self.theme.base_style()),
                cursor,
            ])
        }
    }
}

impl Widget for &SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Search (Esc to clear, Enter to keep) ",
                self.theme.title_style(),
            ))
            .style(Style::default().bg(self.theme.overlay_bg));

        Paragraph::new(self.content())
            .block(block)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_row(input: &SearchInput<'_>) -> String {
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf);
        (0..area.width).map(|x| buf[(x, 1)].symbol()).collect()
    }

    #[test]
    fn test_search_input_shows_query_and_cursor() {
        let theme = Theme::dark();
        let row = first_row(&SearchInput::new("cake", &theme));
        assert!(row.contains("cake▌"));
    }

    #[test]
    fn test_search_input_placeholder() {
        let theme = Theme::dark();
        let row = first_row(&SearchInput::new("", &theme));
        assert!(row.contains("Search names"));
    }
}
