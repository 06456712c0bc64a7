//! Header bar component.
//!
//! Displays the application title, store path, recipe count and whose
//! allergies are being checked.

use kk_core::AllergenScope;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::recipe_list::truncate;

/// The header bar component.
pub struct HeaderBar<'a> {
    store_path: &'a str,
    recipe_count: usize,
    scope: &'a AllergenScope,
}

impl<'a> HeaderBar<'a> {
    /// Creates a new header bar.
    #[must_use]
    pub const fn new(store_path: &'a str, recipe_count: usize, scope: &'a AllergenScope) -> Self {
        Self {
            store_path,
            recipe_count,
            scope,
        }
    }
}

impl Widget for &HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let path_style = Style::default().fg(Color::White);
        let count_style = Style::default().fg(Color::Green);
        let user_style = Style::default().fg(Color::Magenta);
        let help_style = Style::default().fg(Color::Yellow);

        let line = Line::from(vec![
            Span::styled("kitchen-kompanion", title_style),
            Span::raw(" │ "),
            Span::styled(truncate(self.store_path, 40), path_style),
            Span::raw(" │ "),
            Span::styled(format!("{} recipes", self.recipe_count), count_style),
            Span::raw(" │ "),
            Span::styled(format!("Allergies: {}", self.scope), user_style),
            Span::raw(" │ "),
            Span::styled("? for help", help_style),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(line).block(block).render(area, buf);
    }
}
