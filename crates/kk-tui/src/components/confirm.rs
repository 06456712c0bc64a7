//! Deletion confirmation dialog.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::app::ConfirmKind;
use crate::theme::Theme;

/// A yes/no overlay for a pending deletion.
pub struct ConfirmDialog<'a> {
    kind: &'a ConfirmKind,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Creates a new confirmation dialog.
    #[must_use]
    pub const fn new(kind: &'a ConfirmKind, theme: &'a Theme) -> Self {
        Self { kind, theme }
    }
}

impl Widget for &ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            self.kind.prompt(),
            self.theme.base_style(),
        ))];
        if let ConfirmKind::DeleteRecipe(name) = self.kind {
            lines.push(Line::from(Span::styled(name.clone(), self.theme.title_style())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("y", self.theme.accent_style()),
            Span::styled(" delete   ", self.theme.dimmed_style()),
            Span::styled("n", self.theme.accent_style()),
            Span::styled(" keep", self.theme.dimmed_style()),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.error_style())
            .title(Span::styled(" Confirm ", self.theme.error_style()))
            .style(self.theme.overlay_style());

        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_dialog_shows_prompt_and_name() {
        let theme = Theme::dark();
        let kind = ConfirmKind::DeleteRecipe("Pancakes".to_owned());
        let dialog = ConfirmDialog::new(&kind, &theme);
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        dialog.render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_owned())
            .collect();
        assert!(text.contains("Are you sure you want to delete this recipe?"));
        assert!(text.contains("Pancakes"));
    }
}
