//! Active user picker.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, HighlightSpacing, List, ListState, StatefulWidget, Widget};

use crate::app::UserSelect;
use crate::theme::Theme;

/// Overlay listing the household and each member.
pub struct UserSelectPanel<'a> {
    select: &'a UserSelect,
    theme: &'a Theme,
}

impl<'a> UserSelectPanel<'a> {
    /// Creates a new picker.
    #[must_use]
    pub const fn new(select: &'a UserSelect, theme: &'a Theme) -> Self {
        Self { select, theme }
    }
}

impl Widget for &UserSelectPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(" Check allergies for ", self.theme.title_style()))
            .style(self.theme.overlay_style());

        let list = List::new(self.select.labels())
            .block(block)
            .style(self.theme.base_style())
            .highlight_style(self.theme.highlight_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut state = ListState::default().with_selected(Some(self.select.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_core::Member;

    #[test]
    fn test_picker_highlights_current_user() {
        let theme = Theme::dark();
        let members = vec![Member::new("Ana", ["peanut"])];
        let select = UserSelect::new(&members, Some("Ana"));
        let panel = UserSelectPanel::new(&select, &theme);

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let row = |y: u16| -> String { (0..area.width).map(|x| buf[(x, y)].symbol()).collect() };
        assert!(row(1).contains("All household members"));
        assert!(row(2).contains("▸ Ana"));
    }
}
