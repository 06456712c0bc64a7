//! Recipe list component.
//!
//! Displays the visible recipes with an allergy indicator and their tags.

use kk_core::Recipe;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Row, StatefulWidget, Table, TableState,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::RecipeListState;
use crate::theme::Theme;

const NAME_WIDTH: usize = 40;
const TAGS_WIDTH: usize = 30;

/// One row of the list.
#[derive(Debug, Clone, Copy)]
pub struct RecipeEntry<'a> {
    /// The recipe shown in this row.
    pub recipe: &'a Recipe,
    /// Whether the recipe triggers an allergy warning in the current scope.
    pub has_warnings: bool,
}

/// A stateful recipe list widget.
///
/// Uses [`StatefulWidget`] to maintain scroll and selection state.
pub struct RecipeListView<'a> {
    entries: &'a [RecipeEntry<'a>],
    /// Size of the whole collection, for the title.
    total: usize,
    filtered: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> RecipeListView<'a> {
    /// Creates a new recipe list view.
    #[must_use]
    pub const fn new(
        entries: &'a [RecipeEntry<'a>],
        total: usize,
        filtered: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entries,
            total,
            filtered,
            focused,
            theme,
        }
    }

    fn build_row(&self, entry: &RecipeEntry<'_>) -> Row<'a> {
        let style = self.theme.allergy_style(entry.has_warnings);
        let cells = vec![
            Cell::from(Span::styled(
                Theme::allergy_indicator(entry.has_warnings),
                style,
            )),
            Cell::from(Span::styled(
                truncate(&entry.recipe.name, NAME_WIDTH),
                self.theme.base_style(),
            )),
            Cell::from(Span::styled(
                truncate(entry.recipe.tags.trim(), TAGS_WIDTH),
                self.theme.dimmed_style(),
            )),
        ];

        Row::new(cells).height(1)
    }
}

impl StatefulWidget for &RecipeListView<'_> {
    type State = RecipeListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.visible_height = usize::from(area.height.saturating_sub(2));

        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let title = if self.filtered {
            format!(" Recipes ({} of {}) ", self.entries.len(), self.total)
        } else {
            format!(" Recipes ({}) ", self.total)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, self.theme.header_style));

        let rows: Vec<Row<'_>> = self.entries.iter().map(|e| self.build_row(e)).collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(u16::try_from(TAGS_WIDTH).unwrap_or(u16::MAX)),
        ];

        let table = Table::new(rows, widths)
            .block(block)
            .row_highlight_style(self.theme.highlight_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default();
        table_state.select(state.selected);
        *table_state.offset_mut() = state.scroll_offset;

        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

/// Shortens `text` to at most `max_width` display columns, ending in `…`.
pub(crate) fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
