//! Detail pane component.
//!
//! Displays the selected recipe: description, ingredients, allergy warnings
//! and tags.

use kk_core::RecipeDetail;
use kk_core::detail::{FULL_DESCRIPTION_HEADING, NO_INGREDIENTS, WARNING_HEADING};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Widget, Wrap,
};

use crate::app::DetailPaneState;
use crate::theme::Theme;

/// A stateful detail pane widget.
///
/// Uses [`StatefulWidget`] to maintain scroll state.
pub struct DetailPane<'a> {
    detail: Option<&'a RecipeDetail>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DetailPane<'a> {
    /// Creates a new detail pane.
    #[must_use]
    pub const fn new(detail: Option<&'a RecipeDetail>, focused: bool, theme: &'a Theme) -> Self {
        Self {
            detail,
            focused,
            theme,
        }
    }

    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(" Recipe ", self.theme.header_style));

        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled("No recipe selected", self.theme.dimmed_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add a recipe",
                self.theme.dimmed_style(),
            )),
        ]);

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn section(&self, title: &str) -> Line<'static> {
        Line::from(Span::styled(
            format!("─── {title} ───"),
            self.theme.dimmed_style(),
        ))
    }

    fn build_lines(&self, detail: &RecipeDetail) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            detail.title.clone(),
            self.theme.title_style(),
        ))];

        if !detail.description.is_empty() {
            lines.push(Line::from(Span::styled(
                detail.description.clone(),
                self.theme.base_style(),
            )));
        }

        if let Some(text) = &detail.full_description {
            lines.push(Line::from(""));
            lines.push(self.section(FULL_DESCRIPTION_HEADING));
            lines.extend(
                text.lines()
                    .map(|line| Line::from(Span::styled(line.to_owned(), self.theme.base_style()))),
            );
        }

        lines.push(Line::from(""));
        lines.push(self.section("Ingredients"));
        if detail.ingredients.is_empty() {
            lines.push(Line::from(Span::styled(
                NO_INGREDIENTS,
                self.theme.dimmed_style(),
            )));
        }
        for ingredient in &detail.ingredients {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("•", self.theme.accent_style()),
                Span::raw(" "),
                Span::styled(ingredient.clone(), self.theme.base_style()),
            ]));
        }

        if detail.has_warnings() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("─── {WARNING_HEADING} ───"),
                self.theme.warning_style().add_modifier(Modifier::BOLD),
            )));
            for warning in &detail.warnings {
                lines.push(Line::from(vec![
                    Span::styled("! ", self.theme.warning_style()),
                    Span::styled(warning.clone(), self.theme.warning_style()),
                ]));
            }
        }

        if let Some(tags) = &detail.tags {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(tags.clone(), self.theme.dimmed_style())));
        }

        lines
    }

    fn render_detail(
        &self,
        detail: &RecipeDetail,
        area: Rect,
        buf: &mut Buffer,
        state: &mut DetailPaneState,
    ) {
        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(" Recipe ", self.theme.header_style));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.build_lines(detail);
        let total_lines = lines.len();
        let viewport = usize::from(inner.height);

        let max_scroll = total_lines.saturating_sub(viewport);
        if state.scroll_offset > max_scroll {
            state.scroll_offset = max_scroll;
        }

        let scroll_offset = u16::try_from(state.scroll_offset).unwrap_or(u16::MAX);
        Paragraph::new(Text::from(lines))
            .scroll((scroll_offset, 0))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        if total_lines > viewport {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(total_lines)
                .position(state.scroll_offset)
                .viewport_content_length(viewport);

            scrollbar.render(
                inner.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                buf,
                &mut scrollbar_state,
            );
        }
    }
}

impl StatefulWidget for &DetailPane<'_> {
    type State = DetailPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        match self.detail {
            Some(detail) => self.render_detail(detail, area, buf, state),
            None => self.render_placeholder(area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_core::{AllergyWarning, Ingredient, Recipe, WarningSubject};

    fn render_text(pane: &DetailPane<'_>, width: u16, height: u16) -> (String, DetailPaneState) {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let mut state = DetailPaneState { scroll_offset: 50 };
        StatefulWidget::render(pane, area, &mut buf, &mut state);

        let text = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect::<Vec<_>>()
            .join("\n");
        (text, state)
    }

    #[test]
    fn test_placeholder() {
        let theme = Theme::dark();
        let pane = DetailPane::new(None, false, &theme);
        let (text, _) = render_text(&pane, 40, 8);
        assert!(text.contains("No recipe selected"));
    }

    #[test]
    fn test_detail_sections() {
        let theme = Theme::dark();
        let recipe = Recipe::new("Satay", "Skewers")
            .with_tags("dinner")
            .with_ingredient(Ingredient::new("Peanut butter", "4 tbsp"));
        let warning = AllergyWarning {
            allergen: "peanut".to_owned(),
            subject: WarningSubject::Member("Ana".to_owned()),
        };
        let detail = RecipeDetail::build(&recipe, &[warning]);
        let pane = DetailPane::new(Some(&detail), true, &theme);

        let (text, state) = render_text(&pane, 100, 14);
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_matches(|c| c == '│' || c == ' '))
            .collect();
        assert_eq!(
            &lines[1..11],
            [
                "Satay",
                "Skewers",
                "",
                "─── Ingredients ───",
                "• Peanut butter - 4 tbsp",
                "",
                "─── Allergy Warning ───",
                "! This recipe contains peanut which may cause an allergic reaction for Ana.",
                "",
                "Tags: dinner",
            ]
        );
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_empty_ingredient_placeholder() {
        let theme = Theme::dark();
        let detail = RecipeDetail::build(&Recipe::new("Water", ""), &[]);
        let pane = DetailPane::new(Some(&detail), false, &theme);
        let (text, _) = render_text(&pane, 40, 10);
        assert!(text.contains(NO_INGREDIENTS));
        assert!(!text.contains(WARNING_HEADING));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let theme = Theme::dark();
        let mut recipe = Recipe::new("Feast", "");
        for i in 0..20 {
            recipe = recipe.with_ingredient(Ingredient::new(format!("Item {i}"), "1"));
        }
        let detail = RecipeDetail::build(&recipe, &[]);
        let pane = DetailPane::new(Some(&detail), true, &theme);

        let (_, state) = render_text(&pane, 40, 10);
        // 23 lines in an 8 line viewport
        assert_eq!(state.scroll_offset, 15);
    }
}
