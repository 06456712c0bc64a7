//! Recipe form overlay.
//!
//! One line per text field, then one line per ingredient row holding both
//! its name and size inputs. The view scrolls to keep the focused line on
//! screen.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::form::{FormField, RecipeForm};
use crate::theme::Theme;

const TEXT_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Description,
    FormField::FullDescription,
    FormField::Tags,
];

/// Lines above the first ingredient row: text fields, blank, heading.
const INGREDIENTS_START: usize = TEXT_FIELDS.len() + 2;

/// The create/edit overlay.
pub struct RecipeFormView<'a> {
    form: &'a RecipeForm,
    theme: &'a Theme,
}

impl<'a> RecipeFormView<'a> {
    /// Creates a new form view.
    #[must_use]
    pub const fn new(form: &'a RecipeForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }

    fn field_spans(&self, field: FormField) -> Vec<Span<'a>> {
        build_field_spans(
            field.label(),
            self.form.value(field),
            self.form.active() == field,
            self.theme,
        )
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        let mut lines: Vec<Line<'a>> = TEXT_FIELDS
            .iter()
            .map(|&field| Line::from(self.field_spans(field)))
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "─── Ingredients ───",
            self.theme.dimmed_style(),
        )));

        for row in 0..self.form.draft.ingredients.len() {
            let mut spans = vec![Span::styled(
                format!("{:>2}. ", row + 1),
                self.theme.dimmed_style(),
            )];
            spans.extend(self.field_spans(FormField::IngredientName(row)));
            spans.push(Span::raw("   "));
            spans.extend(self.field_spans(FormField::IngredientSize(row)));
            lines.push(Line::from(spans));
        }

        lines
    }

    fn active_line(&self) -> usize {
        let active = self.form.active();
        match active.ingredient_row() {
            Some(row) => INGREDIENTS_START + row,
            None => TEXT_FIELDS.iter().position(|&f| f == active).unwrap_or(0),
        }
    }
}

impl Widget for &RecipeFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(self.form.title(), self.theme.title_style()))
            .title_bottom(Span::styled(
                " Tab next · Ctrl+n add row · Ctrl+d remove row · Enter save · Esc cancel ",
                self.theme.dimmed_style(),
            ))
            .style(self.theme.overlay_style());

        let inner = block.inner(area);
        block.render(area, buf);

        let viewport = usize::from(inner.height).max(1);
        let scroll = (self.active_line() + 1).saturating_sub(viewport);
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

        Paragraph::new(Text::from(self.build_lines()))
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}

fn build_field_spans<'a>(
    label: &'a str,
    value: &'a str,
    focused: bool,
    theme: &'a Theme,
) -> Vec<Span<'a>> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if focused {
        theme.base_style()
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = if value.is_empty() && !focused { "<unset>" } else { value };

    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(display_value, value_style),
    ];

    if focused {
        spans.push(Span::styled("▌", Style::default().fg(theme.accent)));
    }

    spans
}
