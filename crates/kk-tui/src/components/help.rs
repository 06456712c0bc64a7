//! Help panel component.
//!
//! Displays a modal overlay with key bindings.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table, Widget};

use crate::theme::Theme;

/// Key binding definition for the help panel.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
    mode: &'static str,
}

const KEY_BINDINGS: &[KeyBinding] = &[
    // Navigation
    KeyBinding {
        key: "j / ↓",
        description: "Next recipe (scroll when on details)",
        mode: "Normal",
    },
    KeyBinding {
        key: "k / ↑",
        description: "Previous recipe (scroll when on details)",
        mode: "Normal",
    },
    KeyBinding {
        key: "g / G",
        description: "First / last recipe",
        mode: "Normal",
    },
    KeyBinding {
        key: "PgDn / PgUp",
        description: "Page down / up",
        mode: "Normal",
    },
    KeyBinding {
        key: "Tab",
        description: "Toggle focus (List/Recipe)",
        mode: "Normal",
    },
    // Searching
    KeyBinding {
        key: "/",
        description: "Search recipes",
        mode: "Normal",
    },
    KeyBinding {
        key: "Enter",
        description: "Keep search",
        mode: "Search",
    },
    KeyBinding {
        key: "Esc",
        description: "Clear search",
        mode: "Normal/Search",
    },
    KeyBinding {
        key: "x",
        description: "Toggle allergy filter",
        mode: "Normal",
    },
    KeyBinding {
        key: "u",
        description: "Choose whose allergies to check",
        mode: "Normal",
    },
    // Recipes
    KeyBinding {
        key: "a",
        description: "Add recipe",
        mode: "Normal",
    },
    KeyBinding {
        key: "e / Enter",
        description: "Edit recipe",
        mode: "Normal",
    },
    KeyBinding {
        key: "d / D",
        description: "Delete recipe / all recipes",
        mode: "Normal",
    },
    KeyBinding {
        key: "l",
        description: "Add missing ingredients to grocery list",
        mode: "Normal",
    },
    KeyBinding {
        key: "r",
        description: "Reload from store",
        mode: "Normal",
    },
    // Form
    KeyBinding {
        key: "Tab / S-Tab",
        description: "Next / previous field",
        mode: "Form",
    },
    KeyBinding {
        key: "Ctrl+n / Ctrl+d",
        description: "Add / remove ingredient row",
        mode: "Form",
    },
    KeyBinding {
        key: "Enter / Esc",
        description: "Save / cancel",
        mode: "Form",
    },
    KeyBinding {
        key: "?",
        description: "Toggle help panel",
        mode: "Normal",
    },
    KeyBinding {
        key: "q / Ctrl+c",
        description: "Quit",
        mode: "Any",
    },
];

/// A help panel overlay widget.
pub struct HelpPanel<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPanel<'a> {
    /// Creates a new help panel.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn build_rows(&self) -> Vec<Row<'static>> {
        KEY_BINDINGS
            .iter()
            .map(|binding| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        binding.key,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(Span::styled(binding.description, self.theme.base_style())),
                    Cell::from(Span::styled(binding.mode, self.theme.dimmed_style())),
                ])
            })
            .collect()
    }
}

impl Widget for &HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(" Help - Key Bindings ", self.theme.title_style()))
            .style(self.theme.overlay_style());

        let heading = self.theme.title_style().add_modifier(Modifier::UNDERLINED);
        let header = Row::new(vec![
            Cell::from(Span::styled("Key", heading)),
            Cell::from(Span::styled("Action", heading)),
            Cell::from(Span::styled("Mode", heading)),
        ])
        .height(1)
        .bottom_margin(1);

        let widths = [
            Constraint::Length(17),
            Constraint::Min(25),
            Constraint::Length(14),
        ];

        Table::new(self.build_rows(), widths)
            .block(block)
            .header(header)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_normal_key_is_listed() {
        let keys: Vec<&str> = KEY_BINDINGS.iter().map(|b| b.key).collect();
        for key in ["/", "a", "x", "u", "l", "r", "?"] {
            assert!(
                keys.iter().any(|k| k.split(" / ").any(|part| part == key)),
                "missing binding for {key}"
            );
        }
    }

    #[test]
    fn test_help_panel_renders_title() {
        let theme = Theme::dark();
        let panel = HelpPanel::new(&theme);
        let area = Rect::new(0, 0, 70, 30);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains("Help - Key Bindings"));
    }
}
