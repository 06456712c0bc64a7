//! Main UI layout and rendering orchestration.
//!
//! # Layout Structure
//!
//! ```text
//! +------------------------------------------------------------------+
//! | kitchen-kompanion | kitchen.json | 12 recipes | Allergies: Ana | ?|
//! +------------------------------------------------------------------+
//! |  Recipes (12)                       |  Recipe                    |
//! |  ---------------------------------- |  ------------------------- |
//! |  ▸     Chocolate Cake    dessert    |  Chocolate Cake            |
//! |    [!] Satay             dinner     |  Rich                      |
//! |        ...                          |  ─── Ingredients ───       |
//! +------------------------------------------------------------------+
//! |  NORMAL  Recipe saved │ Safe for Ana │ 11/12                     |
//! +------------------------------------------------------------------+
//! ```
//!
//! Overlays (search, form, confirmation, user picker, help) are drawn on
//! top of the main content depending on [`AppMode`].

use kk_store::KeyValueStore;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use crate::app::{App, AppMode, Focus};
use crate::components::{
    ConfirmDialog, DetailPane, HeaderBar, HelpPanel, RecipeEntry, RecipeFormView, RecipeListView,
    SearchInput, StatusBar, UserSelectPanel,
};
use crate::theme::Theme;

/// Renders the entire UI based on the current application state.
pub fn render<S: KeyValueStore>(app: &App<S>, frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = HeaderBar::new(
        app.config.store.path.as_str(),
        app.recipe_count(),
        app.scope(),
    );
    frame.render_widget(&header, main_chunks[0]);

    render_main_content(app, frame, main_chunks[1], theme);

    let status_bar = StatusBar::new(app, theme);
    frame.render_widget(&status_bar, main_chunks[2]);

    match app.mode {
        AppMode::Search => {
            let input = SearchInput::new(app.filter().query(), theme);
            frame.render_widget(&input, centered_line(60, 3, area));
        }
        AppMode::Form => {
            if let Some(form) = &app.form {
                let view = RecipeFormView::new(form, theme);
                frame.render_widget(&view, centered_rect(70, 70, area));
            }
        }
        AppMode::Confirm => {
            if let Some(kind) = &app.confirm {
                let dialog = ConfirmDialog::new(kind, theme);
                frame.render_widget(&dialog, centered_line(50, 6, area));
            }
        }
        AppMode::UserSelect => {
            let panel = UserSelectPanel::new(&app.user_select, theme);
            let height = u16::try_from(app.user_select.len() + 2).unwrap_or(u16::MAX);
            frame.render_widget(&panel, centered_line(40, height, area));
        }
        AppMode::Help => {
            let panel = HelpPanel::new(theme);
            frame.render_widget(&panel, centered_rect(70, 80, area));
        }
        AppMode::Normal => {}
    }
}

fn render_main_content<S: KeyValueStore>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let entries: Vec<RecipeEntry<'_>> = app
        .list_state
        .indices()
        .iter()
        .filter_map(|&index| app.recipes().get(index))
        .map(|recipe| RecipeEntry {
            recipe,
            has_warnings: !app.warnings(recipe).is_empty(),
        })
        .collect();

    let filtered = !app.filter().is_empty();
    let list = RecipeListView::new(
        &entries,
        app.recipe_count(),
        filtered,
        app.focus == Focus::RecipeList,
        theme,
    );
    frame.render_stateful_widget(&list, content_chunks[0], &mut app.list_state.clone());

    let detail = app.selected_detail();
    let pane = DetailPane::new(detail.as_ref(), app.focus == Focus::DetailPane, theme);
    frame.render_stateful_widget(&pane, content_chunks[1], &mut app.detail_state.clone());
}

/// Creates a centered rectangle with the given percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Creates a centered rectangle with a percentage width and a fixed height.
fn centered_line(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    rect
}
