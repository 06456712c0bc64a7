//! Terminal user interface for kitchen-kompanion, using Ratatui.
//!
//! A two-pane recipe browser over the shared household store: the recipe
//! list on the left and the selected recipe with its allergy warnings on
//! the right. Recipes are created, edited and deleted through overlays, and
//! every change is written back to the store immediately.
//!
//! # Architecture
//!
//! ```text
//! crates/kk-tui/src/
//!   lib.rs           # Public API exports and the event loop
//!   app.rs           # Application state, key handling, mutations
//!   form.rs          # Create/edit form state
//!   event.rs         # Event types (Key, Mouse, Tick, Render)
//!   tui.rs           # Terminal wrapper with async event streaming
//!   action.rs        # User actions (commands from key bindings)
//!   ui.rs            # Main layout rendering orchestration
//!   theme.rs         # Color scheme and styling constants
//!   error.rs         # TUI-specific error types
//!   components/
//!     recipe_list.rs # RecipeListView
//!     detail_pane.rs # DetailPane for the selected recipe
//!     recipe_form.rs # RecipeFormView overlay
//!     confirm.rs     # ConfirmDialog overlay
//!     user_select.rs # UserSelectPanel overlay
//!     search_input.rs # SearchInput overlay
//!     header.rs      # HeaderBar component
//!     status_bar.rs  # StatusBar component
//!     help.rs        # HelpPanel modal overlay
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use kk_core::Config;
//! use kk_store::{FileStore, RecipeRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kk_tui::TuiError> {
//!     let config = Config::default();
//!     let store = FileStore::open(config.store.path.clone())?;
//!     kk_tui::run(config, RecipeRepository::open(store)).await
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod app;
pub mod components;
pub mod error;
pub mod event;
pub mod form;
pub mod theme;
pub mod tui;
pub mod ui;

use kk_core::Config;
use kk_store::{KeyValueStore, RecipeRepository};
use tracing::info;

pub use action::Action;
pub use app::{
    App, AppMode, ConfirmKind, DetailPaneState, Focus, RecipeListState, StatusMessage, UserSelect,
};
pub use error::TuiError;
pub use event::Event;
pub use form::{FormField, RecipeForm};
pub use theme::Theme;
pub use tui::Tui;

/// Runs the TUI over an opened recipe repository.
///
/// Enters the terminal, runs the event loop until the user quits, and
/// restores the terminal on the way out, including when the loop fails.
///
/// # Errors
///
/// Returns an error if the terminal cannot be initialized or drawn, or if
/// the event stream closes unexpectedly. Store failures during the session
/// are reported in the status bar and do not end it.
pub async fn run<S: KeyValueStore>(
    config: Config,
    repo: RecipeRepository<S>,
) -> Result<(), TuiError> {
    // Ticks per second; tick_rate_ms is a small UI timing value
    #[allow(clippy::cast_precision_loss)]
    let tick_rate = 1000.0 / config.tui.tick_rate_ms.max(1) as f64;
    let frame_rate = f64::from(config.tui.frame_rate.max(1));

    let mut tui = Tui::new(tick_rate)?.with_frame_rate(frame_rate);
    let theme = Theme::from_scheme(config.tui.color_scheme);

    let mut app = App::new(config, repo);
    info!(recipes = app.recipe_count(), "Loaded recipes");

    tui.enter()?;
    app.set_terminal_size(tui.size());

    info!("Entering main event loop");
    let result = run_event_loop(&mut tui, &mut app, &theme).await;

    tui.exit()?;
    result
}

async fn run_event_loop<S: KeyValueStore>(
    tui: &mut Tui,
    app: &mut App<S>,
    theme: &Theme,
) -> Result<(), TuiError> {
    let mut needs_render = true;
    loop {
        if needs_render {
            tui.draw(|frame| ui::render(app, frame, theme))?;
        }

        let Some(event) = tui.next_event().await else {
            return Err(TuiError::ChannelClosed);
        };

        let action = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize { width, height } => {
                app.set_terminal_size(ratatui::layout::Rect::new(0, 0, width, height));
                Action::Render
            }
            Event::Tick => {
                app.tick();
                Action::None
            }
            Event::Render => Action::Render,
            Event::FocusGained | Event::FocusLost => Action::None,
        };

        needs_render = action.needs_render();
        app.update(action);

        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }
    }
}
