//! UI components for the TUI.
//!
//! # Component Types
//!
//! - **Widgets** (`Widget` trait): Stateless rendering - `HeaderBar`, `StatusBar`
//! - **Stateful Widgets** (`StatefulWidget` trait): Selection/scroll state - `RecipeListView`, `DetailPane`
//! - **Overlays**: Modal overlays - `HelpPanel`, `SearchInput`, `RecipeFormView`,
//!   `ConfirmDialog`, `UserSelectPanel`

mod confirm;
mod detail_pane;
mod header;
mod help;
mod recipe_form;
mod recipe_list;
mod search_input;
mod status_bar;
mod user_select;

pub use confirm::ConfirmDialog;
pub use detail_pane::DetailPane;
pub use header::HeaderBar;
pub use help::HelpPanel;
pub use recipe_form::RecipeFormView;
pub use recipe_list::{RecipeEntry, RecipeListView};
pub use search_input::SearchInput;
pub use status_bar::StatusBar;
pub use user_select::UserSelectPanel;
