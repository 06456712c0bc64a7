//! User actions for the TUI.
//!
//! Key presses are mapped to an [`Action`] by the current mode's key handler,
//! then applied to the application state by [`App::update`].
//!
//! ```text
//! Key Event → App::handle_key → Action → App::update → repository / settings
//! ```
//!
//! [`App::update`]: crate::App::update

/// User-initiated actions in the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Move selection to the next recipe.
    NextItem,

    /// Move selection to the previous recipe.
    PreviousItem,

    /// Move selection to the first recipe.
    FirstItem,

    /// Move selection to the last recipe.
    LastItem,

    /// Move selection down by one page.
    PageDown,

    /// Move selection up by one page.
    PageUp,

    /// Toggle focus between the recipe list and the detail pane.
    ToggleFocus,

    /// Scroll the detail pane down one line.
    ScrollDetailDown,

    /// Scroll the detail pane up one line.
    ScrollDetailUp,

    // =========================================================================
    // Filtering
    // =========================================================================
    /// Enter search mode (start typing a query).
    EnterSearchMode,

    /// Leave search mode, keeping the query.
    ExitSearchMode,

    /// Replace the text query.
    SetQuery(String),

    /// Clear the text query.
    ClearQuery,

    /// Flip the persisted allergy filter toggle.
    ToggleAllergyFilter,

    // =========================================================================
    // Recipe Form
    // =========================================================================
    /// Open an empty recipe form.
    OpenCreateForm,

    /// Open the form on the selected recipe.
    OpenEditForm,

    /// Validate and save the form.
    SubmitForm,

    /// Close the form without saving.
    CancelForm,

    // =========================================================================
    // Deletion
    // =========================================================================
    /// Ask to delete the selected recipe.
    RequestDelete,

    /// Ask to delete every recipe.
    RequestDeleteAll,

    /// Carry out the pending deletion.
    ConfirmDelete,

    /// Drop the pending deletion.
    CancelConfirm,

    // =========================================================================
    // Household
    // =========================================================================
    /// Open the active user picker.
    OpenUserSelect,

    /// Store the active user (`None` for the whole household).
    SelectUser(Option<String>),

    /// Close the user picker without changing the selection.
    CancelUserSelect,

    /// Push the selected recipe's missing ingredients to the grocery list.
    AddMissingToGroceryList,

    /// Re-read recipes, members, and settings from the store.
    Reload,

    // =========================================================================
    // UI State
    // =========================================================================
    /// Toggle the help panel.
    ToggleHelp,

    /// Hide the help panel.
    HideHelp,

    // =========================================================================
    // Application Control
    // =========================================================================
    /// Quit the application.
    Quit,

    /// Render the UI.
    Render,

    /// No operation.
    #[default]
    None,
}

impl Action {
    /// Returns `true` if this action requires a re-render.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` if this is a navigation action.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NextItem
                | Self::PreviousItem
                | Self::FirstItem
                | Self::LastItem
                | Self::PageDown
                | Self::PageUp
        )
    }
}
