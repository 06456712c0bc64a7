//! Application state and lifecycle management.
//!
//! [`App`] owns the recipe repository and a snapshot of the household data,
//! and projects them into the list and detail views. The in-memory recipe
//! collection is the single mutable model: every change goes through the
//! repository (which saves immediately) and then the visible list is
//! recomputed over the full collection.
//!
//! # Architecture
//!
//! ```text
//! App
//!  ├── repo: RecipeRepository<S>   # Recipes + the store handle
//!  ├── profile: AllergyProfile     # Members and household allergens
//!  ├── scope: AllergenScope        # Whose warnings are shown
//!  ├── filter: RecipeFilter        # Text query + allergy filter
//!  ├── mode: AppMode               # Which overlay has the keyboard
//!  ├── list_state: RecipeListState
//!  ├── detail_state: DetailPaneState
//!  ├── form / confirm / user_select
//!  └── status: Option<StatusMessage>
//! ```

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use kk_core::{
    AllergenScope, AllergyFilter, AllergyProfile, AllergyWarning, Config, Ingredient, Member,
    Recipe, RecipeDetail, RecipeFilter, match_allergens,
};
use kk_store::{KeyValueStore, RecipeRepository, StoreError, grocery_list, household, settings};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::form::RecipeForm;

/// Rows taken by the header, status bar, and list borders.
const LIST_CHROME_HEIGHT: u16 = 6;

/// The current mode of the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Browsing the recipe list.
    #[default]
    Normal,

    /// Typing a search query.
    Search,

    /// Creating or editing a recipe.
    Form,

    /// Waiting for a yes/no answer to a deletion.
    Confirm,

    /// Choosing the active user.
    UserSelect,

    /// Help panel is displayed.
    Help,
}

impl AppMode {
    /// Returns the status bar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Form => "FORM",
            Self::Confirm => "CONFIRM",
            Self::UserSelect => "USER",
            Self::Help => "HELP",
        }
    }
}

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Recipe list is focused.
    #[default]
    RecipeList,

    /// Detail pane is focused.
    DetailPane,
}

impl Focus {
    /// Toggles between the two panels.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::RecipeList => Self::DetailPane,
            Self::DetailPane => Self::RecipeList,
        }
    }
}

/// Selection and scroll state of the recipe list.
///
/// Positions are *display* positions into the visible subset; use
/// [`selected_recipe_index`](Self::selected_recipe_index) to map back to the
/// collection.
#[derive(Debug, Clone, Default)]
pub struct RecipeListState {
    /// Selected display position.
    pub selected: Option<usize>,

    /// First display position drawn.
    pub scroll_offset: usize,

    /// Collection indices of the visible recipes, in collection order.
    visible: Vec<usize>,

    /// Rows available for list entries.
    pub visible_height: usize,
}

impl RecipeListState {
    /// Creates an empty list state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of visible recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns `true` if no recipe is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Returns the collection indices of the visible recipes.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.visible
    }

    /// Returns the collection index of the selected recipe.
    #[must_use]
    pub fn selected_recipe_index(&self) -> Option<usize> {
        self.selected.and_then(|display| self.visible.get(display).copied())
    }

    /// Replaces the visible subset.
    ///
    /// The selection follows the previously selected collection index if it
    /// is still visible, and otherwise stays at the same display position.
    pub fn set_visible(&mut self, indices: Vec<usize>) {
        let previous = self.selected_recipe_index();
        self.visible = indices;

        let kept = previous.and_then(|recipe| self.visible.iter().position(|&i| i == recipe));
        self.selected = match kept {
            Some(display) => Some(display),
            None if self.visible.is_empty() => None,
            None => Some(self.selected.unwrap_or(0).min(self.visible.len() - 1)),
        };

        if self.scroll_offset >= self.visible.len() {
            self.scroll_offset = 0;
        }
        self.ensure_visible();
    }

    /// Selects the recipe at a collection index. Returns `false` if it is
    /// not visible.
    pub fn select_recipe(&mut self, recipe_index: usize) -> bool {
        match self.visible.iter().position(|&i| i == recipe_index) {
            Some(display) => {
                self.selected = Some(display);
                self.ensure_visible();
                true
            }
            None => false,
        }
    }

    /// Moves selection to the next item, wrapping to the start.
    pub fn select_next(&mut self) {
        let len = self.len();
        if len == 0 {
            self.selected = None;
            return;
        }

        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) | None => 0,
        });
        self.ensure_visible();
    }

    /// Moves selection to the previous item, wrapping to the end.
    pub fn select_previous(&mut self) {
        let len = self.len();
        if len == 0 {
            self.selected = None;
            return;
        }

        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
        self.ensure_visible();
    }

    /// Moves selection to the first item.
    pub fn select_first(&mut self) {
        if self.is_empty() {
            self.selected = None;
        } else {
            self.selected = Some(0);
            self.scroll_offset = 0;
        }
    }

    /// Moves selection to the last item.
    pub fn select_last(&mut self) {
        if self.is_empty() {
            self.selected = None;
        } else {
            self.selected = Some(self.len() - 1);
            self.ensure_visible();
        }
    }

    /// Moves selection down by one page.
    pub fn page_down(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }

        let page_size = self.visible_height.max(1);
        self.selected = Some(match self.selected {
            Some(i) => (i + page_size).min(len - 1),
            None => page_size.min(len - 1),
        });
        self.ensure_visible();
    }

    /// Moves selection up by one page.
    pub fn page_up(&mut self) {
        if self.is_empty() {
            return;
        }

        let page_size = self.visible_height.max(1);
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page_size)));
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        let height = self.visible_height.max(1);
        if let Some(selected) = self.selected {
            if selected < self.scroll_offset {
                self.scroll_offset = selected;
            } else if selected >= self.scroll_offset + height {
                self.scroll_offset = selected + 1 - height;
            }
        }
    }
}

/// State for the detail pane widget.
#[derive(Debug, Clone, Default)]
pub struct DetailPaneState {
    /// Scroll offset within the detail view.
    pub scroll_offset: usize,
}

/// A deletion waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmKind {
    /// Delete one recipe, by name.
    DeleteRecipe(String),
    /// Delete every recipe.
    DeleteAll,
}

impl ConfirmKind {
    /// Returns the question shown to the user.
    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        match self {
            Self::DeleteRecipe(_) => "Are you sure you want to delete this recipe?",
            Self::DeleteAll => "Are you sure you want to delete all recipes?",
        }
    }
}

/// State of the active user picker.
///
/// The first option is always the whole household.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSelect {
    options: Vec<Option<String>>,
    /// Highlighted option.
    pub selected: usize,
}

impl Default for UserSelect {
    fn default() -> Self {
        Self {
            options: vec![None],
            selected: 0,
        }
    }
}

impl UserSelect {
    /// Lists the household and each member, highlighting the current choice.
    #[must_use]
    pub fn new(members: &[Member], current: Option<&str>) -> Self {
        let options: Vec<Option<String>> = std::iter::once(None)
            .chain(members.iter().map(|m| Some(m.name.clone())))
            .collect();
        let selected = options
            .iter()
            .position(|option| option.as_deref() == current)
            .unwrap_or(0);
        Self { options, selected }
    }

    /// Returns the option labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        self.options
            .iter()
            .map(|option| AllergenScope::from_active_user(option.clone()).to_string())
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`; the household option is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Highlights the next option, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.len().max(1);
    }

    /// Highlights the previous option, wrapping.
    pub fn select_previous(&mut self) {
        let len = self.len().max(1);
        self.selected = (self.selected + len - 1) % len;
    }

    /// Returns the highlighted member name, or `None` for the household.
    #[must_use]
    pub fn chosen(&self) -> Option<String> {
        self.options.get(self.selected).cloned().flatten()
    }
}

/// Status message to display in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text.
    pub text: String,

    /// When the message was created.
    pub timestamp: Instant,

    /// Whether this is an error message.
    pub is_error: bool,
}

impl StatusMessage {
    /// Creates a new info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: false,
        }
    }

    /// Creates a new error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: true,
        }
    }

    /// Returns `true` once the message is older than 5 seconds.
    #[must_use]
    pub fn should_hide(&self) -> bool {
        self.timestamp.elapsed().as_secs() > 5
    }
}

/// The main application state.
pub struct App<S> {
    /// The configuration.
    pub config: Config,

    repo: RecipeRepository<S>,
    profile: AllergyProfile,
    scope: AllergenScope,
    allergy_filter_enabled: bool,
    filter: RecipeFilter,

    /// Current UI mode.
    pub mode: AppMode,

    /// Which panel has focus.
    pub focus: Focus,

    /// Recipe list widget state.
    pub list_state: RecipeListState,

    /// Detail pane widget state.
    pub detail_state: DetailPaneState,

    /// Open recipe form, in [`AppMode::Form`].
    pub form: Option<RecipeForm>,

    /// Pending deletion, in [`AppMode::Confirm`].
    pub confirm: Option<ConfirmKind>,

    /// User picker state, in [`AppMode::UserSelect`].
    pub user_select: UserSelect,

    /// Status message to display.
    pub status: Option<StatusMessage>,

    /// Whether the application should quit.
    pub should_quit: bool,

    /// Terminal size (updated on resize).
    pub terminal_size: Rect,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the application over an opened repository.
    #[must_use]
    pub fn new(config: Config, repo: RecipeRepository<S>) -> Self {
        let mut app = Self {
            config,
            repo,
            profile: AllergyProfile::default(),
            scope: AllergenScope::AllUsers,
            allergy_filter_enabled: false,
            filter: RecipeFilter::default(),
            mode: AppMode::Normal,
            focus: Focus::RecipeList,
            list_state: RecipeListState::new(),
            detail_state: DetailPaneState::default(),
            form: None,
            confirm: None,
            user_select: UserSelect::default(),
            status: None,
            should_quit: false,
            terminal_size: Rect::default(),
        };
        app.refresh_household();
        app.apply_filter();
        app.list_state.select_first();
        app
    }

    /// Handles a key event and returns the resulting action.
    #[must_use]
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::Form => self.handle_form_key(key),
            AppMode::Confirm => Self::handle_confirm_key(key),
            AppMode::UserSelect => self.handle_user_select_key(key),
            AppMode::Help => Self::handle_help_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Action {
        let on_detail = self.focus == Focus::DetailPane;
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('j') | KeyCode::Down if on_detail => Action::ScrollDetailDown,
            KeyCode::Char('k') | KeyCode::Up if on_detail => Action::ScrollDetailUp,
            KeyCode::Char('j') | KeyCode::Down => Action::NextItem,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousItem,
            KeyCode::Char('g') | KeyCode::Home => Action::FirstItem,
            KeyCode::Char('G') | KeyCode::End => Action::LastItem,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Tab => Action::ToggleFocus,
            KeyCode::Char('/') => Action::EnterSearchMode,
            KeyCode::Char('a') => Action::OpenCreateForm,
            KeyCode::Char('e') | KeyCode::Enter => Action::OpenEditForm,
            KeyCode::Char('d') => Action::RequestDelete,
            KeyCode::Char('D') => Action::RequestDeleteAll,
            KeyCode::Char('u') => Action::OpenUserSelect,
            KeyCode::Char('x') => Action::ToggleAllergyFilter,
            KeyCode::Char('l') => Action::AddMissingToGroceryList,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Esc if !self.filter.query().is_empty() => Action::ClearQuery,
            _ => Action::None,
        }
    }

    fn handle_search_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ClearQuery,
            KeyCode::Enter => Action::ExitSearchMode,
            KeyCode::Backspace => {
                let mut query = self.filter.query().to_owned();
                query.pop();
                Action::SetQuery(query)
            }
            KeyCode::Char(c) => Action::SetQuery(format!("{}{c}", self.filter.query())),
            _ => Action::None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_mut() else {
            return Action::CancelForm;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Action::CancelForm,
            KeyCode::Enter => return Action::SubmitForm,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Char('n') if ctrl => form.add_ingredient_row(),
            KeyCode::Char('d') if ctrl => form.remove_ingredient_row(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) if !ctrl => form.push_char(c),
            _ => {}
        }
        Action::None
    }

    fn handle_confirm_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y' | 'Y') => Action::ConfirmDelete,
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => Action::CancelConfirm,
            _ => Action::None,
        }
    }

    fn handle_user_select_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.user_select.select_next();
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.user_select.select_previous();
                Action::None
            }
            KeyCode::Enter => Action::SelectUser(self.user_select.chosen()),
            KeyCode::Esc | KeyCode::Char('q') => Action::CancelUserSelect,
            _ => Action::None,
        }
    }

    fn handle_help_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Action::HideHelp,
            _ => Action::None,
        }
    }

    /// Handles a mouse event and returns the resulting action.
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> Action {
        if self.mode != AppMode::Normal {
            return Action::None;
        }
        match event.kind {
            MouseEventKind::ScrollDown => Action::NextItem,
            MouseEventKind::ScrollUp => Action::PreviousItem,
            _ => Action::None,
        }
    }

    /// Updates the application state based on an action.
    pub fn update(&mut self, action: Action) {
        if action.is_navigation() {
            self.detail_state.scroll_offset = 0;
        }

        match action {
            Action::Quit => self.should_quit = true,

            Action::NextItem => self.list_state.select_next(),
            Action::PreviousItem => self.list_state.select_previous(),
            Action::FirstItem => self.list_state.select_first(),
            Action::LastItem => self.list_state.select_last(),
            Action::PageDown => self.list_state.page_down(),
            Action::PageUp => self.list_state.page_up(),
            Action::ToggleFocus => self.focus = self.focus.toggle(),
            Action::ScrollDetailDown => {
                self.detail_state.scroll_offset = self.detail_state.scroll_offset.saturating_add(1);
            }
            Action::ScrollDetailUp => {
                self.detail_state.scroll_offset = self.detail_state.scroll_offset.saturating_sub(1);
            }

            Action::EnterSearchMode => self.mode = AppMode::Search,
            Action::ExitSearchMode => self.mode = AppMode::Normal,
            Action::SetQuery(query) => {
                self.filter.set_query(query);
                self.apply_filter();
            }
            Action::ClearQuery => {
                self.filter.set_query("");
                self.apply_filter();
                self.mode = AppMode::Normal;
            }
            Action::ToggleAllergyFilter => self.toggle_allergy_filter(),

            Action::OpenCreateForm => {
                self.form = Some(RecipeForm::create());
                self.mode = AppMode::Form;
            }
            Action::OpenEditForm => match self.selected_recipe().map(RecipeForm::edit) {
                Some(form) => {
                    self.form = Some(form);
                    self.mode = AppMode::Form;
                }
                None => self.status = Some(StatusMessage::error("No recipe selected")),
            },
            Action::SubmitForm => self.submit_form(),
            Action::CancelForm => {
                self.form = None;
                self.mode = AppMode::Normal;
            }

            Action::RequestDelete => match self.selected_recipe().map(|r| r.name.clone()) {
                Some(name) => {
                    self.confirm = Some(ConfirmKind::DeleteRecipe(name));
                    self.mode = AppMode::Confirm;
                }
                None => self.status = Some(StatusMessage::error("No recipe selected")),
            },
            Action::RequestDeleteAll => {
                self.confirm = Some(ConfirmKind::DeleteAll);
                self.mode = AppMode::Confirm;
            }
            Action::ConfirmDelete => self.confirm_delete(),
            Action::CancelConfirm => {
                self.confirm = None;
                self.mode = AppMode::Normal;
            }

            Action::OpenUserSelect => {
                self.user_select = UserSelect::new(self.profile.members(), self.scope.user());
                self.mode = AppMode::UserSelect;
            }
            Action::SelectUser(user) => self.select_user(user),
            Action::CancelUserSelect => self.mode = AppMode::Normal,

            Action::AddMissingToGroceryList => self.add_missing_to_grocery_list(),
            Action::Reload => self.reload(),

            Action::ToggleHelp => {
                self.mode = if self.mode == AppMode::Help {
                    AppMode::Normal
                } else {
                    AppMode::Help
                };
            }
            Action::HideHelp => self.mode = AppMode::Normal,

            Action::Render | Action::None => {}
        }
    }

    /// Handles a tick event (periodic update).
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::should_hide) {
            self.status = None;
        }
    }

    /// Updates the terminal size and the list page height.
    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
        self.list_state.visible_height = usize::from(size.height.saturating_sub(LIST_CHROME_HEIGHT));
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            self.mode = AppMode::Normal;
            return;
        };

        let result = match form.original_name() {
            Some(original) => self.repo.update(original, &form.draft),
            None => self.repo.create(&form.draft),
        }
        .map(|recipe| recipe.name.clone());

        match result {
            Ok(name) => {
                self.mode = AppMode::Normal;
                self.apply_filter();
                let shown = self
                    .repo
                    .position(&name)
                    .is_some_and(|index| self.list_state.select_recipe(index));

                let verb = if form.original_name().is_some() { "updated" } else { "saved" };
                let text = if shown {
                    format!("Recipe {verb}")
                } else {
                    format!("Recipe {verb} (hidden by the current filter)")
                };
                self.status = Some(StatusMessage::info(text));
            }
            Err(e) => {
                self.form = Some(form);
                self.report_error("Could not save recipe", &e);
            }
        }
    }

    fn confirm_delete(&mut self) {
        self.mode = AppMode::Normal;
        let Some(kind) = self.confirm.take() else {
            return;
        };

        match kind {
            ConfirmKind::DeleteRecipe(name) => match self.repo.delete(&name) {
                Ok(true) => {
                    self.apply_filter();
                    self.status = Some(StatusMessage::info("Recipe deleted"));
                }
                Ok(false) => self.status = Some(StatusMessage::error("Recipe not found!")),
                Err(e) => self.report_error("Could not delete recipe", &e),
            },
            ConfirmKind::DeleteAll => match self.repo.delete_all() {
                Ok(()) => {
                    self.apply_filter();
                    self.status = Some(StatusMessage::info("All recipes have been deleted."));
                }
                Err(e) => self.report_error("Could not delete recipes", &e),
            },
        }
    }

    fn toggle_allergy_filter(&mut self) {
        let enabled = !self.allergy_filter_enabled;
        if let Err(e) = settings::set_allergy_filter_enabled(self.repo.store_mut(), enabled) {
            self.report_error("Could not change the allergy filter", &e);
            return;
        }

        self.allergy_filter_enabled = enabled;
        self.apply_filter();

        let text = match (enabled, self.filter.allergy()) {
            (false, _) => "Allergy filter off".to_owned(),
            (true, Some(allergy)) => format!("Showing recipes safe for {}", allergy.user()),
            (true, None) => "Allergy filter on; choose a member with allergies to apply it".to_owned(),
        };
        self.status = Some(StatusMessage::info(text));
    }

    fn select_user(&mut self, user: Option<String>) {
        self.mode = AppMode::Normal;
        if let Err(e) = settings::set_active_user(self.repo.store_mut(), user.as_deref()) {
            self.report_error("Could not change the active user", &e);
            return;
        }

        self.scope = AllergenScope::from_active_user(user);
        self.apply_filter();
        self.status = Some(StatusMessage::info(format!(
            "Showing allergy warnings for {}",
            self.scope
        )));
    }

    fn add_missing_to_grocery_list(&mut self) {
        let Some(recipe) = self.selected_recipe() else {
            self.status = Some(StatusMessage::error("No recipe selected"));
            return;
        };
        let name = recipe.name.clone();
        let ingredients: Vec<Ingredient> = recipe.ingredients.to_vec();

        match grocery_list::add_missing(self.repo.store_mut(), &ingredients) {
            Ok(outcome) if outcome.added_count() == 0 => {
                self.status = Some(StatusMessage::info(format!(
                    "Nothing to add for {name}: everything is in the inventory or on the list"
                )));
            }
            Ok(outcome) => {
                self.status = Some(StatusMessage::info(format!(
                    "Added {} items to grocery list",
                    outcome.added_count()
                )));
            }
            Err(e) => self.report_error("Could not update the grocery list", &e),
        }
    }

    /// Re-reads recipes, household data, and settings from the store.
    pub fn reload(&mut self) {
        self.repo.reload();
        self.refresh_household();
        self.apply_filter();
        info!(recipes = self.repo.len(), "Reloaded from store");
        self.status = Some(StatusMessage::info(format!(
            "Loaded {} recipes",
            self.repo.len()
        )));
    }

    fn report_error(&mut self, context: &str, error: &StoreError) {
        warn!(error = %error, recoverable = error.is_recoverable(), "{context}");
        self.status = Some(StatusMessage::error(format!("{context}: {error}")));
    }

    // =========================================================================
    // Projection
    // =========================================================================

    fn refresh_household(&mut self) {
        let store = self.repo.store();
        self.profile = household::allergy_profile(store);
        self.scope = settings::scope(store);
        self.allergy_filter_enabled = settings::allergy_filter_enabled(store);

        if let Some(user) = self.scope.user() {
            if self.profile.member(user).is_none() {
                warn!(user, "Active user is not a household member; no allergens apply");
            }
        }
    }

    fn apply_filter(&mut self) {
        self.filter.set_allergy(AllergyFilter::from_settings(
            &self.profile,
            self.allergy_filter_enabled,
            self.scope.user(),
        ));
        let indices = self.filter.visible_indices(self.repo.recipes());
        debug!(
            visible = indices.len(),
            total = self.repo.len(),
            "Applied recipe filter"
        );
        self.list_state.set_visible(indices);
    }

    /// Returns the allergy warnings for a recipe in the current scope.
    #[must_use]
    pub fn warnings(&self, recipe: &Recipe) -> Vec<AllergyWarning> {
        match_allergens(&recipe.ingredients, &self.scope, &self.profile)
    }

    /// Returns the currently selected recipe, if any.
    #[must_use]
    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.list_state
            .selected_recipe_index()
            .and_then(|index| self.repo.recipes().get(index))
    }

    /// Returns the detail view of the selected recipe.
    #[must_use]
    pub fn selected_detail(&self) -> Option<RecipeDetail> {
        self.selected_recipe()
            .map(|recipe| RecipeDetail::build(recipe, &self.warnings(recipe)))
    }

    /// Returns the full recipe collection.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        self.repo.recipes()
    }

    /// Returns the repository.
    #[must_use]
    pub fn repo(&self) -> &RecipeRepository<S> {
        &self.repo
    }

    /// Returns the household snapshot.
    #[must_use]
    pub fn profile(&self) -> &AllergyProfile {
        &self.profile
    }

    /// Returns the warning scope.
    #[must_use]
    pub fn scope(&self) -> &AllergenScope {
        &self.scope
    }

    /// Returns the current filter.
    #[must_use]
    pub fn filter(&self) -> &RecipeFilter {
        &self.filter
    }

    /// Returns the persisted allergy filter toggle.
    #[must_use]
    pub fn allergy_filter_enabled(&self) -> bool {
        self.allergy_filter_enabled
    }

    /// Returns the total number of recipes.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.repo.len()
    }

    /// Returns the number of recipes passing the filter.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.list_state.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_store::{MemoryStore, keys};

    const RECIPES: &str = r#"[
        {"name":"Chocolate Cake","description":"Rich","tags":"dessert",
         "ingredients":[{"name":"Flour","size":"2 cups"},{"name":"Eggs","size":"3"}]},
        {"name":"Satay","description":"Skewers","tags":"dinner",
         "ingredients":[{"name":"Peanut butter","size":"4 tbsp"}]},
        {"name":"Salad","description":"Green","tags":"",
         "ingredients":[{"name":"Lettuce","size":"1 head"}]}
    ]"#;

    const MEMBERS: &str = r#"[{"name":"Ana","allergies":["peanut"]},{"name":"Bo","allergies":[]}]"#;

    fn app_with(extra: &[(&str, &str)]) -> App<MemoryStore> {
        let mut entries = vec![(keys::RECIPES, RECIPES), (keys::MEMBERS, MEMBERS)];
        entries.extend_from_slice(extra);
        let repo = RecipeRepository::open(MemoryStore::with_entries(entries));
        let mut app = App::new(Config::default(), repo);
        app.set_terminal_size(Rect::new(0, 0, 100, 30));
        app
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        press_with(app, code, KeyModifiers::NONE);
    }

    fn press_with(app: &mut App<MemoryStore>, code: KeyCode, modifiers: KeyModifiers) {
        let action = app.handle_key(KeyEvent::new(code, modifiers));
        app.update(action);
    }

    fn type_str(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn visible_names(app: &App<MemoryStore>) -> Vec<&str> {
        app.list_state
            .indices()
            .iter()
            .map(|&i| app.recipes()[i].name.as_str())
            .collect()
    }

    fn status_text(app: &App<MemoryStore>) -> &str {
        app.status.as_ref().map_or("", |s| s.text.as_str())
    }

    #[test]
    fn test_app_mode_default() {
        assert_eq!(AppMode::default(), AppMode::Normal);
        assert_eq!(AppMode::UserSelect.label(), "USER");
    }

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::RecipeList.toggle(), Focus::DetailPane);
        assert_eq!(Focus::DetailPane.toggle(), Focus::RecipeList);
    }

    #[test]
    fn test_list_state_navigation() {
        let mut state = RecipeListState::new();
        state.visible_height = 10;

        state.select_next();
        assert!(state.selected.is_none());

        state.set_visible(vec![0, 1, 2, 3, 4]);
        assert_eq!(state.selected, Some(0));

        state.select_next();
        assert_eq!(state.selected, Some(1));

        state.select_last();
        assert_eq!(state.selected, Some(4));

        state.select_next();
        assert_eq!(state.selected, Some(0));

        state.select_previous();
        assert_eq!(state.selected, Some(4));

        state.select_first();
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn test_list_state_keeps_selected_recipe_across_filters() {
        let mut state = RecipeListState::new();
        state.set_visible(vec![0, 1, 2, 3]);
        state.select_recipe(2);

        state.set_visible(vec![1, 2]);
        assert_eq!(state.selected_recipe_index(), Some(2));
        assert_eq!(state.selected, Some(1));

        state.set_visible(vec![0]);
        assert_eq!(state.selected_recipe_index(), Some(0));

        state.set_visible(Vec::new());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_list_state_scrolls_with_zero_height() {
        let mut state = RecipeListState::new();
        state.set_visible((0..20).collect());
        state.select_last();
        assert_eq!(state.scroll_offset, 19);

        state.visible_height = 5;
        state.page_up();
        assert_eq!(state.selected, Some(14));
        assert_eq!(state.scroll_offset, 14);
    }

    #[test]
    fn test_user_select_options() {
        let members = vec![Member::new("Ana", ["peanut"]), Member::new("Bo", Vec::<String>::new())];
        let mut select = UserSelect::new(&members, Some("Bo"));
        assert_eq!(select.selected, 2);
        assert_eq!(
            select.labels().collect::<Vec<_>>(),
            vec!["All household members", "Ana", "Bo"]
        );

        select.select_next();
        assert_eq!(select.chosen(), None);
        select.select_previous();
        assert_eq!(select.chosen().as_deref(), Some("Bo"));
    }

    #[test]
    fn test_app_opens_with_first_recipe_selected() {
        let app = app_with(&[]);
        assert_eq!(app.recipe_count(), 3);
        assert_eq!(app.visible_count(), 3);
        assert_eq!(app.selected_recipe().map(|r| r.name.as_str()), Some("Chocolate Cake"));
        assert_eq!(app.list_state.visible_height, 24);
    }

    #[test]
    fn test_search_filters_and_escape_clears() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Search);

        type_str(&mut app, "choc");
        assert_eq!(visible_names(&app), vec!["Chocolate Cake"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filter().query(), "cho");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.visible_count(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.filter().query(), "");
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_search_matches_tags() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "DINNER");
        assert_eq!(visible_names(&app), vec!["Satay"]);
    }

    #[test]
    fn test_create_recipe_through_form() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, AppMode::Form);

        type_str(&mut app, "Toast");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Crunchy");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Bread");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2 slices");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.form.is_none());
        assert_eq!(status_text(&app), "Recipe saved");
        assert_eq!(app.selected_recipe().map(|r| r.name.as_str()), Some("Toast"));

        let stored = kk_store::load_all(app.repo().store());
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[3].ingredients[0], Ingredient::new("Bread", "2 slices"));
    }

    #[test]
    fn test_form_ctrl_keys_manage_rows() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        press_with(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        press_with(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(app.form.as_ref().map(|f| f.draft.ingredients.len()), Some(3));

        press_with(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(app.form.as_ref().map(|f| f.draft.ingredients.len()), Some(2));
        assert_eq!(app.form.as_ref().map(|f| f.draft.name.as_str()), Some(""));
    }

    #[test]
    fn test_blank_name_keeps_form_open() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Form);
        assert!(app.form.is_some());
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert_eq!(app.recipe_count(), 3);
    }

    #[test]
    fn test_edit_renames_in_place() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."Chocolate Cake".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "Brownies");
        press(&mut app, KeyCode::Enter);

        assert_eq!(status_text(&app), "Recipe updated");
        assert_eq!(app.recipes()[0].name, "Brownies");
        assert_eq!(app.recipes()[0].description, "Rich");
        assert_eq!(app.recipe_count(), 3);
    }

    #[test]
    fn test_edit_rename_onto_existing_is_rejected() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."Chocolate Cake".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "Salad");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Form);
        assert!(status_text(&app).contains("already exists"));
        assert_eq!(app.recipes()[0].name, "Chocolate Cake");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, AppMode::Confirm);
        assert_eq!(
            app.confirm.as_ref().map(ConfirmKind::prompt),
            Some("Are you sure you want to delete this recipe?")
        );

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.recipe_count(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(status_text(&app), "Recipe deleted");
        assert_eq!(visible_names(&app), vec!["Satay", "Salad"]);
        assert_eq!(app.selected_recipe().map(|r| r.name.as_str()), Some("Satay"));
        assert_eq!(kk_store::load_all(app.repo().store()).len(), 2);
    }

    #[test]
    fn test_delete_all() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(status_text(&app), "All recipes have been deleted.");
        assert_eq!(app.recipe_count(), 0);
        assert!(app.selected_recipe().is_none());
        assert_eq!(app.repo().store().get(keys::RECIPES).unwrap(), None);
    }

    #[test]
    fn test_delete_with_nothing_selected() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(status_text(&app), "No recipe selected");
    }

    #[test]
    fn test_allergy_filter_toggle_hides_conflicts() {
        let mut app = app_with(&[(keys::ACTIVE_USER, "Ana")]);
        assert_eq!(app.visible_count(), 3);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.allergy_filter_enabled());
        assert_eq!(visible_names(&app), vec!["Chocolate Cake", "Salad"]);
        assert_eq!(status_text(&app), "Showing recipes safe for Ana");
        assert_eq!(
            app.repo().store().get(keys::ALLERGY_FILTER_ENABLED).unwrap().as_deref(),
            Some("true")
        );

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_allergy_filter_without_user_restricts_nothing() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.allergy_filter_enabled());
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_user_select_persists_active_user() {
        let mut app = app_with(&[(keys::ALLERGY_FILTER_ENABLED, "true")]);
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.mode, AppMode::UserSelect);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.scope(), &AllergenScope::SingleUser("Ana".to_owned()));
        assert_eq!(
            app.repo().store().get(keys::ACTIVE_USER).unwrap().as_deref(),
            Some("Ana")
        );
        assert_eq!(app.visible_count(), 2);

        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scope(), &AllergenScope::AllUsers);
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_warnings_follow_scope() {
        let app = app_with(&[]);
        let satay = &app.recipes()[1];
        let warnings = app.warnings(satay);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("household members"));
    }

    #[test]
    fn test_stale_active_user_has_no_warnings() {
        let app = app_with(&[(keys::ACTIVE_USER, "ghost"), (keys::ALLERGY_FILTER_ENABLED, "true")]);
        assert!(app.warnings(&app.recipes()[1]).is_empty());
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn test_add_missing_to_grocery_list() {
        let mut app = app_with(&[(keys::INVENTORY_ITEMS, r#"[{"name":"flour"}]"#)]);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(status_text(&app), "Added 1 items to grocery list");

        let list: Vec<_> = grocery_list::items(app.repo().store())
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(list, vec!["Eggs"]);

        press(&mut app, KeyCode::Char('l'));
        assert!(status_text(&app).starts_with("Nothing to add for Chocolate Cake"));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let mut app = app_with(&[]);
        kk_store::json::save_json(
            &mut *app.repo.store_mut(),
            keys::RECIPES,
            &[Recipe::new("Stew", "")],
        )
        .unwrap();

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(visible_names(&app), vec!["Stew"]);
        assert_eq!(status_text(&app), "Loaded 1 recipes");
    }

    #[test]
    fn test_detail_scroll_and_focus() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::DetailPane);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.detail_state.scroll_offset, 2);
        assert_eq!(app.list_state.selected, Some(0));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.detail_state.scroll_offset, 0);
        assert_eq!(app.list_state.selected, Some(1));
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        press_with(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_status_message() {
        let msg = StatusMessage::info("Test message");
        assert!(!msg.is_error);
        assert!(!msg.should_hide());

        let err = StatusMessage::error("Error!");
        assert!(err.is_error);
    }
}
