//! Recipe form state.
//!
//! The form edits a [`RecipeDraft`] field by field. Ingredient rows can be
//! added and removed; there is always at least one row to type into. Rows
//! missing a name or size are dropped when the draft is validated.

use kk_core::{IngredientDraft, Recipe, RecipeDraft};

/// An input field of the recipe form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Recipe name.
    Name,
    /// Short description.
    Description,
    /// Full description.
    FullDescription,
    /// Comma-separated tags.
    Tags,
    /// Name input of an ingredient row.
    IngredientName(usize),
    /// Size input of an ingredient row.
    IngredientSize(usize),
}

/// Number of fields before the ingredient rows.
const FIXED_FIELDS: usize = 4;

impl FormField {
    /// Returns the label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::FullDescription => "Full description",
            Self::Tags => "Tags",
            Self::IngredientName(_) => "Ingredient",
            Self::IngredientSize(_) => "Size",
        }
    }

    /// Returns the ingredient row this field belongs to, if any.
    #[must_use]
    pub const fn ingredient_row(self) -> Option<usize> {
        match self {
            Self::IngredientName(row) | Self::IngredientSize(row) => Some(row),
            _ => None,
        }
    }

    const fn position(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Description => 1,
            Self::FullDescription => 2,
            Self::Tags => 3,
            Self::IngredientName(row) => FIXED_FIELDS + row * 2,
            Self::IngredientSize(row) => FIXED_FIELDS + row * 2 + 1,
        }
    }

    const fn at(position: usize) -> Self {
        match position {
            0 => Self::Name,
            1 => Self::Description,
            2 => Self::FullDescription,
            3 => Self::Tags,
            p => {
                let offset = p - FIXED_FIELDS;
                if offset % 2 == 0 {
                    Self::IngredientName(offset / 2)
                } else {
                    Self::IngredientSize(offset / 2)
                }
            }
        }
    }
}

/// State of the create/edit recipe overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeForm {
    /// The values typed so far.
    pub draft: RecipeDraft,
    original_name: Option<String>,
    active: FormField,
}

impl RecipeForm {
    /// Creates an empty form for a new recipe.
    #[must_use]
    pub fn create() -> Self {
        Self {
            draft: RecipeDraft {
                ingredients: vec![IngredientDraft::default()],
                ..RecipeDraft::default()
            },
            original_name: None,
            active: FormField::Name,
        }
    }

    /// Creates a form pre-filled with an existing recipe.
    #[must_use]
    pub fn edit(recipe: &Recipe) -> Self {
        let mut draft = RecipeDraft::from(recipe);
        if draft.ingredients.is_empty() {
            draft.ingredients.push(IngredientDraft::default());
        }
        Self {
            draft,
            original_name: Some(recipe.name.clone()),
            active: FormField::Name,
        }
    }

    /// Returns the name of the recipe being edited, or `None` for a new one.
    #[must_use]
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Returns the overlay title.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.original_name {
            Some(name) => format!(" Edit {name} "),
            None => " New Recipe ".to_owned(),
        }
    }

    /// Returns the focused field.
    #[must_use]
    pub const fn active(&self) -> FormField {
        self.active
    }

    fn field_count(&self) -> usize {
        FIXED_FIELDS + self.draft.ingredients.len() * 2
    }

    /// Moves focus to the next field, wrapping to the name.
    pub fn focus_next(&mut self) {
        let next = (self.active.position() + 1) % self.field_count();
        self.active = FormField::at(next);
    }

    /// Moves focus to the previous field, wrapping to the last size input.
    pub fn focus_previous(&mut self) {
        let count = self.field_count();
        let previous = (self.active.position() + count - 1) % count;
        self.active = FormField::at(previous);
    }

    /// Returns the current value of a field.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Description => &self.draft.description,
            FormField::FullDescription => &self.draft.full_description,
            FormField::Tags => &self.draft.tags,
            FormField::IngredientName(row) => self
                .draft
                .ingredients
                .get(row)
                .map_or("", |i| i.name.as_str()),
            FormField::IngredientSize(row) => self
                .draft
                .ingredients
                .get(row)
                .map_or("", |i| i.size.as_str()),
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.active {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Description => Some(&mut self.draft.description),
            FormField::FullDescription => Some(&mut self.draft.full_description),
            FormField::Tags => Some(&mut self.draft.tags),
            FormField::IngredientName(row) => self.draft.ingredients.get_mut(row).map(|i| &mut i.name),
            FormField::IngredientSize(row) => self.draft.ingredients.get_mut(row).map(|i| &mut i.size),
        }
    }

    /// Types a character into the focused field.
    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.active_input_mut() {
            input.push(c);
        }
    }

    /// Deletes the last character of the focused field.
    pub fn pop_char(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.pop();
        }
    }

    /// Appends an empty ingredient row and focuses its name.
    pub fn add_ingredient_row(&mut self) {
        self.draft.ingredients.push(IngredientDraft::default());
        self.active = FormField::IngredientName(self.draft.ingredients.len() - 1);
    }

    /// Removes the focused ingredient row, or the last row when focus is on
    /// another field.
    pub fn remove_ingredient_row(&mut self) {
        let last = self.draft.ingredients.len().saturating_sub(1);
        let row = self.active.ingredient_row().unwrap_or(last).min(last);
        if row < self.draft.ingredients.len() {
            self.draft.ingredients.remove(row);
        }
        if self.draft.ingredients.is_empty() {
            self.draft.ingredients.push(IngredientDraft::default());
        }

        if self.active.ingredient_row().is_some() {
            let row = row.min(self.draft.ingredients.len() - 1);
            self.active = FormField::IngredientName(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_core::Ingredient;

    fn type_str(form: &mut RecipeForm, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn test_create_form_starts_with_one_row() {
        let form = RecipeForm::create();
        assert_eq!(form.original_name(), None);
        assert_eq!(form.draft.ingredients.len(), 1);
        assert_eq!(form.active(), FormField::Name);
        assert_eq!(form.title(), " New Recipe ");
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let recipe = Recipe::new("Soup", "Warm").with_ingredient(Ingredient::new("Leek", "1"));
        let form = RecipeForm::edit(&recipe);
        assert_eq!(form.original_name(), Some("Soup"));
        assert_eq!(form.value(FormField::Description), "Warm");
        assert_eq!(form.value(FormField::IngredientName(0)), "Leek");
        assert_eq!(form.value(FormField::IngredientSize(0)), "1");
    }

    #[test]
    fn test_focus_cycles_through_rows() {
        let mut form = RecipeForm::create();
        let mut seen = vec![form.active()];
        for _ in 0..6 {
            form.focus_next();
            seen.push(form.active());
        }
        assert_eq!(
            seen,
            vec![
                FormField::Name,
                FormField::Description,
                FormField::FullDescription,
                FormField::Tags,
                FormField::IngredientName(0),
                FormField::IngredientSize(0),
                FormField::Name,
            ]
        );

        form.focus_previous();
        assert_eq!(form.active(), FormField::IngredientSize(0));
    }

    #[test]
    fn test_typing_fills_draft() {
        let mut form = RecipeForm::create();
        type_str(&mut form, "Tosti");
        form.pop_char();
        form.focus_next();
        type_str(&mut form, "Quick");

        form.add_ingredient_row();
        type_str(&mut form, "Cheese");
        form.focus_next();
        type_str(&mut form, "2 slices");

        assert_eq!(form.draft.name, "Tost");
        assert_eq!(form.draft.description, "Quick");
        assert_eq!(form.draft.ingredients[1], IngredientDraft::new("Cheese", "2 slices"));

        let recipe = form.draft.validate().unwrap();
        assert_eq!(recipe.ingredients.len(), 1);
    }

    #[test]
    fn test_remove_ingredient_row_keeps_focus_valid() {
        let mut form = RecipeForm::create();
        form.add_ingredient_row();
        form.add_ingredient_row();
        assert_eq!(form.active(), FormField::IngredientName(2));

        form.remove_ingredient_row();
        assert_eq!(form.draft.ingredients.len(), 2);
        assert_eq!(form.active(), FormField::IngredientName(1));

        form.remove_ingredient_row();
        form.remove_ingredient_row();
        assert_eq!(form.draft.ingredients.len(), 1);
        assert_eq!(form.active(), FormField::IngredientName(0));
    }

    #[test]
    fn test_remove_from_fixed_field_drops_last_row() {
        let recipe = Recipe::new("Soup", "")
            .with_ingredient(Ingredient::new("Leek", "1"))
            .with_ingredient(Ingredient::new("Salt", "pinch"));
        let mut form = RecipeForm::edit(&recipe);

        form.remove_ingredient_row();
        assert_eq!(form.draft.ingredients, vec![IngredientDraft::new("Leek", "1")]);
        assert_eq!(form.active(), FormField::Name);
    }
}
