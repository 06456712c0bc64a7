//! Recipe detail rendering.
//!
//! [`RecipeDetail`] is the single presentation model for a recipe, used when
//! a recipe is opened and again after it is edited. Front ends decide how to
//! draw the sections; [`Display`](std::fmt::Display) gives the plain-text
//! layout used by the command line.

use std::fmt;

use crate::allergy::AllergyWarning;
use crate::types::Recipe;

/// Placeholder line for a recipe without ingredients.
pub const NO_INGREDIENTS: &str = "No ingredients listed";

/// Heading of the warning section.
pub const WARNING_HEADING: &str = "Allergy Warning";

/// Heading of the full description section.
pub const FULL_DESCRIPTION_HEADING: &str = "Full Description";

/// The sections of a rendered recipe.
///
/// # Examples
///
/// ```
/// use kk_core::{Ingredient, Recipe, RecipeDetail};
///
/// let recipe = Recipe::new("Toast", "Quick").with_ingredient(Ingredient::new("Bread", "2 slices"));
/// let detail = RecipeDetail::build(&recipe, &[]);
///
/// assert_eq!(detail.ingredients, vec!["Bread - 2 slices"]);
/// assert!(detail.warnings.is_empty());
/// assert_eq!(detail.tags, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    /// Recipe name.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Full description, present only when it has content.
    pub full_description: Option<String>,
    /// One `"{name} - {size}"` line per ingredient.
    pub ingredients: Vec<String>,
    /// Warning messages in matcher order.
    pub warnings: Vec<String>,
    /// `"Tags: ..."` line, present only when tags are set.
    pub tags: Option<String>,
}

impl RecipeDetail {
    /// Builds the detail view of a recipe with its allergy warnings.
    #[must_use]
    pub fn build(recipe: &Recipe, warnings: &[AllergyWarning]) -> Self {
        let tags = recipe.tags.trim();
        Self {
            title: recipe.name.clone(),
            description: recipe.description.clone(),
            full_description: recipe.full_description().map(str::to_owned),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| format!("{} - {}", i.name, i.size))
                .collect(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
            tags: (!tags.is_empty()).then(|| format!("Tags: {}", recipe.tags)),
        }
    }

    /// Returns `true` if there are warnings to show.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl fmt::Display for RecipeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }

        if let Some(text) = &self.full_description {
            writeln!(f)?;
            writeln!(f, "{FULL_DESCRIPTION_HEADING}")?;
            writeln!(f, "{text}")?;
        }

        writeln!(f)?;
        writeln!(f, "Ingredients")?;
        if self.ingredients.is_empty() {
            writeln!(f, "  {NO_INGREDIENTS}")?;
        }
        for line in &self.ingredients {
            writeln!(f, "  - {line}")?;
        }

        if self.has_warnings() {
            writeln!(f)?;
            writeln!(f, "{WARNING_HEADING}")?;
            for warning in &self.warnings {
                writeln!(f, "  ! {warning}")?;
            }
        }

        if let Some(tags) = &self.tags {
            writeln!(f)?;
            writeln!(f, "{tags}")?;
        }
        Ok(())
    }
}
