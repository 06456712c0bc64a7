//! Recipe and ingredient types.
//!
//! A [`Recipe`] is keyed by its name. Its serialized shape is the one stored
//! under the `recipes` key:
//!
//! ```json
//! {"name":"Pancakes","description":"Sunday breakfast","fullDescription":"",
//!  "tags":"breakfast, sweet","ingredients":[{"name":"Flour","size":"2 cups"}]}
//! ```
//!
//! Recipes are created and edited through a [`RecipeDraft`], which mirrors
//! the recipe form and validates it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::null_as_default;
use crate::error::DraftError;

/// A recipe ingredient.
///
/// Owned by its recipe; it has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name, matched against allergens and inventory.
    pub name: String,

    /// Serving size as free text ("2 cups", "a pinch").
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
}

impl Ingredient {
    /// Creates an ingredient.
    #[must_use]
    pub fn new(name: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
        }
    }
}

/// A stored recipe.
///
/// Uses [`SmallVec`] for ingredients: household recipes rarely list more
/// than eight.
///
/// # Examples
///
/// ```
/// use kk_core::{Ingredient, Recipe};
///
/// let recipe = Recipe::new("Pancakes", "Sunday breakfast")
///     .with_tags("breakfast, sweet")
///     .with_ingredient(Ingredient::new("Flour", "2 cups"));
///
/// assert_eq!(recipe.tag_list(), vec!["breakfast", "sweet"]);
/// assert_eq!(recipe.ingredients.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe name, unique within the collection.
    pub name: String,

    /// Short description shown in the list and searched by the text filter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Long-form instructions. Empty when not provided.
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_description: String,

    /// Free-text tags, comma separated by convention.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: String,

    /// Ingredients in the order they were entered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: SmallVec<[Ingredient; 8]>,
}

impl Recipe {
    /// Creates a recipe with no tags, full description, or ingredients.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            full_description: String::new(),
            tags: String::new(),
            ingredients: SmallVec::new(),
        }
    }

    /// Sets the tags string.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Sets the full description.
    #[must_use]
    pub fn with_full_description(mut self, text: impl Into<String>) -> Self {
        self.full_description = text.into();
        self
    }

    /// Appends an ingredient.
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Returns the full description if it has any non-whitespace content.
    #[must_use]
    pub fn full_description(&self) -> Option<&str> {
        let text = self.full_description.as_str();
        (!text.trim().is_empty()).then_some(text)
    }

    /// Splits the tags string on commas into trimmed, non-empty tags.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// One ingredient row of the recipe form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientDraft {
    /// Ingredient name input.
    pub name: String,
    /// Serving size input.
    pub size: String,
}

impl IngredientDraft {
    /// Creates an ingredient row.
    #[must_use]
    pub fn new(name: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
        }
    }

    /// Returns the ingredient if both inputs have content.
    fn complete(&self) -> Option<Ingredient> {
        let name = self.name.trim();
        let size = self.size.trim();
        (!name.is_empty() && !size.is_empty()).then(|| Ingredient::new(name, size))
    }
}

/// The contents of the recipe form, before validation.
///
/// # Examples
///
/// ```
/// use kk_core::{IngredientDraft, RecipeDraft};
///
/// let draft = RecipeDraft {
///     name: "  Toast ".to_owned(),
///     ingredients: vec![
///         IngredientDraft::new("Bread", "2 slices"),
///         IngredientDraft::new("Butter", ""),
///     ],
///     ..RecipeDraft::default()
/// };
///
/// let recipe = draft.validate().unwrap();
/// assert_eq!(recipe.name, "Toast");
/// assert_eq!(recipe.ingredients.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Recipe name input.
    pub name: String,
    /// Short description input.
    pub description: String,
    /// Full description input.
    pub full_description: String,
    /// Tags input.
    pub tags: String,
    /// Ingredient rows.
    pub ingredients: Vec<IngredientDraft>,
}

impl RecipeDraft {
    /// Turns the draft into a recipe.
    ///
    /// The name is trimmed. Ingredient rows missing a name or a size are
    /// dropped. Other fields are kept as typed.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::EmptyName`] if the trimmed name is empty.
    pub fn validate(&self) -> Result<Recipe, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        Ok(Recipe {
            name: name.to_owned(),
            description: self.description.clone(),
            full_description: self.full_description.clone(),
            tags: self.tags.clone(),
            ingredients: self
                .ingredients
                .iter()
                .filter_map(IngredientDraft::complete)
                .collect(),
        })
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            full_description: recipe.full_description.clone(),
            tags: recipe.tags.clone(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| IngredientDraft::new(i.name.clone(), i.size.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_serialized_shape() {
        let recipe = Recipe::new("Pancakes", "Sunday breakfast")
            .with_tags("breakfast")
            .with_ingredient(Ingredient::new("Flour", "2 cups"));

        insta::assert_snapshot!(
            serde_json::to_string(&recipe).unwrap(),
            @r#"{"name":"Pancakes","description":"Sunday breakfast","fullDescription":"","tags":"breakfast","ingredients":[{"name":"Flour","size":"2 cups"}]}"#
        );
    }

    #[test]
    fn test_recipe_tolerates_missing_and_null_fields() {
        let json = r#"{"name":"Salad","description":null,"ingredients":null}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.name, "Salad");
        assert!(recipe.description.is_empty());
        assert!(recipe.full_description.is_empty());
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_full_description_blank_is_none() {
        let recipe = Recipe::new("Soup", "").with_full_description("   \n");
        assert_eq!(recipe.full_description(), None);

        let recipe = Recipe::new("Soup", "").with_full_description("Simmer.");
        assert_eq!(recipe.full_description(), Some("Simmer."));
    }

    #[test]
    fn test_tag_list_skips_blank_entries() {
        let recipe = Recipe::new("Soup", "").with_tags(" dinner,, vegan ,");
        assert_eq!(recipe.tag_list(), vec!["dinner", "vegan"]);
        assert!(Recipe::new("Soup", "").tag_list().is_empty());
    }

    #[test]
    fn test_draft_rejects_blank_name() {
        let draft = RecipeDraft {
            name: "   ".to_owned(),
            ..RecipeDraft::default()
        };
        assert_eq!(draft.validate(), Err(DraftError::EmptyName));
    }

    #[test]
    fn test_draft_drops_incomplete_ingredient_rows() {
        let draft = RecipeDraft {
            name: "Cake".to_owned(),
            ingredients: vec![
                IngredientDraft::new("Flour", "2 cups"),
                IngredientDraft::new("", "1 tsp"),
                IngredientDraft::new("Sugar", " "),
                IngredientDraft::new(" Eggs ", " 3 "),
            ],
            ..RecipeDraft::default()
        };

        let recipe = draft.validate().unwrap();
        let names: Vec<_> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Eggs"]);
        assert_eq!(recipe.ingredients[1].size, "3");
    }

    #[test]
    fn test_draft_from_recipe_roundtrip() {
        let recipe = Recipe::new("Cake", "Birthday")
            .with_full_description("Bake at 180C.")
            .with_tags("dessert")
            .with_ingredient(Ingredient::new("Flour", "2 cups"));

        let draft = RecipeDraft::from(&recipe);
        assert_eq!(draft.validate().unwrap(), recipe);
    }
}
