//! Recipe visibility filtering.
//!
//! Two predicates decide whether a recipe is shown:
//!
//! - the text filter ([`matches_query`]): the lowercase query is a substring
//!   of the lowercase name, description, or raw tags string;
//! - the allergy filter ([`AllergyFilter`]): the recipe triggers none of the
//!   selected member's allergens.
//!
//! A recipe is visible only if it passes both. Filtering never mutates the
//! recipe collection; [`RecipeFilter::visible_indices`] recomputes over the
//! full set on every call.

use crate::allergy::{AllergyProfile, has_conflict};
use crate::fold;
use crate::types::Recipe;

/// Returns `true` if the recipe matches a free-text query.
///
/// An empty query matches every recipe.
///
/// # Examples
///
/// ```
/// use kk_core::{Recipe, matches_query};
///
/// let cake = Recipe::new("Chocolate Cake", "");
/// assert!(matches_query(&cake, "choc"));
/// assert!(!matches_query(&Recipe::new("Salad", ""), "choc"));
/// ```
#[must_use]
pub fn matches_query(recipe: &Recipe, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = fold(query);
    [&recipe.name, &recipe.description, &recipe.tags]
        .into_iter()
        .any(|field| fold(field).contains(&query))
}

/// Hides recipes that conflict with one member's allergies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergyFilter {
    user: String,
    allergens: Vec<String>,
}

impl AllergyFilter {
    /// Builds the filter for a selected member.
    ///
    /// Returns `None` when the filter would impose no restriction: the member
    /// is unknown (a stale selection) or has no allergies.
    #[must_use]
    pub fn for_user(profile: &AllergyProfile, user: &str) -> Option<Self> {
        let member = profile.member(user)?;
        member.has_allergies().then(|| Self {
            user: member.name.clone(),
            allergens: member.allergies.clone(),
        })
    }

    /// Builds the filter from the persisted toggle and selection.
    ///
    /// Only active when the toggle is on and a member is selected.
    #[must_use]
    pub fn from_settings(
        profile: &AllergyProfile,
        enabled: bool,
        active_user: Option<&str>,
    ) -> Option<Self> {
        if !enabled {
            return None;
        }
        Self::for_user(profile, active_user?)
    }

    /// Returns the member the filter was built for.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns `true` if the recipe is safe for the member.
    #[must_use]
    pub fn allows(&self, recipe: &Recipe) -> bool {
        !has_conflict(&recipe.ingredients, &self.allergens)
    }
}

/// The combined text and allergy filter.
///
/// # Examples
///
/// ```
/// use kk_core::{AllergyFilter, AllergyProfile, Ingredient, Member, Recipe, RecipeFilter};
///
/// let profile = AllergyProfile::new(vec![Member::new("Ana", ["peanut"])], Vec::<String>::new());
/// let recipes = vec![
///     Recipe::new("Satay", "").with_ingredient(Ingredient::new("Peanut butter", "2 tbsp")),
///     Recipe::new("Salad", ""),
/// ];
///
/// let filter = RecipeFilter::new("").with_allergy(AllergyFilter::for_user(&profile, "Ana"));
/// assert_eq!(filter.visible_indices(&recipes), vec![1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    query: String,
    allergy: Option<AllergyFilter>,
}

impl RecipeFilter {
    /// Creates a text-only filter.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            allergy: None,
        }
    }

    /// Sets or clears the allergy filter.
    #[must_use]
    pub fn with_allergy(mut self, allergy: Option<AllergyFilter>) -> Self {
        self.allergy = allergy;
        self
    }

    /// Returns the text query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Returns the active allergy filter, if any.
    #[must_use]
    pub fn allergy(&self) -> Option<&AllergyFilter> {
        self.allergy.as_ref()
    }

    /// Replaces the allergy filter.
    pub fn set_allergy(&mut self, allergy: Option<AllergyFilter>) {
        self.allergy = allergy;
    }

    /// Returns `true` if neither predicate restricts anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.allergy.is_none()
    }

    /// Returns `true` if the recipe passes both predicates.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        matches_query(recipe, &self.query)
            && self.allergy.as_ref().is_none_or(|allergy| allergy.allows(recipe))
    }

    /// Returns the indices of the visible recipes, in collection order.
    #[must_use]
    pub fn visible_indices(&self, recipes: &[Recipe]) -> Vec<usize> {
        recipes
            .iter()
            .enumerate()
            .filter(|(_, recipe)| self.matches(recipe))
            .map(|(index, _)| index)
            .collect()
    }
}
