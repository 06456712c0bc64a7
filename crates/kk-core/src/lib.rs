//! Core types and pure logic for the kitchen-kompanion recipe manager.
//!
//! This crate provides the foundational pieces used across the workspace:
//!
//! - Domain types ([`Recipe`], [`Ingredient`], [`Member`], [`InventoryItem`],
//!   [`GroceryListItem`], [`AllergenScope`])
//! - The allergy matcher ([`match_allergens`]) and its household snapshot
//!   ([`AllergyProfile`])
//! - Recipe visibility filtering ([`RecipeFilter`])
//! - Grocery list merging ([`compute_missing`], [`merge_into_grocery_list`])
//! - Recipe detail rendering ([`RecipeDetail`])
//! - Configuration structures and error types
//! - `FxHashSet` alias (faster than std)
//!
//! Nothing in this crate touches persisted state; storage lives in `kk-store`.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod allergy;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod grocery;
pub mod hash;
pub mod types;

pub use allergy::{AllergyProfile, AllergyWarning, WarningSubject, has_conflict, match_allergens};
pub use config::{ColorScheme, Config, StoreConfig, TuiConfig};
pub use detail::RecipeDetail;
pub use error::{ConfigError, DraftError};
pub use filter::{AllergyFilter, RecipeFilter, matches_query};
pub use grocery::{compute_missing, merge_into_grocery_list};
pub use hash::{FxHashSet, fx_hash_set_with_capacity};
pub use types::{
    AllergenScope, GroceryListItem, Ingredient, IngredientDraft, InventoryItem, Member, Recipe,
    RecipeDraft,
};

/// Case-folds a name for comparison.
///
/// Every case-insensitive comparison in the workspace (allergens, inventory,
/// grocery list) goes through this function so they agree on folding.
///
/// # Examples
///
/// ```
/// assert_eq!(kk_core::fold("Almond Milk"), "almond milk");
/// ```
#[inline]
#[must_use]
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}
