//! Domain types for kitchen-kompanion.
//!
//! # Module Organization
//!
//! - [`recipe`] - Recipes, ingredients, and form drafts
//! - [`household`] - Household members and inventory items (read-only inputs)
//! - [`grocery`] - Grocery list items
//! - [`scope`] - Allergen scope selection
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use kk_core::{Recipe, Ingredient, Member, AllergenScope};
//! ```

pub mod grocery;
pub mod household;
pub mod recipe;
pub mod scope;

pub use grocery::GroceryListItem;
pub use household::{InventoryItem, Member};
pub use recipe::{Ingredient, IngredientDraft, Recipe, RecipeDraft};
pub use scope::AllergenScope;

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default value.
///
/// Stored collections are written by several views; some of them write
/// `null` where this workspace expects an empty string or list.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
