//! Grocery list merging.
//!
//! Pushing a recipe to the grocery list is two steps:
//!
//! 1. [`compute_missing`] drops ingredients already in the inventory
//!    (case-insensitive exact name match, unlike allergen matching).
//! 2. [`merge_into_grocery_list`] appends what is left, skipping names already
//!    on the list and names repeated within the same batch.
//!
//! Only presence is tracked; sizes are not carried onto the list.

use tracing::debug;

use crate::fold;
use crate::hash::{FxHashSet, fx_hash_set_with_capacity};
use crate::types::{GroceryListItem, Ingredient, InventoryItem};

fn folded_names<'a>(names: impl Iterator<Item = &'a str>) -> FxHashSet<String> {
    let mut set = fx_hash_set_with_capacity(names.size_hint().0);
    set.extend(names.map(fold));
    set
}

/// Returns the ingredients whose names are not in the inventory.
///
/// # Examples
///
/// ```
/// use kk_core::{Ingredient, InventoryItem, compute_missing};
///
/// let inventory = [InventoryItem::new("flour")];
/// assert!(compute_missing(&[Ingredient::new("Flour", "2 cups")], &inventory).is_empty());
/// assert_eq!(
///     compute_missing(&[Ingredient::new("Sugar", "1 cup")], &inventory),
///     vec![Ingredient::new("Sugar", "1 cup")]
/// );
/// ```
#[must_use]
pub fn compute_missing(ingredients: &[Ingredient], inventory: &[InventoryItem]) -> Vec<Ingredient> {
    let stocked = folded_names(inventory.iter().map(|item| item.name.as_str()));
    ingredients
        .iter()
        .filter(|ingredient| !stocked.contains(&fold(&ingredient.name)))
        .cloned()
        .collect()
}

/// Appends missing ingredients to the grocery list.
///
/// An ingredient is appended only if its case-folded name is not already on
/// the list; each distinct name is added at most once per call. Returns the
/// appended items in the order they were added.
///
/// # Examples
///
/// ```
/// use kk_core::{GroceryListItem, Ingredient, merge_into_grocery_list};
///
/// let mut list = vec![GroceryListItem::new("Milk")];
/// let added = merge_into_grocery_list(
///     &[Ingredient::new("milk", "1 l"), Ingredient::new("Eggs", "6")],
///     &mut list,
/// );
/// assert_eq!(added, vec![GroceryListItem::new("Eggs")]);
/// assert_eq!(list.len(), 2);
/// ```
pub fn merge_into_grocery_list(
    missing: &[Ingredient],
    list: &mut Vec<GroceryListItem>,
) -> Vec<GroceryListItem> {
    let mut listed = folded_names(list.iter().map(|item| item.name.as_str()));
    let mut added = Vec::new();

    for ingredient in missing {
        if listed.insert(fold(&ingredient.name)) {
            added.push(GroceryListItem::new(ingredient.name.clone()));
        }
    }

    debug!(
        candidates = missing.len(),
        added = added.len(),
        "Merged into grocery list"
    );
    list.extend(added.iter().cloned());
    added
}
