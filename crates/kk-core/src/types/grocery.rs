//! Grocery list item type.

use serde::{Deserialize, Serialize};

/// An entry on the shared grocery list.
///
/// Only presence is tracked; quantities live on the recipe ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroceryListItem {
    /// Item name as it should appear on the list.
    pub name: String,
}

impl GroceryListItem {
    /// Creates a grocery list item.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
