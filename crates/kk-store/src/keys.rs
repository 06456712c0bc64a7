//! Keys of the persisted store.
//!
//! These names and the shapes of their values are shared with the other
//! views of the household app and must not change.

/// JSON array of recipes. Written by the recipe repository.
pub const RECIPES: &str = "recipes";

/// JSON array of household members. Read-only here.
pub const MEMBERS: &str = "members";

/// JSON array of allergen strings (legacy household aggregate). Read-only here.
pub const MEMBER_ALLERGENS: &str = "member_allergens";

/// Plain string naming the selected member; empty for everyone.
pub const ACTIVE_USER: &str = "activeUser";

/// `"true"` or `"false"`.
pub const ALLERGY_FILTER_ENABLED: &str = "allergyFilterEnabled";

/// JSON array of inventory items. Read-only here.
pub const INVENTORY_ITEMS: &str = "inventoryItems";

/// Grocery list in legacy list markup.
pub const GROCERY_LIST: &str = "data";

