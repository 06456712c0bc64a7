//! Household member and inventory types.
//!
//! Both collections are produced by other views (profile management and
//! inventory); this workspace only reads them.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A household member and their allergies.
///
/// Stored under the `members` key as `{"name": ..., "allergies": [...]}`.
/// Unknown fields written by the profile view are ignored.
///
/// # Examples
///
/// ```
/// use kk_core::Member;
///
/// let member: Member = serde_json::from_str(r#"{"name":"Ana","allergies":["peanut"]}"#).unwrap();
/// assert!(member.has_allergies());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member name, unique within the household.
    pub name: String,

    /// Allergen names in the order the member entered them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allergies: Vec<String>,
}

impl Member {
    /// Creates a member with the given allergies.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            allergies: allergies.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the member lists at least one allergy.
    #[inline]
    #[must_use]
    pub fn has_allergies(&self) -> bool {
        !self.allergies.is_empty()
    }
}

/// An item currently in the household inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item name as entered in the inventory view.
    pub name: String,
}

impl InventoryItem {
    /// Creates an inventory item.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_null_allergies() {
        let member: Member = serde_json::from_str(r#"{"name":"Bo","allergies":null}"#).unwrap();
        assert!(!member.has_allergies());
    }

    #[test]
    fn test_member_missing_allergies() {
        let member: Member = serde_json::from_str(r#"{"name":"Bo"}"#).unwrap();
        assert!(member.allergies.is_empty());
    }

    #[test]
    fn test_inventory_item_ignores_extra_fields() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"name":"Flour","quantity":2,"expires":"2026-01-01"}"#)
                .unwrap();
        assert_eq!(item, InventoryItem::new("Flour"));
    }
}
