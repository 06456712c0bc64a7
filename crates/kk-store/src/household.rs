//! Read-only household data written by the profile and inventory views.

use kk_core::{AllergyProfile, InventoryItem, Member};
use tracing::debug;

use crate::json::load_json_array;
use crate::keys;
use crate::store::KeyValueStore;

/// Returns the household members, or an empty list if none are stored.
pub fn members<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Member> {
    load_json_array(store, keys::MEMBERS)
}

/// Returns the legacy household allergen list.
pub fn legacy_allergens<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    load_json_array(store, keys::MEMBER_ALLERGENS)
}

/// Returns the inventory, or an empty list if none is stored.
pub fn inventory<S: KeyValueStore + ?Sized>(store: &S) -> Vec<InventoryItem> {
    load_json_array(store, keys::INVENTORY_ITEMS)
}

/// Snapshots members and allergens for the matcher.
pub fn allergy_profile<S: KeyValueStore + ?Sized>(store: &S) -> AllergyProfile {
    let profile = AllergyProfile::new(members(store), legacy_allergens(store));
    debug!(
        members = profile.members().len(),
        allergens = profile.household_allergens().len(),
        "Loaded allergy profile"
    );
    profile
}

/// Returns the aggregate allergen list used for the whole household.
pub fn household_allergens<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    allergy_profile(store).household_allergens().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::with_entries([
            (
                keys::MEMBERS,
                r#"[{"name":"Ana","allergies":["Peanut"]},{"name":"Bo","allergies":["milk","peanut"]}]"#,
            ),
            (keys::MEMBER_ALLERGENS, r#"["shellfish"]"#),
            (keys::INVENTORY_ITEMS, r#"[{"name":"Flour","quantity":1}]"#),
        ])
    }

    #[test]
    fn test_members_and_inventory() {
        let store = store();
        assert_eq!(members(&store).len(), 2);
        assert_eq!(inventory(&store), vec![InventoryItem::new("Flour")]);
        assert_eq!(legacy_allergens(&store), vec!["shellfish"]);
    }

    #[test]
    fn test_household_allergens_aggregate() {
        assert_eq!(
            household_allergens(&store()),
            vec!["shellfish", "Peanut", "milk"]
        );
    }

    #[test]
    fn test_corrupt_members_read_as_empty() {
        let store = MemoryStore::with_entries([(keys::MEMBERS, "oops")]);
        let profile = allergy_profile(&store);
        assert!(profile.members().is_empty());
        assert!(profile.household_allergens().is_empty());
    }
}
