//! The shared grocery list.
//!
//! The list lives under the `data` key in the list view's markup format (see
//! [`crate::markup`]). New entries are appended to the stored markup as-is,
//! so anything else the list view keeps in there survives. A JSON array of
//! `{"name": ...}` objects is also accepted on read and is rewritten as
//! markup on the next change.

use kk_core::{GroceryListItem, Ingredient, compute_missing, merge_into_grocery_list};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::household;
use crate::json::decode_elements;
use crate::keys;
use crate::markup;
use crate::store::KeyValueStore;

/// What happened when a recipe was pushed to the grocery list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Names appended to the list, in order.
    pub added: Vec<String>,
    /// Missing ingredients skipped because they were already listed.
    pub already_listed: usize,
    /// Ingredients skipped because they are in the inventory.
    pub in_inventory: usize,
}

impl MergeOutcome {
    /// Returns the number of items appended.
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

enum Stored {
    Markup(String),
    Structured(Vec<GroceryListItem>),
}

impl Stored {
    fn items(&self) -> Vec<GroceryListItem> {
        match self {
            Self::Markup(markup) => markup::decode(markup)
                .into_iter()
                .map(GroceryListItem::new)
                .collect(),
            Self::Structured(items) => items.clone(),
        }
    }
}

fn load<S: KeyValueStore + ?Sized>(store: &S) -> Stored {
    let raw = match store.get(keys::GROCERY_LIST) {
        Ok(raw) => raw.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Failed to read grocery list");
            String::new()
        }
    };

    if raw.trim_start().starts_with('[') {
        if let Ok(Value::Array(elements)) = serde_json::from_str::<Value>(&raw) {
            return Stored::Structured(decode_elements(keys::GROCERY_LIST, elements));
        }
    }
    Stored::Markup(raw)
}

/// Returns the grocery list items in list order.
pub fn items<S: KeyValueStore + ?Sized>(store: &S) -> Vec<GroceryListItem> {
    load(store).items()
}

/// Pushes a recipe's missing ingredients to the grocery list.
///
/// Ingredients in the inventory (case-insensitive exact name) and names
/// already on the list are skipped. The list is written once, and only if
/// something was added.
pub fn add_missing<S: KeyValueStore + ?Sized>(
    store: &mut S,
    ingredients: &[Ingredient],
) -> Result<MergeOutcome, StoreError> {
    let inventory = household::inventory(&*store);
    let missing = compute_missing(ingredients, &inventory);

    let stored = load(&*store);
    let mut list = stored.items();
    let added = merge_into_grocery_list(&missing, &mut list);

    let outcome = MergeOutcome {
        already_listed: missing.len() - added.len(),
        in_inventory: ingredients.len() - missing.len(),
        added: added.into_iter().map(|item| item.name).collect(),
    };

    if outcome.added.is_empty() {
        debug!(
            in_inventory = outcome.in_inventory,
            already_listed = outcome.already_listed,
            "Nothing to add to grocery list"
        );
        return Ok(outcome);
    }

    let markup = match stored {
        Stored::Markup(mut markup) => {
            for name in &outcome.added {
                markup::encode_item(name, &mut markup);
            }
            markup
        }
        Stored::Structured(_) => markup::encode(list.iter().map(|item| item.name.as_str())),
    };
    store.set(keys::GROCERY_LIST, &markup)?;

    info!(
        added = outcome.added_count(),
        total = list.len(),
        "Added items to grocery list"
    );
    Ok(outcome)
}

/// Empties the grocery list.
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(keys::GROCERY_LIST)?;
    info!("Cleared grocery list");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn ingredients(names: &[&str]) -> Vec<Ingredient> {
        names.iter().map(|n| Ingredient::new(*n, "1")).collect()
    }

    #[test]
    fn test_add_to_empty_list() {
        let mut store = MemoryStore::new();
        let outcome = add_missing(&mut store, &ingredients(&["Flour", "Eggs"])).unwrap();

        assert_eq!(outcome.added, vec!["Flour", "Eggs"]);
        insta::assert_snapshot!(
            store.get(keys::GROCERY_LIST).unwrap().unwrap(),
            @"<li>Flour<span>×</span></li><li>Eggs<span>×</span></li>"
        );
    }

    #[test]
    fn test_inventory_and_listed_items_are_skipped() {
        let mut store = MemoryStore::with_entries([
            (keys::INVENTORY_ITEMS, r#"[{"name":"flour"}]"#),
            (keys::GROCERY_LIST, "<li>EGGS<span>×</span></li>"),
        ]);

        let outcome =
            add_missing(&mut store, &ingredients(&["Flour", "Eggs", "Sugar", "sugar"])).unwrap();

        assert_eq!(
            outcome,
            MergeOutcome {
                added: vec!["Sugar".to_owned()],
                already_listed: 2,
                in_inventory: 1,
            }
        );
        let names: Vec<_> = items(&store).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["EGGS", "Sugar"]);
    }

    #[test]
    fn test_second_push_adds_nothing_and_does_not_write() {
        let mut store = MemoryStore::new();
        add_missing(&mut store, &ingredients(&["Milk"])).unwrap();
        let before = store.get(keys::GROCERY_LIST).unwrap();

        let outcome = add_missing(&mut store, &ingredients(&["milk"])).unwrap();
        assert_eq!(outcome.added_count(), 0);
        assert_eq!(outcome.already_listed, 1);
        assert_eq!(store.get(keys::GROCERY_LIST).unwrap(), before);
    }

    #[test]
    fn test_existing_markup_is_preserved() {
        let existing = "<li class=\"checked\">Tea<span>×</span></li>";
        let mut store = MemoryStore::with_entries([(keys::GROCERY_LIST, existing)]);

        add_missing(&mut store, &ingredients(&["Jam"])).unwrap();
        let stored = store.get(keys::GROCERY_LIST).unwrap().unwrap();
        assert!(stored.starts_with(existing));
        assert!(stored.ends_with("<li>Jam<span>×</span></li>"));
    }

    #[test]
    fn test_structured_list_is_read_and_rewritten_as_markup() {
        let mut store =
            MemoryStore::with_entries([(keys::GROCERY_LIST, r#"[{"name":"Rice"},{"bad":1}]"#)]);
        assert_eq!(items(&store), vec![GroceryListItem::new("Rice")]);

        add_missing(&mut store, &ingredients(&["Beans"])).unwrap();
        assert_eq!(
            store.get(keys::GROCERY_LIST).unwrap().as_deref(),
            Some("<li>Rice<span>×</span></li><li>Beans<span>×</span></li>")
        );
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::with_entries([(keys::GROCERY_LIST, "<li>Tea</li>")]);
        clear(&mut store).unwrap();
        assert!(items(&store).is_empty());
    }
}
