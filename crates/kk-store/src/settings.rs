//! Persisted user selections: the active member and the allergy filter toggle.

use kk_core::AllergenScope;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::keys;
use crate::store::KeyValueStore;

fn read<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store
        .get(key)
        .inspect_err(|e| warn!(key, error = %e, "Failed to read setting"))
        .ok()
        .flatten()
}

/// Returns the selected member, or `None` for everyone.
pub fn active_user<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    read(store, keys::ACTIVE_USER).filter(|name| !name.is_empty())
}

/// Selects a member, or everyone with `None`.
pub fn set_active_user<S: KeyValueStore + ?Sized>(
    store: &mut S,
    user: Option<&str>,
) -> Result<(), StoreError> {
    let value = user.unwrap_or_default();
    store.set(keys::ACTIVE_USER, value)?;
    info!(user = value, "Active user changed");
    Ok(())
}

/// Returns `true` only if the toggle is stored as exactly `"true"`.
pub fn allergy_filter_enabled<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    read(store, keys::ALLERGY_FILTER_ENABLED).is_some_and(|value| value == "true")
}

/// Stores the allergy filter toggle.
pub fn set_allergy_filter_enabled<S: KeyValueStore + ?Sized>(
    store: &mut S,
    enabled: bool,
) -> Result<(), StoreError> {
    store.set(
        keys::ALLERGY_FILTER_ENABLED,
        if enabled { "true" } else { "false" },
    )?;
    info!(enabled, "Allergy filter toggled");
    Ok(())
}

/// Returns the scope warnings are computed in.
pub fn scope<S: KeyValueStore + ?Sized>(store: &S) -> AllergenScope {
    AllergenScope::from_active_user(active_user(store))
}
