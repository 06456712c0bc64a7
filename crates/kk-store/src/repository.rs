//! The recipe repository.
//!
//! [`RecipeRepository`] owns the store and an in-memory working set of
//! recipes kept in insertion order and keyed by name. Every mutation is
//! followed by one wholesale write of the `recipes` key, so the working set
//! and the store agree whenever a method returns.

use kk_core::{FxHashSet, Recipe, RecipeDraft, fx_hash_set_with_capacity};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::json::{load_json_array, save_json};
use crate::keys;
use crate::store::KeyValueStore;

/// Reads the stored recipe collection.
///
/// Missing, corrupt, or non-array values read as an empty collection.
pub fn load_all<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Recipe> {
    load_json_array(store, keys::RECIPES)
}

/// Drops recipes whose name repeats an earlier one.
fn dedup_by_name(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen: FxHashSet<String> = fx_hash_set_with_capacity(recipes.len());
    let total = recipes.len();
    let unique: Vec<Recipe> = recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.name.clone()))
        .collect();
    if unique.len() < total {
        warn!(
            dropped = total - unique.len(),
            "Stored recipes contained duplicate names; keeping the first of each"
        );
    }
    unique
}

/// Recipe collection backed by a [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use kk_core::RecipeDraft;
/// use kk_store::{MemoryStore, RecipeRepository};
///
/// let mut repo = RecipeRepository::open(MemoryStore::new());
/// repo.create(&RecipeDraft { name: "Soup".to_owned(), ..RecipeDraft::default() })?;
///
/// assert_eq!(repo.len(), 1);
/// assert!(repo.get("Soup").is_some());
/// # Ok::<(), kk_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct RecipeRepository<S> {
    store: S,
    recipes: Vec<Recipe>,
}

impl<S: KeyValueStore> RecipeRepository<S> {
    /// Opens the repository, loading the stored collection.
    pub fn open(store: S) -> Self {
        let recipes = dedup_by_name(load_all(&store));
        debug!(count = recipes.len(), "Loaded recipes");
        Self { store, recipes }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    ///
    /// Writing the `recipes` key through this handle leaves the working set
    /// stale until [`reload`](Self::reload).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the recipes in collection order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Looks up a recipe by exact name.
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    /// Returns the index of the recipe with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.recipes.iter().position(|r| r.name == name)
    }

    /// Returns the number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns `true` if there are no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Writes the working set to the store.
    pub fn save_all(&mut self) -> Result<(), StoreError> {
        save_json(&mut self.store, keys::RECIPES, &self.recipes)?;
        debug!(count = self.recipes.len(), "Saved recipes");
        Ok(())
    }

    /// Inserts a recipe, or replaces the fields of the recipe with the same
    /// name in place. Returns the recipe's index.
    ///
    /// The working set is left unchanged if the write fails.
    pub fn upsert(&mut self, recipe: Recipe) -> Result<usize, StoreError> {
        match self.position(&recipe.name) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.recipes[index], recipe);
                if let Err(e) = self.save_all() {
                    self.recipes[index] = previous;
                    return Err(e);
                }
                Ok(index)
            }
            None => {
                self.recipes.push(recipe);
                if let Err(e) = self.save_all() {
                    self.recipes.pop();
                    return Err(e);
                }
                Ok(self.recipes.len() - 1)
            }
        }
    }

    /// Creates a recipe from a form submission.
    ///
    /// A recipe that already has the submitted name is updated in place.
    pub fn create(&mut self, draft: &RecipeDraft) -> Result<&Recipe, StoreError> {
        let recipe = draft.validate()?;
        let name = recipe.name.clone();
        let existed = self.position(&name).is_some();

        let index = self.upsert(recipe)?;
        info!(recipe = %name, updated = existed, "Saved recipe");
        Ok(&self.recipes[index])
    }

    /// Applies an edit form to the recipe named `original_name`.
    ///
    /// The recipe is changed in place and keeps its position, including when
    /// it is renamed.
    ///
    /// # Errors
    ///
    /// [`StoreError::RecipeNotFound`] if no recipe has `original_name`,
    /// [`StoreError::DuplicateName`] if the new name belongs to another recipe,
    /// [`StoreError::InvalidRecipe`] if the form does not validate.
    pub fn update(&mut self, original_name: &str, draft: &RecipeDraft) -> Result<&Recipe, StoreError> {
        let index = self
            .position(original_name)
            .ok_or_else(|| StoreError::recipe_not_found(original_name))?;
        let recipe = draft.validate()?;

        if recipe.name != original_name && self.position(&recipe.name).is_some() {
            return Err(StoreError::duplicate_name(recipe.name));
        }

        let renamed = recipe.name != original_name;
        let previous = std::mem::replace(&mut self.recipes[index], recipe);
        if let Err(e) = self.save_all() {
            self.recipes[index] = previous;
            return Err(e);
        }

        let recipe = &self.recipes[index];
        info!(recipe = %recipe.name, renamed, "Updated recipe");
        Ok(recipe)
    }

    /// Deletes the recipe with the given name.
    ///
    /// Returns `false` without writing if there is no such recipe.
    pub fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        let Some(index) = self.position(name) else {
            debug!(recipe = name, "Delete of unknown recipe ignored");
            return Ok(false);
        };

        let removed = self.recipes.remove(index);
        if let Err(e) = self.save_all() {
            self.recipes.insert(index, removed);
            return Err(e);
        }
        info!(recipe = name, "Deleted recipe");
        Ok(true)
    }

    /// Deletes every recipe.
    pub fn delete_all(&mut self) -> Result<(), StoreError> {
        self.store.remove(keys::RECIPES)?;
        let count = std::mem::take(&mut self.recipes).len();
        info!(count, "Deleted all recipes");
        Ok(())
    }

    /// Discards the working set and reads the collection again.
    pub fn reload(&mut self) {
        self.recipes = dedup_by_name(load_all(&self.store));
        debug!(count = self.recipes.len(), "Reloaded recipes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use kk_core::{Ingredient, IngredientDraft};

    fn draft(name: &str, description: &str) -> RecipeDraft {
        RecipeDraft {
            name: name.to_owned(),
            description: description.to_owned(),
            ..RecipeDraft::default()
        }
    }

    fn names<S: KeyValueStore>(repo: &RecipeRepository<S>) -> Vec<&str> {
        repo.recipes().iter().map(|r| r.name.as_str()).collect()
    }

    /// Reads from an inner store but rejects every write.
    struct ReadOnly(MemoryStore);

    impl KeyValueStore for ReadOnly {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.set(key, "")
        }

        fn keys(&self) -> Vec<String> {
            self.0.keys()
        }
    }

    #[test]
    fn test_open_empty() {
        let repo = RecipeRepository::open(MemoryStore::new());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_open_corrupt_is_empty() {
        let store = MemoryStore::with_entries([(keys::RECIPES, "{oops")]);
        assert!(RecipeRepository::open(store).is_empty());
    }

    #[test]
    fn test_create_persists_immediately() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        let mut d = draft("Toast", "Quick");
        d.ingredients = vec![IngredientDraft::new("Bread", "2 slices")];
        repo.create(&d).unwrap();

        let stored = load_all(repo.store());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].ingredients[0], Ingredient::new("Bread", "2 slices"));
    }

    #[test]
    fn test_upsert_then_load_yields_exactly_one() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("Soup", "v1")).unwrap();
        repo.create(&draft("Salad", "")).unwrap();
        repo.create(&draft("Soup", "v2")).unwrap();

        let stored = load_all(repo.store());
        let soups: Vec<_> = stored.iter().filter(|r| r.name == "Soup").collect();
        assert_eq!(soups.len(), 1);
        assert_eq!(soups[0].description, "v2");
        assert_eq!(names(&repo), vec!["Soup", "Salad"]);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        let err = repo.create(&draft("  ", "")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecipe(_)));
        assert_eq!(repo.store().get(keys::RECIPES).unwrap(), None);
    }

    #[test]
    fn test_rename_updates_in_place() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("A", "")).unwrap();
        repo.create(&draft("B", "")).unwrap();
        repo.create(&draft("C", "")).unwrap();

        repo.update("B", &draft("Bee", "renamed")).unwrap();

        assert_eq!(names(&repo), vec!["A", "Bee", "C"]);
        let stored: Vec<_> = load_all(repo.store()).into_iter().map(|r| r.name).collect();
        assert_eq!(stored, vec!["A", "Bee", "C"]);
    }

    #[test]
    fn test_rename_onto_existing_is_rejected() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("A", "")).unwrap();
        repo.create(&draft("B", "")).unwrap();

        let err = repo.update("B", &draft("A", "")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "A"));
        assert_eq!(names(&repo), vec!["A", "B"]);
    }

    #[test]
    fn test_update_missing_recipe() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        let err = repo.update("ghost", &draft("ghost", "")).unwrap_err();
        assert!(matches!(err, StoreError::RecipeNotFound(_)));
    }

    #[test]
    fn test_update_keeping_name() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("A", "old")).unwrap();
        let updated = repo.update("A", &draft("A", "new")).unwrap();
        assert_eq!(updated.description, "new");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("A", "")).unwrap();
        repo.create(&draft("B", "")).unwrap();

        assert!(repo.delete("A").unwrap());
        assert!(!repo.delete("A").unwrap());

        let stored = load_all(repo.store());
        assert!(stored.iter().all(|r| r.name != "A"));
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_delete_all_removes_key() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("A", "")).unwrap();
        repo.delete_all().unwrap();

        assert!(repo.is_empty());
        assert_eq!(repo.store().get(keys::RECIPES).unwrap(), None);
    }

    #[test]
    fn test_save_is_stable_under_reserialization() {
        let raw = r#"[{"name":"Pancakes","description":"Sunday","fullDescription":"","tags":"breakfast","ingredients":[{"name":"Flour","size":"2 cups"}]}]"#;
        let mut repo = RecipeRepository::open(MemoryStore::with_entries([(keys::RECIPES, raw)]));

        repo.save_all().unwrap();
        assert_eq!(repo.store().get(keys::RECIPES).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_open_drops_duplicate_names() {
        let raw = r#"[{"name":"A","description":"first"},{"name":"A","description":"second"}]"#;
        let repo = RecipeRepository::open(MemoryStore::with_entries([(keys::RECIPES, raw)]));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("A").unwrap().description, "first");
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let mut repo = RecipeRepository::open(MemoryStore::new());
        repo.create(&draft("A", "")).unwrap();

        repo.store_mut()
            .set(keys::RECIPES, r#"[{"name":"Z"}]"#)
            .unwrap();
        assert_eq!(names(&repo), vec!["A"]);

        repo.reload();
        assert_eq!(names(&repo), vec!["Z"]);
    }

    #[test]
    fn test_failed_write_leaves_working_set_unchanged() {
        let store = MemoryStore::with_entries([(
            keys::RECIPES,
            r#"[{"name":"Soup","description":"Hot"}]"#,
        )]);
        let mut repo = RecipeRepository::open(ReadOnly(store));

        assert!(repo.upsert(Recipe::new("Salad", "")).is_err());
        assert!(repo.create(&draft("Stew", "")).is_err());
        assert_eq!(names(&repo), ["Soup"]);

        assert!(repo.upsert(Recipe::new("Soup", "Cold")).is_err());
        assert_eq!(repo.get("Soup").map(|r| r.description.as_str()), Some("Hot"));

        assert!(repo.update("Soup", &draft("Broth", "")).is_err());
        assert!(repo.delete("Soup").is_err());
        assert_eq!(names(&repo), ["Soup"]);
        assert_eq!(load_all(repo.store()).len(), 1);
    }
}
