//! Persisted state for kitchen-kompanion.
//!
//! All state lives in a string key-value store shared with the other views
//! of the household app. This crate provides:
//!
//! - The [`KeyValueStore`] trait with in-memory ([`MemoryStore`]) and
//!   file-backed ([`FileStore`]) backends
//! - The key table ([`keys`]) and fail-soft typed JSON access ([`json`])
//! - The [`RecipeRepository`] over the `recipes` key
//! - Readers for household data written elsewhere ([`household`])
//! - The active user and allergy filter toggle ([`settings`])
//! - The grocery list and its legacy markup ([`grocery_list`], [`markup`])
//!
//! # Crate Dependencies
//!
//! ```text
//! kk-cli ──► kk-tui ──► kk-store ──► kk-core
//!        └──────────────►
//! ```
//!
//! # Example
//!
//! ```
//! use kk_core::{RecipeDraft, match_allergens};
//! use kk_store::{MemoryStore, RecipeRepository, household, settings};
//!
//! let store = MemoryStore::with_entries([
//!     ("members", r#"[{"name":"Ana","allergies":["peanut"]}]"#),
//!     ("activeUser", "Ana"),
//! ]);
//! let mut repo = RecipeRepository::open(store);
//! repo.create(&RecipeDraft {
//!     name: "Satay".to_owned(),
//!     ingredients: vec![kk_core::IngredientDraft::new("Peanut butter", "2 tbsp")],
//!     ..RecipeDraft::default()
//! })?;
//!
//! let profile = household::allergy_profile(repo.store());
//! let scope = settings::scope(repo.store());
//! let recipe = repo.get("Satay").unwrap();
//! assert_eq!(match_allergens(&recipe.ingredients, &scope, &profile).len(), 1);
//! # Ok::<(), kk_store::StoreError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod grocery_list;
pub mod household;
pub mod json;
pub mod keys;
pub mod markup;
pub mod repository;
pub mod settings;
pub mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use grocery_list::MergeOutcome;
pub use repository::{RecipeRepository, load_all};
pub use store::{KeyValueStore, MemoryStore};
