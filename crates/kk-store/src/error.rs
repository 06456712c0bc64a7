//! Error types for the kk-store crate.
//!
//! This module provides the [`StoreError`] type for errors raised by the
//! persisted store backends and the recipe repository.

use camino::Utf8PathBuf;
use kk_core::DraftError;

/// Errors that can occur while reading or writing persisted state.
///
/// Corrupt *values* are never errors: readers substitute an empty collection
/// and log a warning. Only a store document that cannot be read at all is
/// reported, as [`StoreError::Corrupt`].
///
/// # Error Recovery Strategy
///
/// - **I/O errors** ([`StoreError::Io`]): Fatal - the store cannot be written
/// - **Corrupt document** ([`StoreError::Corrupt`]): Fatal - refuse to overwrite it
/// - **Serialization** ([`StoreError::Serialize`]): Fatal - a bug, not user input
/// - **Recipe not found** ([`StoreError::RecipeNotFound`]): Recoverable - report and continue
/// - **Duplicate name** ([`StoreError::DuplicateName`]): Recoverable - report and continue
/// - **Invalid recipe** ([`StoreError::InvalidRecipe`]): Recoverable - fix the form
///
/// # Examples
///
/// ```
/// use kk_store::StoreError;
///
/// let err = StoreError::recipe_not_found("Pancakes");
/// assert!(err.is_recoverable());
/// assert!(err.to_string().contains("Pancakes"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read or write the store document.
    #[error("store I/O error on {path}: {source}")]
    Io {
        /// The store document path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store document exists but is not a JSON object of strings.
    #[error("store document {path} is corrupt: {source}")]
    Corrupt {
        /// The store document path.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// The key being written.
        key: String,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// No recipe has the given name.
    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    /// Another recipe already uses the given name.
    #[error("a recipe named '{0}' already exists")]
    DuplicateName(String),

    /// The recipe form did not validate.
    #[error("invalid recipe: {0}")]
    InvalidRecipe(#[from] DraftError),
}

impl StoreError {
    /// Creates a new [`StoreError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`StoreError::Corrupt`] error.
    #[inline]
    pub fn corrupt(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`StoreError::Serialize`] error.
    #[inline]
    pub fn serialize(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialize {
            key: key.into(),
            source,
        }
    }

    /// Creates a new [`StoreError::RecipeNotFound`] error.
    #[inline]
    pub fn recipe_not_found(name: impl Into<String>) -> Self {
        Self::RecipeNotFound(name.into())
    }

    /// Creates a new [`StoreError::DuplicateName`] error.
    #[inline]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Returns `true` if the error came from user input and the interaction
    /// can simply continue.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RecipeNotFound(_) | Self::DuplicateName(_) | Self::InvalidRecipe(_)
        )
    }

    /// Returns `true` if the store itself is unusable.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the store document path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Io { path, .. } | Self::Corrupt { path, .. } => Some(path),
            Self::Serialize { .. }
            | Self::RecipeNotFound(_)
            | Self::DuplicateName(_)
            | Self::InvalidRecipe(_) => None,
        }
    }
}
