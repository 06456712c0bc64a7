//! Fast hash set type alias.
//!
//! Type alias for [`FxHashSet`] from the `rustc-hash` crate. The keys
//! hashed in this workspace are short case-folded names (ingredients,
//! allergens, grocery items) coming from local data, so denial-of-service
//! resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use kk_core::{FxHashSet, fx_hash_set_with_capacity};
//!
//! let mut seen: FxHashSet<String> = fx_hash_set_with_capacity(4);
//! assert!(seen.insert("flour".to_owned()));
//! assert!(!seen.insert("flour".to_owned()));
//! ```

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new [`FxHashSet`] with the specified capacity.
///
/// # Examples
///
/// ```
/// use kk_core::fx_hash_set_with_capacity;
///
/// let set: kk_core::FxHashSet<String> = fx_hash_set_with_capacity(16);
/// assert!(set.capacity() >= 16);
/// ```
#[inline]
#[must_use]
pub fn fx_hash_set_with_capacity<V>(capacity: usize) -> FxHashSet<V> {
    FxHashSet::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_set_operations() {
        let mut set: FxHashSet<&str> = fx_hash_set_with_capacity(2);
        set.insert("sugar");
        set.insert("flour");
        assert!(set.contains("sugar"));
        assert!(!set.contains("salt"));
    }

    #[test]
    fn test_fx_hash_set_with_capacity() {
        let set: FxHashSet<String> = fx_hash_set_with_capacity(100);
        assert!(set.capacity() >= 100);
    }
}
