//! Allergen scope selection.

use std::fmt;

/// Whose allergies are consulted for a warning computation.
///
/// # Examples
///
/// ```
/// use kk_core::AllergenScope;
///
/// assert_eq!(AllergenScope::from_active_user(None), AllergenScope::AllUsers);
/// assert_eq!(
///     AllergenScope::from_active_user(Some("Ana".to_owned())),
///     AllergenScope::SingleUser("Ana".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AllergenScope {
    /// Aggregate of every household member's allergens.
    #[default]
    AllUsers,

    /// A single household member, by name.
    SingleUser(String),
}

impl AllergenScope {
    /// Builds the scope implied by the persisted active-user selection.
    ///
    /// An empty selection means "all members".
    #[must_use]
    pub fn from_active_user(active_user: Option<String>) -> Self {
        match active_user {
            Some(name) if !name.is_empty() => Self::SingleUser(name),
            _ => Self::AllUsers,
        }
    }

    /// Returns the selected member name, if the scope is a single user.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::AllUsers => None,
            Self::SingleUser(name) => Some(name),
        }
    }
}

impl fmt::Display for AllergenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllUsers => f.write_str("All household members"),
            Self::SingleUser(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_active_user_is_all_users() {
        assert_eq!(
            AllergenScope::from_active_user(Some(String::new())),
            AllergenScope::AllUsers
        );
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(AllergenScope::AllUsers.to_string(), "All household members");
        assert_eq!(AllergenScope::SingleUser("Bo".to_owned()).to_string(), "Bo");
    }

    #[test]
    fn test_scope_user() {
        assert_eq!(AllergenScope::AllUsers.user(), None);
        assert_eq!(AllergenScope::SingleUser("Bo".to_owned()).user(), Some("Bo"));
    }
}
