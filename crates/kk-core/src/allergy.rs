//! Allergy matching.
//!
//! An allergen is *triggered* by an ingredient when either case-folded
//! string contains the other. This is a plain substring heuristic, so
//! `"egg"` also triggers on `"eggplant"`, and `"tree nut"` does not trigger
//! on `"almond"`. An empty allergen or ingredient name is contained in
//! every string and therefore always triggers.
//!
//! Each allergen yields at most one warning per evaluation, and warnings are
//! returned in allergen order (the member's own list order, or the household
//! aggregate order), never in ingredient order.
//!
//! # Example
//!
//! ```
//! use kk_core::{AllergenScope, AllergyProfile, Ingredient, Member, match_allergens};
//!
//! let profile = AllergyProfile::new(vec![Member::new("A", ["almond"])], Vec::<String>::new());
//! let warnings = match_allergens(
//!     &[Ingredient::new("almond milk", "1 cup")],
//!     &AllergenScope::SingleUser("A".to_owned()),
//!     &profile,
//! );
//!
//! assert_eq!(warnings.len(), 1);
//! assert!(warnings[0].to_string().contains("almond"));
//! assert!(warnings[0].to_string().contains("A"));
//! ```

use std::fmt;

use crate::fold;
use crate::hash::fx_hash_set_with_capacity;
use crate::types::{AllergenScope, Ingredient, Member};

/// Who a warning is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WarningSubject {
    /// The household as a whole.
    Household,
    /// A single named member.
    Member(String),
}

/// A triggered allergen.
///
/// Formats as the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllergyWarning {
    /// The allergen as the member (or household list) spelled it.
    pub allergen: String,
    /// Who the warning is for.
    pub subject: WarningSubject,
}

impl fmt::Display for AllergyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            WarningSubject::Household => write!(
                f,
                "This recipe contains {} which may cause allergic reactions for household members.",
                self.allergen
            ),
            WarningSubject::Member(name) => write!(
                f,
                "This recipe contains {} which may cause an allergic reaction for {name}.",
                self.allergen
            ),
        }
    }
}

/// A read-only snapshot of household allergy data.
///
/// Built by the storage layer from the `members` and `member_allergens`
/// keys so the matcher stays free of I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergyProfile {
    members: Vec<Member>,
    household: Vec<String>,
}

impl AllergyProfile {
    /// Creates a profile from the member list and the legacy aggregate list.
    ///
    /// The household aggregate is the legacy list followed by every member's
    /// allergies, de-duplicated case-insensitively in first-seen order.
    #[must_use]
    pub fn new<S: Into<String>>(members: Vec<Member>, legacy_allergens: Vec<S>) -> Self {
        let candidates = legacy_allergens
            .into_iter()
            .map(Into::into)
            .chain(members.iter().flat_map(|m| m.allergies.iter().cloned()));

        let mut seen = fx_hash_set_with_capacity(members.len() * 2);
        let household = candidates
            .filter(|allergen: &String| seen.insert(fold(allergen)))
            .collect();

        Self { members, household }
    }

    /// Returns the household members.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member by exact name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Returns the aggregate household allergen list.
    #[must_use]
    pub fn household_allergens(&self) -> &[String] {
        &self.household
    }

    /// Returns the allergens consulted for a scope.
    ///
    /// A single-user scope naming an unknown member yields no allergens; it
    /// does not fall back to the household list.
    #[must_use]
    pub fn allergens_for(&self, scope: &AllergenScope) -> &[String] {
        match scope {
            AllergenScope::AllUsers => &self.household,
            AllergenScope::SingleUser(name) => self
                .member(name)
                .map_or(&[][..], |member| member.allergies.as_slice()),
        }
    }
}

/// Returns `true` if the folded allergen and folded ingredient name overlap.
///
/// Plain containment both ways, so an empty string on either side matches.
#[inline]
fn triggers(allergen: &str, ingredient: &str) -> bool {
    ingredient.contains(allergen) || allergen.contains(ingredient)
}

/// Returns the first ingredient name (folded) that triggers the allergen.
fn first_trigger<'a>(allergen: &str, folded_ingredients: &'a [String]) -> Option<&'a str> {
    let allergen = fold(allergen);
    folded_ingredients
        .iter()
        .map(String::as_str)
        .find(|ingredient| triggers(&allergen, ingredient))
}

fn fold_ingredients(ingredients: &[Ingredient]) -> Vec<String> {
    ingredients.iter().map(|i| fold(&i.name)).collect()
}

/// Computes the allergy warnings for an ingredient list within a scope.
///
/// Returns an empty list when there are no ingredients, when the scope has
/// no allergens, or when a single-user scope names a member who no longer
/// exists.
#[must_use]
pub fn match_allergens(
    ingredients: &[Ingredient],
    scope: &AllergenScope,
    profile: &AllergyProfile,
) -> Vec<AllergyWarning> {
    if ingredients.is_empty() {
        return Vec::new();
    }

    let allergens = profile.allergens_for(scope);
    if allergens.is_empty() {
        return Vec::new();
    }

    let subject = match scope {
        AllergenScope::AllUsers => WarningSubject::Household,
        AllergenScope::SingleUser(name) => WarningSubject::Member(name.clone()),
    };

    let folded = fold_ingredients(ingredients);
    allergens
        .iter()
        .filter(|allergen| first_trigger(allergen, &folded).is_some())
        .map(|allergen| AllergyWarning {
            allergen: allergen.clone(),
            subject: subject.clone(),
        })
        .collect()
}

/// Returns `true` if any of the allergens is triggered by the ingredients.
///
/// Short-circuits on the first hit; used by the allergy filter, which only
/// needs the yes/no verdict.
#[must_use]
pub fn has_conflict(ingredients: &[Ingredient], allergens: &[String]) -> bool {
    if ingredients.is_empty() || allergens.is_empty() {
        return false;
    }
    let folded = fold_ingredients(ingredients);
    allergens
        .iter()
        .any(|allergen| first_trigger(allergen, &folded).is_some())
}
