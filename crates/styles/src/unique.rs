//! Style name uniqueness
//!
//! The compiler happily emits two rules with the same label; accepting such
//! a list is a separate decision made here.

use rustc_hash::FxHashSet;

use crate::error::{StylesError, StylesResult};
use crate::rule::StyleRule;

/// How style names are compared when checking for duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniquenessPolicy {
    /// Exact, case-sensitive comparison
    #[default]
    CaseSensitive,
    /// Names differing only in case are duplicates
    CaseInsensitive,
}

impl UniquenessPolicy {
    /// Fail with [`StylesError::DuplicateName`] if two rules share a name
    pub fn check(&self, rules: &[StyleRule]) -> StylesResult<()> {
        let mut seen = FxHashSet::default();
        for rule in rules {
            let key = match self {
                Self::CaseSensitive => rule.name.clone(),
                Self::CaseInsensitive => rule.name.to_lowercase(),
            };
            if !seen.insert(key) {
                log::debug!("Duplicate style name: {}", rule.name);
                return Err(StylesError::DuplicateName);
            }
        }
        Ok(())
    }
}

/// Check names with the default case-sensitive policy
pub fn validate_unique(rules: &[StyleRule]) -> StylesResult<()> {
    UniquenessPolicy::default().check(rules)
}
