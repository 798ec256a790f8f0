//! Input validation for request bodies.
//!
//! Validation collects every failure before reporting, keyed by the member
//! that failed. Nested collections use `member[index].field` keys.

use std::collections::BTreeMap;

use hsl_persistence::types::MAX_NAME_LENGTH;
use thiserror::Error;

/// Validation failures keyed by member name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} member(s) failed validation", errors.len())]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for a member.
    pub fn add(&mut self, member: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(member.into())
            .or_default()
            .push(message.into());
    }

    /// Merges failures from a nested value under `prefix`.
    pub fn merge_nested(&mut self, prefix: &str, nested: ValidationErrors) {
        for (member, messages) in nested.errors {
            let key = if prefix.is_empty() {
                member
            } else if member.starts_with('[') {
                format!("{prefix}{member}")
            } else {
                format!("{prefix}.{member}")
            };
            self.errors.entry(key).or_default().extend(messages);
        }
    }

    /// Returns true if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the messages recorded for a member.
    pub fn get(&self, member: &str) -> Option<&[String]> {
        self.errors.get(member).map(Vec::as_slice)
    }

    /// Consumes the set, returning the underlying map.
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }

    /// Returns `Ok(())` when empty, else `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Types that check their own invariants.
pub trait Validate {
    /// Validates the value, collecting every failure.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Validates each element of a list, keying failures by index.
pub fn validate_each<T: Validate>(items: &[T]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (index, item) in items.iter().enumerate() {
        if let Err(nested) = item.validate() {
            errors.merge_nested(&format!("[{index}]"), nested);
        }
    }
    errors
}

/// Checks a required name: present, not blank, at most [`MAX_NAME_LENGTH`] characters.
pub(crate) fn check_required_name(
    errors: &mut ValidationErrors,
    member: &str,
    value: Option<&str>,
    required_message: &str,
    too_long_message: &str,
) {
    match value.map(str::trim) {
        None | Some("") => errors.add(member, required_message),
        Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
            errors.add(member, too_long_message)
        }
        Some(_) => {}
    }
}

/// Checks an optional text value against [`MAX_NAME_LENGTH`].
pub(crate) fn check_max_length(
    errors: &mut ValidationErrors,
    member: &str,
    value: Option<&str>,
    message: &str,
) {
    if value.is_some_and(|v| v.trim().chars().count() > MAX_NAME_LENGTH) {
        errors.add(member, message);
    }
}
