//! Declarative field validation.
//!
//! A [`Schema`] is an ordered list of [`FieldRule`]s. Validating a value runs
//! every rule and collects the failures into [`ValidationErrors`], keyed by
//! [`FieldId`]. Only the first failing rule per field is kept, so a field with
//! several violated constraints surfaces one message at a time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldId;

/// Per-field validation messages, at most one per field.
///
/// Backed by an ordered map so iteration follows form order
/// (see [`FieldId::ALL`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldId, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message recorded for a field
    /// wins; later ones are ignored.
    pub fn record(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn message(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A single named check against a value of type `T`.
///
/// The check returns `None` when the value passes and `Some(message)` with a
/// user-facing message when it fails.
pub struct FieldRule<T> {
    field: FieldId,
    check: fn(&T) -> Option<String>,
}

impl<T> FieldRule<T> {
    pub fn new(field: FieldId, check: fn(&T) -> Option<String>) -> Self {
        Self { field, check }
    }

    pub fn field(&self) -> FieldId {
        self.field
    }
}

impl<T> Clone for FieldRule<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldRule<T> {}

impl<T> core::fmt::Debug for FieldRule<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// An ordered collection of rules for values of type `T`.
pub struct Schema<T> {
    rules: Vec<FieldRule<T>>,
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Builder-style so schemas read as a declaration.
    pub fn rule(mut self, field: FieldId, check: fn(&T) -> Option<String>) -> Self {
        self.rules.push(FieldRule::new(field, check));
        self
    }

    pub fn rules(&self) -> &[FieldRule<T>] {
        &self.rules
    }

    /// Runs every rule against `value`. All rules are visited even after a
    /// failure, so one pass reports every invalid field at once.
    pub fn validate(&self, value: &T) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            if let Some(message) = (rule.check)(value) {
                errors.record(rule.field, message);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T> core::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Schema")
            .field("rules", &self.rules)
            .finish()
    }
}
