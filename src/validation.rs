//! Accumulating field validation.
//!
//! Constraint violations are collected into a single field → message set and
//! reported together; validation never stops at the first failure.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Check whether `value` is a member of a closed set of permitted values.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// Collects validation failures keyed by field name.
///
/// The first message recorded for a field wins; later messages for the same
/// field are ignored so the caller sees one actionable message per field.
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no violations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a violation for `field` unless one is already present.
    pub fn add_error(&mut self, field: &str, message: &str) {
        if !self.errors.contains_key(field) {
            self.errors.insert(field.to_string(), message.to_string());
        }
    }

    /// Record a violation for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Consume the validator, yielding the accumulated violations.
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors(self.errors)
    }
}

/// The aggregated field → message set produced by a failed validation.
///
/// Serializes as a flat JSON object so it can be reported to the caller
/// verbatim. Ordered by field name for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}
