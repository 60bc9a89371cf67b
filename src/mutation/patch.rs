//! Explicit field-level patches for partial updates.

use serde::{Deserialize, Deserializer};

/// A partial-update field: either left alone or set to a new value.
///
/// Deserializes from JSON with `#[serde(default)]` on the field: an absent
/// key is [`FieldPatch::Keep`], a present key is [`FieldPatch::Set`]. A JSON
/// `null` is a decode error rather than a stand-in for absence, so "clear
/// this field" has to be modeled as an explicit value.
///
/// ```
/// use gatehouse::mutation::FieldPatch;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Default)]
/// struct GadgetPatch {
///     #[serde(default)]
///     name: FieldPatch<String>,
///     #[serde(default)]
///     price: FieldPatch<f64>,
/// }
///
/// let patch: GadgetPatch = serde_json::from_str(r#"{"name": "widget"}"#).unwrap();
/// assert!(patch.name.is_set());
/// assert!(!patch.price.is_set());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Replace the current value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// True when the patch carries a new value.
    pub fn is_set(&self) -> bool {
        matches!(self, FieldPatch::Set(_))
    }

    /// Apply the patch onto `target`, replacing it only for `Set`.
    pub fn apply_to(self, target: &mut T) {
        if let FieldPatch::Set(value) = self {
            *target = value;
        }
    }

    /// Borrow the new value, if one is present.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldPatch::Set(value) => Some(value),
            FieldPatch::Keep => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(FieldPatch::Set)
    }
}
