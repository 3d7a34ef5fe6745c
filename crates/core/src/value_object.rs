//! Value object trait: equality by value, not identity.
//!
//! Option values, price strings, and resolved display snapshots carry no
//! identity of their own. Two of them with the same contents are the same
//! thing.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A `Variant` is an
/// entity (it has a `VariantId`); the `OptionValue` "Red" it carries is a value
/// object.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceDisplay(String);
///
/// impl ValueObject for PriceDisplay {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A single free-text option value as published by the catalog (e.g. `"Red"`).
///
/// The raw text is kept for display; comparisons against shopper input go
/// through [`OptionValue::matches`], which trims and case-folds both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OptionValue(String);

impl OptionValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed, lower-cased form used for comparisons.
    pub fn normalized(&self) -> String {
        normalize(&self.0)
    }

    /// Case-insensitive, whitespace-trimmed equality with shopper input.
    pub fn matches(&self, chosen: &str) -> bool {
        normalize(&self.0) == normalize(chosen)
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl ValueObject for OptionValue {}

impl core::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Normalize free text for option comparisons.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
