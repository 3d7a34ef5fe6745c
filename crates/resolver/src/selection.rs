//! The shopper's partial choice of option values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use storefront_core::normalize;

/// Chosen option values, keyed by logical dimension name (`"color"`, `"size"`).
///
/// At most one value per dimension. A dimension is absent until the shopper
/// picks something for it; absent dimensions impose no constraint when
/// resolving. Dimension names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Selection {
    values: BTreeMap<String, String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from `(dimension, value)` pairs; later pairs win.
    pub fn from_pairs<I, D, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (D, V)>,
        D: AsRef<str>,
        V: Into<String>,
    {
        let mut selection = Self::new();
        for (dimension, value) in pairs {
            selection.select(dimension.as_ref(), value);
        }
        selection
    }

    /// Record a choice, replacing any earlier value for the same dimension.
    ///
    /// A blank value clears the dimension instead (nothing was chosen).
    pub fn select(&mut self, dimension: &str, value: impl Into<String>) {
        let value = value.into();
        let key = normalize(dimension);
        if value.trim().is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    /// Builder form of [`Selection::select`].
    pub fn with(mut self, dimension: &str, value: impl Into<String>) -> Self {
        self.select(dimension, value);
        self
    }

    pub fn clear(&mut self, dimension: &str) {
        self.values.remove(&normalize(dimension));
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.values.get(&normalize(dimension)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(dimension, value)` pairs, dimension names normalized.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Selection {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self::from_pairs(values)
    }
}

impl From<Selection> for BTreeMap<String, String> {
    fn from(selection: Selection) -> Self {
        selection.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_choice_replaces_earlier() {
        let mut s = Selection::new();
        s.select("color", "Red");
        s.select("color", "Blue");
        assert_eq!(s.get("color"), Some("Blue"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn dimension_names_are_case_insensitive() {
        let s = Selection::new().with(" Color ", "Red");
        assert_eq!(s.get("color"), Some("Red"));
        assert_eq!(s.get("COLOR"), Some("Red"));
    }

    #[test]
    fn blank_value_clears_dimension() {
        let mut s = Selection::new().with("size", "M");
        s.select("size", "   ");
        assert!(s.is_empty());
    }

    #[test]
    fn clear_removes_choice() {
        let mut s = Selection::from_pairs([("color", "Red"), ("size", "M")]);
        s.clear("COLOR");
        assert_eq!(s.get("color"), None);
        assert_eq!(s.get("size"), Some("M"));
    }

    #[test]
    fn value_text_is_kept_as_given() {
        // Normalization happens at comparison time, not on insert.
        let s = Selection::new().with("color", " red ");
        assert_eq!(s.get("color"), Some(" red "));
    }

    #[test]
    fn deserializes_from_plain_object() {
        let s: Selection =
            serde_json::from_str(r#"{"Color": "Red", "size": "M", "material": " "}"#).unwrap();
        assert_eq!(s.get("color"), Some("Red"));
        assert_eq!(s.get("size"), Some("M"));
        assert_eq!(s.len(), 2);
    }
}
