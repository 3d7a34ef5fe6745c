//! How selected dimensions line up with a variant's option slots.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::normalize;

use crate::config::ConfigError;

/// Logical dimension name → zero-based position in `Variant::option_values`.
///
/// Declared per product (e.g. `color → 0`, `size → 1`). Names are matched
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct OptionIndexMap {
    positions: BTreeMap<String, usize>,
}

impl OptionIndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map dimensions to positions in the order given (`["color", "size"]`
    /// yields `color → 0`, `size → 1`).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for (position, name) in names.into_iter().enumerate() {
            map.insert(name.as_ref(), position);
        }
        map
    }

    pub fn insert(&mut self, dimension: &str, position: usize) {
        self.positions.insert(normalize(dimension), position);
    }

    pub fn with(mut self, dimension: &str, position: usize) -> Self {
        self.insert(dimension, position);
        self
    }

    pub fn position(&self, dimension: &str) -> Option<usize> {
        self.positions.get(&normalize(dimension)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl From<BTreeMap<String, usize>> for OptionIndexMap {
    fn from(positions: BTreeMap<String, usize>) -> Self {
        let mut map = Self::new();
        for (dimension, position) in positions {
            map.insert(&dimension, position);
        }
        map
    }
}

impl From<OptionIndexMap> for BTreeMap<String, usize> {
    fn from(map: OptionIndexMap) -> Self {
        map.positions
    }
}

/// How a chosen value is compared against a variant's option values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Compare against the slot the [`OptionIndexMap`] assigns to the
    /// dimension. Falls back to [`MatchMode::AnySlot`] when no map is given.
    #[default]
    Positional,
    /// Legacy permissive matching: a chosen value matches if it equals *any*
    /// of the variant's option values, regardless of dimension.
    AnySlot,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Positional => "positional",
            MatchMode::AnySlot => "any-slot",
        }
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "positional" => Ok(MatchMode::Positional),
            "any-slot" | "any_slot" | "anyslot" => Ok(MatchMode::AnySlot),
            other => Err(ConfigError::invalid("match mode", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_names_assigns_positions_in_order() {
        let map = OptionIndexMap::from_names(["Color", "Size"]);
        assert_eq!(map.position("color"), Some(0));
        assert_eq!(map.position("SIZE"), Some(1));
        assert_eq!(map.position("material"), None);
    }

    #[test]
    fn deserializes_and_normalizes_names() {
        let map: OptionIndexMap = serde_json::from_str(r#"{"Size": 0, "color": 1}"#).unwrap();
        assert_eq!(map.position("size"), Some(0));
        assert_eq!(map.position("color"), Some(1));
    }

    #[test]
    fn match_mode_parses_known_names() {
        assert_eq!("positional".parse::<MatchMode>().unwrap(), MatchMode::Positional);
        assert_eq!(" Any-Slot ".parse::<MatchMode>().unwrap(), MatchMode::AnySlot);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }

    #[test]
    fn match_mode_defaults_to_positional() {
        assert_eq!(MatchMode::default(), MatchMode::Positional);
    }
}
