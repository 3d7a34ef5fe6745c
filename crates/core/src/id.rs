//! Identifiers used across the catalog.

use serde::{Deserialize, Serialize};

/// Identifier of a product variant.
///
/// Storefront data sources emit either numeric ids (`44012345678`) or opaque
/// strings (`"gid://shop/ProductVariant/1"`); both are accepted and compared
/// without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantId {
    Numeric(u64),
    Text(String),
}

impl VariantId {
    pub fn text(id: impl Into<String>) -> Self {
        Self::Text(id.into())
    }
}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VariantId::Numeric(n) => core::fmt::Display::fmt(n, f),
            VariantId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for VariantId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for VariantId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
