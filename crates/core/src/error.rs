//! Catalog error model.

use thiserror::Error;

use crate::id::VariantId;

/// Result type used across the catalog layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Raised while *loading* variant data. Resolution itself never fails; an
/// unusable catalog is represented in the resolved state instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The embedded data blob was not valid JSON (or had the wrong shape).
    #[error("malformed catalog data: {0}")]
    Json(String),

    /// A record parsed but broke a variant invariant.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Two records share an id.
    #[error("duplicate variant id: {0}")]
    DuplicateVariant(VariantId),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
