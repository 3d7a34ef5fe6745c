//! Product variant catalog.
//!
//! This crate models the variant records a storefront embeds in each product
//! page and loads them into a validated, ordered catalog (no IO, no rendering).

pub mod catalog;
pub mod variant;

pub use catalog::VariantCatalog;
pub use variant::{InventoryPolicy, PriceField, Variant, VariantRecord, MAX_OPTIONS};
