//! `storefront-core`: catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{CatalogError, CatalogResult};
pub use id::VariantId;
pub use value_object::{normalize, OptionValue, ValueObject};
