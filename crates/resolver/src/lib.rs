//! Variant resolution.
//!
//! Given a product's variant catalog and the shopper's (possibly partial)
//! option selection, pick the single variant the selection designates and
//! derive what the purchase area should show: price, compare-at price, stock
//! label, sold-out state.

pub mod availability;
pub mod config;
pub mod options;
pub mod resolver;
pub mod selection;
pub mod state;

pub use availability::{Availability, AvailabilityPolicy, QuantityDisplay, ReconciliationPolicy};
pub use config::{ConfigError, ResolverConfig};
pub use options::{MatchMode, OptionIndexMap};
pub use resolver::{resolve, VariantResolver};
pub use selection::Selection;
pub use state::{DisplayState, ResolveOutcome, ResolvedState};
