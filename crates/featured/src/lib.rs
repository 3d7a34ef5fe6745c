//! Featured-products ordering.
//!
//! Pure ordering rules behind the featured-products sort control: the
//! original (manual) order, price in either direction, and title.

pub mod sort;

pub use sort::{sort_items, FeaturedItem, SortOrder};
