//! Product section events and rendering hooks.
//!
//! Turns discrete selection-change events into resolved states and hands them
//! to registered render handlers. Resolution stays in `storefront-resolver`;
//! drawing stays with the handlers.

pub mod event;
pub mod handler;
pub mod labels;
pub mod section;

pub use event::{Event, SelectionChanged};
pub use handler::RenderHandler;
pub use labels::Labels;
pub use section::ProductSection;
