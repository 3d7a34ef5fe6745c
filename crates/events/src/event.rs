use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UI event delivered to a product section.
///
/// Events are **immutable** facts about what the shopper did.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "storefront.selection.changed").
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Event: SelectionChanged.
///
/// The shopper picked `value` for the option dimension `dimension`. A blank
/// value means the dimension was cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub dimension: String,
    pub value: String,
    pub occurred_at: DateTime<Utc>,
}

impl SelectionChanged {
    pub fn new(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            dimension: dimension.into(),
            value: value.into(),
            occurred_at: Utc::now(),
        }
    }
}

impl Event for SelectionChanged {
    fn event_type(&self) -> &'static str {
        "storefront.selection.changed"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
