//! Display labels for the purchase area.
//!
//! The storefront embeds a translations blob per page; it is parsed once into
//! [`Labels`] and handed to the section with
//! [`ProductSection::with_labels`](crate::ProductSection::with_labels).

use serde::{Deserialize, Serialize};

use storefront_resolver::{DisplayState, ResolvedState};

const DEFAULT_IN_STOCK: &str = "In stock: ";
const DEFAULT_SOLD_OUT: &str = "Sold out";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default = "default_in_stock")]
    pub in_stock: String,
    #[serde(default = "default_sold_out")]
    pub sold_out: String,
}

fn default_in_stock() -> String {
    DEFAULT_IN_STOCK.to_string()
}

fn default_sold_out() -> String {
    DEFAULT_SOLD_OUT.to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            in_stock: default_in_stock(),
            sold_out: default_sold_out(),
        }
    }
}

impl Labels {
    /// Parse the embedded translations blob; missing keys keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Like [`Labels::from_json`], falling back to defaults on malformed input.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(labels) => labels,
            Err(err) => {
                tracing::warn!(error = %err, "translations unreadable; using default labels");
                Self::default()
            }
        }
    }

    /// Stock line for a resolved state: `"In stock: 5"`, `"In stock"`, or
    /// `"Sold out"`.
    pub fn availability_text(&self, state: &ResolvedState) -> String {
        match (state.display, state.display_quantity) {
            (DisplayState::SoldOut, _) => self.sold_out.clone(),
            (DisplayState::Available, Some(qty)) => format!("{} {qty}", self.in_stock.trim_end()),
            (DisplayState::Available, None) => self
                .in_stock
                .trim()
                .trim_end_matches(':')
                .trim_end()
                .to_string(),
        }
    }
}
