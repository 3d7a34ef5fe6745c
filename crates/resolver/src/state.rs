//! Resolved purchasability/display snapshot.

use serde::Serialize;

use storefront_catalog::Variant;
use storefront_core::{ValueObject, VariantId};

/// The two display states of a product section's purchase area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Available,
    SoldOut,
}

/// How the resolved variant (if any) was reached.
///
/// None of these are errors: an empty catalog or an unmatched selection is a
/// normal state the page renders as sold out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveOutcome {
    /// Exactly one variant satisfies the selection.
    Matched,
    /// Several variants satisfy a partial selection; the first in catalog
    /// order was taken.
    Ambiguous { candidates: usize },
    /// No variant satisfies the selection.
    NoMatch,
    /// The catalog is empty (or failed to load).
    NoCatalog,
}

/// Snapshot handed to render handlers after every selection change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedState {
    pub variant: Option<Variant>,
    pub outcome: ResolveOutcome,
    pub display: DisplayState,
    pub purchasable: bool,
    pub display_quantity: Option<i64>,
    pub price_display: Option<String>,
    pub compare_at_price_display: Option<String>,
}

impl ResolvedState {
    /// Nothing resolved: sold out, not purchasable, no prices.
    pub fn unresolved(outcome: ResolveOutcome) -> Self {
        Self {
            variant: None,
            outcome,
            display: DisplayState::SoldOut,
            purchasable: false,
            display_quantity: None,
            price_display: None,
            compare_at_price_display: None,
        }
    }

    /// Id for the purchase form's hidden variant field.
    pub fn form_variant_id(&self) -> Option<&VariantId> {
        self.variant.as_ref().map(Variant::id_typed)
    }

    pub fn is_sold_out(&self) -> bool {
        self.display == DisplayState::SoldOut
    }
}

impl ValueObject for ResolvedState {}

/// Compare-at price worth showing: present and different from the price.
pub(crate) fn visible_compare_at(variant: &Variant) -> Option<String> {
    variant
        .compare_at_price_display()
        .filter(|compare| compare.trim() != variant.price_display().trim())
        .filter(|compare| !compare.trim().is_empty())
        .map(str::to_string)
}
