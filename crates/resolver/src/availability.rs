//! Purchasability and stock-label rules for a resolved variant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_catalog::{InventoryPolicy, Variant};
use storefront_core::normalize;

use crate::config::ConfigError;
use crate::state::DisplayState;

/// How the catalog's `available` flag is reconciled with inventory facts.
///
/// Upstream data has been seen to send `available: false` for variants that
/// are untracked or on a `continue` policy. Which side wins is a policy, not a
/// hidden detail of the availability computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconciliationPolicy {
    /// Inventory facts decide. `available: false` is overridden when stock
    /// allows a sale, and `available: true` does not rescue a tracked `deny`
    /// variant with no stock.
    #[default]
    TrustDerived,
    /// Both must agree: a missing flag counts as `true`, and the variant is
    /// available only if the flag is set *and* stock allows a sale.
    RequireBoth,
}

impl ReconciliationPolicy {
    pub fn is_available(&self, variant: &Variant) -> bool {
        let derived = variant.stock_allows_sale();
        match self {
            ReconciliationPolicy::TrustDerived => {
                if variant.available_flag() == Some(false) && derived {
                    tracing::debug!(
                        variant = %variant.id_typed(),
                        "available flag overridden by inventory facts"
                    );
                }
                derived
            }
            ReconciliationPolicy::RequireBoth => variant.available_flag().unwrap_or(true) && derived,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationPolicy::TrustDerived => "trust-derived",
            ReconciliationPolicy::RequireBoth => "require-both",
        }
    }
}

impl FromStr for ReconciliationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "trust-derived" | "trust_derived" => Ok(ReconciliationPolicy::TrustDerived),
            "require-both" | "require_both" => Ok(ReconciliationPolicy::RequireBoth),
            other => Err(ConfigError::invalid("reconciliation policy", other)),
        }
    }
}

/// When a numeric stock count is shown next to "in stock".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuantityDisplay {
    /// Tracked, `deny` policy, and positive quantity.
    #[default]
    TrackedDenyOnly,
    /// Tracked and positive quantity, whatever the policy.
    AnyTracked,
}

impl QuantityDisplay {
    pub fn quantity_for(&self, variant: &Variant) -> Option<i64> {
        let qty = variant.inventory_quantity();
        if !variant.inventory_tracked() || qty <= 0 {
            return None;
        }
        match self {
            QuantityDisplay::TrackedDenyOnly => {
                (variant.inventory_policy() == InventoryPolicy::Deny).then_some(qty)
            }
            QuantityDisplay::AnyTracked => Some(qty),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityDisplay::TrackedDenyOnly => "tracked-deny-only",
            QuantityDisplay::AnyTracked => "any-tracked",
        }
    }
}

impl FromStr for QuantityDisplay {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "tracked-deny-only" | "tracked_deny_only" => Ok(QuantityDisplay::TrackedDenyOnly),
            "any-tracked" | "any_tracked" => Ok(QuantityDisplay::AnyTracked),
            other => Err(ConfigError::invalid("quantity display", other)),
        }
    }
}

/// Availability rules applied to a resolved variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPolicy {
    #[serde(default)]
    pub reconciliation: ReconciliationPolicy,
    #[serde(default)]
    pub quantity_display: QuantityDisplay,
}

/// Outcome of applying an [`AvailabilityPolicy`] to one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub display: DisplayState,
    pub display_quantity: Option<i64>,
}

impl AvailabilityPolicy {
    pub fn evaluate(&self, variant: &Variant) -> Availability {
        if self.reconciliation.is_available(variant) {
            Availability {
                display: DisplayState::Available,
                display_quantity: self.quantity_display.quantity_for(variant),
            }
        } else {
            Availability {
                display: DisplayState::SoldOut,
                display_quantity: None,
            }
        }
    }
}
