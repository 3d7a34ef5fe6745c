//! Selection → variant resolution.
//!
//! Resolution is a pure function of (catalog, selection, index map, config):
//! no IO, no shared state, never fails. Abnormal inputs (empty catalog,
//! unmatched selection) come back as a [`ResolvedState`] describing them.

use storefront_catalog::{Variant, VariantCatalog};

use crate::availability::AvailabilityPolicy;
use crate::config::ResolverConfig;
use crate::options::{MatchMode, OptionIndexMap};
use crate::selection::Selection;
use crate::state::{visible_compare_at, DisplayState, ResolveOutcome, ResolvedState};

/// Resolves selections against a product's variant catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantResolver {
    config: ResolverConfig,
}

impl VariantResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Mode actually used for a call: positional matching needs an index map.
    pub fn effective_mode(&self, option_index_map: Option<&OptionIndexMap>) -> MatchMode {
        match (self.config.match_mode, option_index_map) {
            (MatchMode::Positional, Some(map)) if !map.is_empty() => MatchMode::Positional,
            _ => MatchMode::AnySlot,
        }
    }

    /// Resolve `selection` to a single variant and derive its display state.
    ///
    /// - every selected dimension must match; unselected ones don't constrain
    /// - several candidates: the first in catalog order wins
    /// - no candidates, or no catalog: `variant` is `None`, sold out
    pub fn resolve(
        &self,
        catalog: &VariantCatalog,
        selection: &Selection,
        option_index_map: Option<&OptionIndexMap>,
    ) -> ResolvedState {
        if catalog.is_empty() {
            tracing::debug!("resolve: empty catalog");
            return ResolvedState::unresolved(ResolveOutcome::NoCatalog);
        }

        let mode = self.effective_mode(option_index_map);
        let mut candidates = catalog
            .iter()
            .filter(|variant| matches_selection(variant, selection, mode, option_index_map));

        let Some(first) = candidates.next() else {
            tracing::debug!(selected = selection.len(), "resolve: no matching variant");
            return ResolvedState::unresolved(ResolveOutcome::NoMatch);
        };

        let others = candidates.count();
        let outcome = if others == 0 {
            ResolveOutcome::Matched
        } else {
            ResolveOutcome::Ambiguous {
                candidates: others + 1,
            }
        };

        let state = resolved_state(first, outcome, &self.config.availability);
        tracing::debug!(
            variant = %first.id_typed(),
            mode = mode.as_str(),
            purchasable = state.purchasable,
            "resolve: variant resolved"
        );
        state
    }
}

/// Resolve with the default configuration.
pub fn resolve(
    catalog: &VariantCatalog,
    selection: &Selection,
    option_index_map: Option<&OptionIndexMap>,
) -> ResolvedState {
    VariantResolver::default().resolve(catalog, selection, option_index_map)
}

fn matches_selection(
    variant: &Variant,
    selection: &Selection,
    mode: MatchMode,
    option_index_map: Option<&OptionIndexMap>,
) -> bool {
    selection.iter().all(|(dimension, chosen)| match mode {
        MatchMode::AnySlot => variant.option_values().iter().any(|v| v.matches(chosen)),
        MatchMode::Positional => option_index_map
            .and_then(|map| map.position(dimension))
            .and_then(|position| variant.option_at(position))
            .is_some_and(|value| value.matches(chosen)),
    })
}

fn resolved_state(
    variant: &Variant,
    outcome: ResolveOutcome,
    policy: &AvailabilityPolicy,
) -> ResolvedState {
    let availability = policy.evaluate(variant);
    ResolvedState {
        variant: Some(variant.clone()),
        outcome,
        display: availability.display,
        purchasable: availability.display == DisplayState::Available,
        display_quantity: availability.display_quantity,
        price_display: Some(variant.price_display().to_string()),
        compare_at_price_display: visible_compare_at(variant),
    }
}
