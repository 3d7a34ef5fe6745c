//! Resolver configuration (per deployment, overridable per product).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::{AvailabilityPolicy, QuantityDisplay, ReconciliationPolicy};
use crate::options::MatchMode;

pub const ENV_MATCH_MODE: &str = "STOREFRONT_MATCH_MODE";
pub const ENV_RECONCILE: &str = "STOREFRONT_RECONCILE";
pub const ENV_QUANTITY_DISPLAY: &str = "STOREFRONT_QUANTITY_DISPLAY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {setting}: {value:?}")]
    InvalidValue { setting: &'static str, value: String },
}

impl ConfigError {
    pub fn invalid(setting: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            setting,
            value: value.into(),
        }
    }
}

/// Settings that change how selections resolve and how stock is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(flatten)]
    pub availability: AvailabilityPolicy,
}

impl ResolverConfig {
    /// Read overrides from `STOREFRONT_*` environment variables.
    ///
    /// Unset variables keep their defaults; set-but-unknown values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ResolverConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MATCH_MODE) {
            config.match_mode = raw.parse::<MatchMode>()?;
        }
        if let Some(raw) = lookup(ENV_RECONCILE) {
            config.availability.reconciliation = raw.parse::<ReconciliationPolicy>()?;
        }
        if let Some(raw) = lookup(ENV_QUANTITY_DISPLAY) {
            config.availability.quantity_display = raw.parse::<QuantityDisplay>()?;
        }

        tracing::debug!(
            match_mode = config.match_mode.as_str(),
            reconciliation = config.availability.reconciliation.as_str(),
            quantity_display = config.availability.quantity_display.as_str(),
            "resolver config loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ResolverConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.match_mode, MatchMode::Positional);
        assert_eq!(
            config.availability.reconciliation,
            ReconciliationPolicy::TrustDerived
        );
        assert_eq!(
            config.availability.quantity_display,
            QuantityDisplay::TrackedDenyOnly
        );
    }

    #[test]
    fn reads_every_override() {
        let config = ResolverConfig::from_lookup(lookup_from(&[
            (ENV_MATCH_MODE, "any-slot"),
            (ENV_RECONCILE, "require-both"),
            (ENV_QUANTITY_DISPLAY, "any-tracked"),
        ]))
        .unwrap();

        assert_eq!(config.match_mode, MatchMode::AnySlot);
        assert_eq!(config.availability.reconciliation, ReconciliationPolicy::RequireBoth);
        assert_eq!(config.availability.quantity_display, QuantityDisplay::AnyTracked);
    }

    #[test]
    fn unknown_value_is_an_error() {
        let err = ResolverConfig::from_lookup(lookup_from(&[(ENV_RECONCILE, "maybe")])).unwrap_err();
        assert_eq!(err, ConfigError::invalid("reconciliation policy", "maybe"));
    }

    #[test]
    fn deserializes_flat_json() {
        let config: ResolverConfig = serde_json::from_str(
            r#"{"match_mode": "any-slot", "quantity_display": "any-tracked"}"#,
        )
        .unwrap();
        assert_eq!(config.match_mode, MatchMode::AnySlot);
        assert_eq!(config.availability.reconciliation, ReconciliationPolicy::TrustDerived);
        assert_eq!(config.availability.quantity_display, QuantityDisplay::AnyTracked);
    }
}
