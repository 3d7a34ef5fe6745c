use serde::{Deserialize, Serialize};

use storefront_core::{CatalogError, CatalogResult, Entity, OptionValue, VariantId};

/// Maximum number of option dimensions a product may declare.
pub const MAX_OPTIONS: usize = 3;

/// Whether a variant may be sold once its stock reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryPolicy {
    /// Stop selling at zero.
    #[default]
    Deny,
    /// Keep selling past zero (backorder).
    Continue,
}

/// A purchasable SKU of a product.
///
/// Read-only once loaded: the catalog is fixed for the lifetime of a page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    id: VariantId,
    option_values: Vec<OptionValue>,
    price_display: String,
    compare_at_price_display: Option<String>,
    inventory_quantity: i64,
    inventory_tracked: bool,
    inventory_policy: InventoryPolicy,
    available: Option<bool>,
}

impl Variant {
    /// Build an untracked variant with the given option values and price text.
    ///
    /// Fails if there are no option values, more than [`MAX_OPTIONS`], or a
    /// blank one.
    pub fn new<I, V>(
        id: impl Into<VariantId>,
        option_values: I,
        price_display: impl Into<String>,
    ) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        let id = id.into();
        let option_values: Vec<OptionValue> = option_values.into_iter().map(Into::into).collect();
        validate_options(&id, &option_values)?;

        Ok(Self {
            id,
            option_values,
            price_display: price_display.into(),
            compare_at_price_display: None,
            inventory_quantity: 0,
            inventory_tracked: false,
            inventory_policy: InventoryPolicy::Deny,
            available: None,
        })
    }

    pub fn with_compare_at_price(mut self, compare_at: impl Into<String>) -> Self {
        self.compare_at_price_display = Some(compare_at.into());
        self
    }

    /// Track stock for this variant.
    pub fn with_inventory(mut self, quantity: i64, policy: InventoryPolicy) -> Self {
        self.inventory_tracked = true;
        self.inventory_quantity = quantity;
        self.inventory_policy = policy;
        self
    }

    /// Record the upstream `available` flag.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn id_typed(&self) -> &VariantId {
        &self.id
    }

    pub fn option_values(&self) -> &[OptionValue] {
        &self.option_values
    }

    /// Option value at a zero-based position, if the variant has one there.
    pub fn option_at(&self, position: usize) -> Option<&OptionValue> {
        self.option_values.get(position)
    }

    pub fn price_display(&self) -> &str {
        &self.price_display
    }

    pub fn compare_at_price_display(&self) -> Option<&str> {
        self.compare_at_price_display.as_deref()
    }

    pub fn inventory_quantity(&self) -> i64 {
        self.inventory_quantity
    }

    pub fn inventory_tracked(&self) -> bool {
        self.inventory_tracked
    }

    pub fn inventory_policy(&self) -> InventoryPolicy {
        self.inventory_policy
    }

    /// The catalog's own availability flag, when it sent one.
    pub fn available_flag(&self) -> Option<bool> {
        self.available
    }

    /// Untracked stock, or a `continue` policy, means the variant never runs out.
    pub fn can_oversell(&self) -> bool {
        !self.inventory_tracked || self.inventory_policy == InventoryPolicy::Continue
    }

    /// Availability computed from inventory facts alone, ignoring the flag.
    pub fn stock_allows_sale(&self) -> bool {
        self.can_oversell() || self.inventory_quantity > 0
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_options(id: &VariantId, options: &[OptionValue]) -> CatalogResult<()> {
    if options.is_empty() {
        return Err(CatalogError::validation(format!(
            "variant {id}: at least one option value is required"
        )));
    }
    if options.len() > MAX_OPTIONS {
        return Err(CatalogError::validation(format!(
            "variant {id}: at most {MAX_OPTIONS} option values are allowed (got {})",
            options.len()
        )));
    }
    if let Some(pos) = options.iter().position(OptionValue::is_blank) {
        return Err(CatalogError::validation(format!(
            "variant {id}: option value at position {pos} is blank"
        )));
    }
    Ok(())
}

/// Raw record shape of the embedded variant blob.
///
/// Storefront templates emit either an `options` array or the flattened
/// `option1`..`option3` fields, and either an explicit `inventory_tracked`
/// flag or the platform's `inventory_management` string.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRecord {
    pub id: VariantId,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(alias = "price_display", default)]
    pub price: PriceField,
    #[serde(alias = "compare_at_price_display", default)]
    pub compare_at_price: Option<PriceField>,
    #[serde(default)]
    pub inventory_quantity: i64,
    #[serde(default)]
    pub inventory_tracked: Option<bool>,
    #[serde(default)]
    pub inventory_management: Option<String>,
    #[serde(default)]
    pub inventory_policy: InventoryPolicy,
    #[serde(default)]
    pub available: Option<bool>,
}

/// Price as emitted by the template: already formatted text, or a bare number
/// (minor units or a decimal amount) that is displayed verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Minor(i64),
    Decimal(f64),
}

impl Default for PriceField {
    fn default() -> Self {
        PriceField::Text(String::new())
    }
}

impl PriceField {
    fn into_display(self) -> String {
        match self {
            PriceField::Text(s) => s,
            PriceField::Minor(n) => n.to_string(),
            PriceField::Decimal(n) => n.to_string(),
        }
    }
}

/// Collect `option1..3`. Slots are positional, so a value after an empty slot
/// is rejected rather than shifted left.
fn slot_options(
    id: &VariantId,
    slots: [Option<String>; MAX_OPTIONS],
) -> CatalogResult<Vec<OptionValue>> {
    let mut values = Vec::with_capacity(MAX_OPTIONS);
    let mut gap = None;
    for (slot, value) in slots.into_iter().enumerate() {
        match (value, gap) {
            (Some(_), Some(empty)) => {
                return Err(CatalogError::validation(format!(
                    "variant {id}: option{} is set but option{} is empty",
                    slot + 1,
                    empty + 1
                )));
            }
            (Some(value), None) => values.push(OptionValue::from(value)),
            (None, None) => gap = Some(slot),
            (None, Some(_)) => {}
        }
    }
    Ok(values)
}

impl TryFrom<VariantRecord> for Variant {
    type Error = CatalogError;

    fn try_from(record: VariantRecord) -> Result<Self, Self::Error> {
        let option_values: Vec<OptionValue> = match record.options {
            Some(options) => options.into_iter().map(OptionValue::from).collect(),
            None => slot_options(&record.id, [record.option1, record.option2, record.option3])?,
        };
        validate_options(&record.id, &option_values)?;

        let inventory_tracked = match (record.inventory_tracked, record.inventory_management) {
            (Some(tracked), _) => tracked,
            (None, Some(management)) => !management.trim().is_empty(),
            (None, None) => false,
        };

        Ok(Self {
            id: record.id,
            option_values,
            price_display: record.price.into_display(),
            compare_at_price_display: record.compare_at_price.map(PriceField::into_display),
            inventory_quantity: record.inventory_quantity,
            inventory_tracked,
            inventory_policy: record.inventory_policy,
            available: record.available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> VariantRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn new_variant_defaults_to_untracked() {
        let v = Variant::new(1u64, ["Red", "M"], "$10.00").unwrap();
        assert!(!v.inventory_tracked());
        assert!(v.can_oversell());
        assert_eq!(v.available_flag(), None);
        assert_eq!(v.option_at(1).map(OptionValue::as_str), Some("M"));
        assert_eq!(v.option_at(2), None);
    }

    #[test]
    fn new_variant_rejects_empty_options() {
        let err = Variant::new(1u64, Vec::<&str>::new(), "$1").unwrap_err();
        match err {
            CatalogError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty options"),
        }
    }

    #[test]
    fn new_variant_rejects_four_options() {
        let err = Variant::new(1u64, ["a", "b", "c", "d"], "$1").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn new_variant_rejects_blank_option() {
        let err = Variant::new(1u64, ["Red", "  "], "$1").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn tracked_deny_with_zero_stock_cannot_sell() {
        let v = Variant::new(1u64, ["Red"], "$1")
            .unwrap()
            .with_inventory(0, InventoryPolicy::Deny);
        assert!(!v.can_oversell());
        assert!(!v.stock_allows_sale());
    }

    #[test]
    fn continue_policy_oversells() {
        let v = Variant::new(1u64, ["Red"], "$1")
            .unwrap()
            .with_inventory(-3, InventoryPolicy::Continue);
        assert!(v.can_oversell());
        assert!(v.stock_allows_sale());
    }

    #[test]
    fn record_with_flattened_options() {
        let v = Variant::try_from(record(
            r#"{"id": 7, "option1": "Blue", "option2": "L", "option3": null,
                "price": "€12,00", "compare_at_price": "€15,00",
                "inventory_quantity": 4, "inventory_management": "shopify",
                "inventory_policy": "deny", "available": true}"#,
        ))
        .unwrap();

        assert_eq!(v.id_typed(), &VariantId::Numeric(7));
        assert_eq!(
            v.option_values(),
            &[OptionValue::new("Blue"), OptionValue::new("L")]
        );
        assert_eq!(v.price_display(), "€12,00");
        assert_eq!(v.compare_at_price_display(), Some("€15,00"));
        assert!(v.inventory_tracked());
        assert_eq!(v.inventory_quantity(), 4);
        assert_eq!(v.available_flag(), Some(true));
    }

    #[test]
    fn record_with_options_array_and_explicit_tracking() {
        let v = Variant::try_from(record(
            r#"{"id": "sku-9", "options": ["Green"], "price_display": "$3",
                "inventory_tracked": false, "inventory_management": "shopify",
                "inventory_policy": "continue"}"#,
        ))
        .unwrap();

        assert_eq!(v.id_typed(), &VariantId::text("sku-9"));
        // Explicit flag wins over the management string.
        assert!(!v.inventory_tracked());
        assert_eq!(v.inventory_policy(), InventoryPolicy::Continue);
        assert_eq!(v.available_flag(), None);
    }

    #[test]
    fn record_with_numeric_price_keeps_digits() {
        let v = Variant::try_from(record(r#"{"id": 1, "options": ["S"], "price": 1999}"#)).unwrap();
        assert_eq!(v.price_display(), "1999");
    }

    #[test]
    fn record_with_decimal_price_is_accepted() {
        let v = Variant::try_from(record(
            r#"{"id": 1, "options": ["S"], "price": 19.99, "compare_at_price": 25.5}"#,
        ))
        .unwrap();
        assert_eq!(v.price_display(), "19.99");
        assert_eq!(v.compare_at_price_display(), Some("25.5"));
    }

    #[test]
    fn record_with_gap_between_option_slots_is_rejected() {
        let err = Variant::try_from(record(
            r#"{"id": 9, "option1": "Red", "option2": null, "option3": "Cotton", "price": "$1"}"#,
        ))
        .unwrap_err();
        match err {
            CatalogError::Validation(msg) => assert!(msg.contains("option3")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_management_string_is_untracked() {
        let v = Variant::try_from(record(
            r#"{"id": 1, "options": ["S"], "price": "$1", "inventory_management": ""}"#,
        ))
        .unwrap();
        assert!(!v.inventory_tracked());
    }

    #[test]
    fn record_without_options_is_rejected() {
        let err = Variant::try_from(record(r#"{"id": 1, "price": "$1"}"#)).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let res: Result<VariantRecord, _> =
            serde_json::from_str(r#"{"id": 1, "options": ["S"], "inventory_policy": "maybe"}"#);
        assert!(res.is_err());
    }
}
