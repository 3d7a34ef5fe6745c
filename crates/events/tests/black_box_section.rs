use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use storefront_core::VariantId;
use storefront_events::{Labels, ProductSection, SelectionChanged};
use storefront_resolver::{
    DisplayState, MatchMode, OptionIndexMap, ResolvedState, ResolverConfig, VariantResolver,
};

/// What a purchase area would show after each render.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rendered {
    button_enabled: bool,
    variant_id: Option<VariantId>,
    price: Option<String>,
    compare_at: Option<String>,
    stock_text: String,
}

fn render_into(log: Rc<RefCell<Vec<Rendered>>>, labels: Labels) -> impl FnMut(&ResolvedState) {
    move |state: &ResolvedState| {
        log.borrow_mut().push(Rendered {
            button_enabled: state.purchasable,
            variant_id: state.form_variant_id().cloned(),
            price: state.price_display.clone(),
            compare_at: state.compare_at_price_display.clone(),
            stock_text: labels.availability_text(state),
        })
    }
}

/// Variant blob as a theme template embeds it: id-keyed, option1/option2.
fn embedded_variants() -> String {
    json!({
        "501": {
            "id": 501, "option1": "Red", "option2": "S",
            "price": "$30.00", "compare_at_price": "$40.00",
            "inventory_quantity": 3, "inventory_management": "shopify",
            "inventory_policy": "deny", "available": true
        },
        "502": {
            "id": 502, "option1": "Red", "option2": "M",
            "price": "$30.00", "compare_at_price": null,
            "inventory_quantity": 0, "inventory_management": "shopify",
            "inventory_policy": "deny", "available": true
        },
        "503": {
            "id": 503, "option1": "Blue", "option2": "M",
            "price": "$32.00", "compare_at_price": "$32.00",
            "inventory_quantity": 9, "inventory_management": "shopify",
            "inventory_policy": "continue", "available": true
        },
        "504": {
            "id": 504, "option1": "Blue", "option2": "L",
            "price": "$32.00",
            "inventory_quantity": 0, "inventory_management": null,
            "inventory_policy": "deny", "available": false
        }
    })
    .to_string()
}

#[test]
fn shopper_walks_through_options() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let labels = Labels::from_json_or_default(r#"{"in_stock": "In stock:", "sold_out": "Sold out"}"#);

    let mut section = ProductSection::from_embedded_json(&embedded_variants(), VariantResolver::default())
        .with_option_index_map(OptionIndexMap::from_names(["color", "size"]));
    section.on_render(render_into(Rc::clone(&log), labels));

    section.render_default([("color", "Red"), ("size", "S")]);
    section.handle(&SelectionChanged::new("size", "M"));
    section.handle(&SelectionChanged::new("color", " BLUE "));
    section.handle(&SelectionChanged::new("size", "L"));
    section.handle(&SelectionChanged::new("color", "Purple"));

    let rendered = log.borrow().clone();
    assert_eq!(
        rendered,
        vec![
            Rendered {
                button_enabled: true,
                variant_id: Some(VariantId::Numeric(501)),
                price: Some("$30.00".into()),
                compare_at: Some("$40.00".into()),
                stock_text: "In stock: 3".into(),
            },
            Rendered {
                button_enabled: false,
                variant_id: Some(VariantId::Numeric(502)),
                price: Some("$30.00".into()),
                compare_at: None,
                stock_text: "Sold out".into(),
            },
            Rendered {
                button_enabled: true,
                variant_id: Some(VariantId::Numeric(503)),
                price: Some("$32.00".into()),
                compare_at: None,
                stock_text: "In stock".into(),
            },
            Rendered {
                button_enabled: true,
                variant_id: Some(VariantId::Numeric(504)),
                price: Some("$32.00".into()),
                compare_at: None,
                stock_text: "In stock".into(),
            },
            Rendered {
                button_enabled: false,
                variant_id: None,
                price: None,
                compare_at: None,
                stock_text: "Sold out".into(),
            },
        ]
    );
}

#[test]
fn legacy_any_slot_section_without_index_map() {
    let resolver = VariantResolver::new(ResolverConfig {
        match_mode: MatchMode::AnySlot,
        ..ResolverConfig::default()
    });
    let mut section = ProductSection::from_embedded_json(&embedded_variants(), resolver);

    // "M" appears in the size slot; any-slot matching does not care which.
    let state = section.handle(&SelectionChanged::new("color", "M"));
    assert_eq!(state.form_variant_id(), Some(&VariantId::Numeric(502)));
    assert_eq!(state.display, DisplayState::SoldOut);
}

#[test]
fn unreadable_blob_keeps_the_page_alive() {
    let mut section = ProductSection::from_embedded_json("", VariantResolver::default());
    let state = section.handle(&SelectionChanged::new("color", "Red"));
    assert!(state.variant.is_none());
    assert_eq!(Labels::default().availability_text(state), "Sold out");
}
