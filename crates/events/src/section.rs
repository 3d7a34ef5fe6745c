//! Product section: selection events in, resolved states out.
//!
//! One section per product on the page. It exclusively owns its catalog and
//! selection; every [`SelectionChanged`] is applied, the selection is
//! re-resolved, and each registered [`RenderHandler`] receives the result in
//! registration order.

use storefront_catalog::VariantCatalog;
use storefront_resolver::{OptionIndexMap, ResolvedState, Selection, VariantResolver};

use crate::event::{Event, SelectionChanged};
use crate::handler::RenderHandler;
use crate::labels::Labels;

pub struct ProductSection {
    catalog: VariantCatalog,
    option_index_map: Option<OptionIndexMap>,
    resolver: VariantResolver,
    labels: Labels,
    selection: Selection,
    state: ResolvedState,
    handlers: Vec<Box<dyn RenderHandler>>,
}

impl ProductSection {
    pub fn new(catalog: VariantCatalog, resolver: VariantResolver) -> Self {
        let selection = Selection::new();
        let state = resolver.resolve(&catalog, &selection, None);
        Self {
            catalog,
            option_index_map: None,
            resolver,
            labels: Labels::default(),
            selection,
            state,
            handlers: Vec::new(),
        }
    }

    /// Build from the embedded variant blob.
    ///
    /// A blob that fails to load leaves the section with an empty catalog: it
    /// renders sold out rather than failing the page.
    pub fn from_embedded_json(json: &str, resolver: VariantResolver) -> Self {
        let catalog = match VariantCatalog::from_json(json) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(error = %err, "variant data unreadable; section will render sold out");
                VariantCatalog::empty()
            }
        };
        Self::new(catalog, resolver)
    }

    /// Declare which option slot each dimension maps to.
    pub fn with_option_index_map(mut self, map: OptionIndexMap) -> Self {
        self.option_index_map = Some(map);
        self.state = self.resolve_current();
        self
    }

    /// Use the page's translated stock labels instead of the defaults.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Register a render handler. Handlers are not called on registration;
    /// use [`ProductSection::render_default`] for the initial paint.
    pub fn on_render<H>(&mut self, handler: H)
    where
        H: RenderHandler + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Apply pre-checked option values (the page's defaults) and render once.
    pub fn render_default<I, D, V>(&mut self, defaults: I) -> &ResolvedState
    where
        I: IntoIterator<Item = (D, V)>,
        D: AsRef<str>,
        V: Into<String>,
    {
        for (dimension, value) in defaults {
            self.selection.select(dimension.as_ref(), value);
        }
        self.refresh()
    }

    /// Apply one selection change, re-resolve, notify handlers.
    pub fn handle(&mut self, event: &SelectionChanged) -> &ResolvedState {
        tracing::debug!(
            event_type = event.event_type(),
            dimension = %event.dimension,
            value = %event.value,
            occurred_at = %event.occurred_at(),
            "selection changed"
        );
        self.selection.select(&event.dimension, event.value.clone());
        self.refresh()
    }

    pub fn state(&self) -> &ResolvedState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Stock line for the current state in the section's labels.
    pub fn availability_text(&self) -> String {
        self.labels.availability_text(&self.state)
    }

    fn refresh(&mut self) -> &ResolvedState {
        self.state = self.resolve_current();
        for handler in &mut self.handlers {
            handler.render(&self.state);
        }
        &self.state
    }

    fn resolve_current(&self) -> ResolvedState {
        self.resolver
            .resolve(&self.catalog, &self.selection, self.option_index_map.as_ref())
    }
}

impl core::fmt::Debug for ProductSection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductSection")
            .field("variants", &self.catalog.len())
            .field("option_index_map", &self.option_index_map)
            .field("labels", &self.labels)
            .field("selection", &self.selection)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
