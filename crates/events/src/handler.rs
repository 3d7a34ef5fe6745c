use storefront_resolver::ResolvedState;

/// Receives every freshly resolved state of a product section.
///
/// Rendering is up to the implementor: toggling the purchase button, writing
/// the hidden variant id field, updating price and stock text. Handlers must
/// not assume they are called only on change; the same state may be delivered
/// twice if the shopper re-selects the same value.
pub trait RenderHandler {
    fn render(&mut self, state: &ResolvedState);
}

impl<F> RenderHandler for F
where
    F: FnMut(&ResolvedState),
{
    fn render(&mut self, state: &ResolvedState) {
        self(state)
    }
}
