//! Variant catalog of a single product, loaded once per page view.

use std::collections::HashSet;
use std::fmt;

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use storefront_core::{CatalogError, CatalogResult, Entity, VariantId};

use crate::variant::{Variant, VariantRecord};

/// Ordered, immutable list of a product's variants.
///
/// Catalog order is significant: a partial selection resolves to the first
/// matching variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantCatalog {
    variants: Vec<Variant>,
}

impl VariantCatalog {
    /// A catalog with no variants (nothing can be resolved against it).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-validated variants, rejecting duplicate ids.
    pub fn new(variants: Vec<Variant>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(variants.len());
        for variant in &variants {
            if !seen.insert(variant.id()) {
                return Err(CatalogError::DuplicateVariant(variant.id().clone()));
            }
        }
        Ok(Self { variants })
    }

    /// Parse the embedded per-product variant blob.
    ///
    /// Accepts a JSON array of records or an object whose values are records
    /// (keyed by id). Object order is kept as written.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let variants = document
            .0
            .into_iter()
            .map(Variant::try_from)
            .collect::<CatalogResult<Vec<_>>>()?;

        let catalog = Self::new(variants)?;
        tracing::debug!(variants = catalog.len(), "variant catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn first(&self) -> Option<&Variant> {
        self.variants.first()
    }

    pub fn get(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id() == id)
    }
}

impl<'a> IntoIterator for &'a VariantCatalog {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

/// Records in document order, from either an array or an id-keyed object.
struct CatalogDocument(Vec<VariantRecord>);

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CatalogDocumentVisitor)
    }
}

struct CatalogDocumentVisitor;

impl<'de> Visitor<'de> for CatalogDocumentVisitor {
    type Value = CatalogDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of variants or an object of variants keyed by id")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(record) = seq.next_element::<VariantRecord>()? {
            records.push(record);
        }
        Ok(CatalogDocument(records))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((_key, record)) = map.next_entry::<serde::de::IgnoredAny, VariantRecord>()? {
            records.push(record);
        }
        Ok(CatalogDocument(records))
    }
}
