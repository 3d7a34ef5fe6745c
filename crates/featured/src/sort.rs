use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort key picked in the featured-products dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Order as placed by the merchant.
    #[default]
    Manual,
    PriceAscending,
    PriceDescending,
    TitleAscending,
}

impl SortOrder {
    /// Parse a dropdown value. Unknown values fall back to [`SortOrder::Manual`].
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price-ascending" => SortOrder::PriceAscending,
            "price-descending" => SortOrder::PriceDescending,
            "title-ascending" => SortOrder::TitleAscending,
            "manual" | "" => SortOrder::Manual,
            other => {
                tracing::debug!(value = other, "unknown sort order; using manual");
                SortOrder::Manual
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Manual => "manual",
            SortOrder::PriceAscending => "price-ascending",
            SortOrder::PriceDescending => "price-descending",
            SortOrder::TitleAscending => "title-ascending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// One product card in the featured grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedItem {
    /// Position in the merchant's original order.
    pub index: usize,
    /// Machine-readable price attribute (minor units), when the card has one.
    #[serde(default)]
    pub price_attr: Option<String>,
    /// Price as rendered on the card, e.g. `"€1.234,50"`.
    #[serde(default)]
    pub price_text: String,
    #[serde(default)]
    pub title: String,
}

impl FeaturedItem {
    /// Price in minor units used for ordering.
    ///
    /// A numeric `price_attr` is taken as-is, fraction included. Otherwise the
    /// display text is read with `.` as a thousands separator and `,` as the
    /// decimal mark. Text without any digits or separators (`"Sold out"`)
    /// counts as zero; text that still fails to parse sorts as `f64::MAX`.
    pub fn price_key(&self) -> f64 {
        if let Some(attr) = self.price_attr.as_deref().map(str::trim) {
            if let Ok(n) = attr.parse::<f64>() {
                if n.is_finite() {
                    return n;
                }
            }
        }
        parse_price_text(&self.price_text).unwrap_or(f64::MAX)
    }

    /// Trimmed title with accents stripped and case folded, so `"Éclair"`
    /// orders next to `"eclair"`.
    pub fn title_key(&self) -> String {
        self.title
            .trim()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .collect::<String>()
            .to_lowercase()
    }
}

fn parse_price_text(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if kept.is_empty() {
        return Some(0.0);
    }
    let normalized = kept.replace('.', "").replacen(',', ".", 1);
    let value = normalized.parse::<f64>().ok()?;
    value.is_finite().then(|| (value * 100.0).round())
}

fn compare_prices(a: &FeaturedItem, b: &FeaturedItem) -> Ordering {
    a.price_key().total_cmp(&b.price_key())
}

/// Reorder `items` in place. Stable: ties keep their current relative order.
pub fn sort_items(items: &mut [FeaturedItem], order: SortOrder) {
    match order {
        SortOrder::Manual => items.sort_by_key(|item| item.index),
        SortOrder::PriceAscending => items.sort_by(compare_prices),
        SortOrder::PriceDescending => items.sort_by(|a, b| compare_prices(b, a)),
        SortOrder::TitleAscending => items.sort_by(compare_titles),
    }
}

fn compare_titles(a: &FeaturedItem, b: &FeaturedItem) -> Ordering {
    a.title_key().cmp(&b.title_key())
}
