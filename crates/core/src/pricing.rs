//! Unit prices per (variant, packet size).
//!
//! Prices resolve through three tiers:
//!
//! 1. an explicit override stored in the [`PriceBook`];
//! 2. the built-in default column for that variant;
//! 3. a linear per-gram formula keyed by the variant's [`PriceCategory`].
//!
//! Tiers 1 and 2 are merged once, when a [`PricingTable`] is built, so every
//! lookup for a known variant is a single map access. Tier 3 covers
//! variants nobody has priced yet. Lookups never fail and never return a
//! negative number.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::PricingStore;
use crate::types::{PacketSize, PriceCategory, Variant};

/// Unit prices for one variant, keyed by packet size.
pub type PriceColumn = BTreeMap<PacketSize, Decimal>;

/// Per-gram rate of the retail fallback formula.
pub const RETAIL_RATE_PER_GRAM: Decimal = Decimal::from_parts(30, 0, 0, false, 2);
/// Per-gram rate of the wholesale fallback formula.
pub const WHOLESALE_RATE_PER_GRAM: Decimal = Decimal::from_parts(22, 0, 0, false, 2);

/// Built-in prices for 50 / 100 / 250 / 500 / 1000 g packets.
const DEFAULT_COLUMNS: &[(&str, [u32; 5])] = &[
    (Variant::SADA, [15, 25, 70, 130, 250]),
    (Variant::PERI_PERI, [18, 30, 80, 150, 290]),
    (Variant::CHEESE, [20, 35, 90, 170, 320]),
    (Variant::RETAIL, [15, 25, 70, 130, 250]),
    (Variant::WHOLESALE, [12, 20, 55, 105, 200]),
];

/// The built-in price for `(variant, size)`, if the variant has a default
/// column.
#[must_use]
pub fn default_price(variant: &Variant, size: PacketSize) -> Option<Decimal> {
    DEFAULT_COLUMNS
        .iter()
        .find(|(tag, _)| *tag == variant.as_str())
        .and_then(|(_, prices)| {
            PacketSize::ALL
                .iter()
                .position(|s| *s == size)
                .and_then(|idx| prices.get(idx))
        })
        .map(|price| Decimal::from(*price))
}

/// Last-resort price: packet weight times the category's per-gram rate.
#[must_use]
pub fn formula_price(category: PriceCategory, size: PacketSize) -> Decimal {
    let rate = match category {
        PriceCategory::Retail => RETAIL_RATE_PER_GRAM,
        PriceCategory::Wholesale => WHOLESALE_RATE_PER_GRAM,
    };
    size.grams_decimal() * rate
}

/// Where a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Explicitly set by the business.
    Override,
    /// Built-in default column.
    Default,
    /// Per-gram formula.
    Formula,
}

/// Stored price overrides: variant → packet size → unit price.
///
/// This is the shape a [`PricingStore`] persists. It may be sparse; the
/// [`PricingTable`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceBook(BTreeMap<Variant, PriceColumn>);

impl PriceBook {
    /// Create an empty price book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored price for `(variant, size)`, if any.
    #[must_use]
    pub fn get(&self, variant: &Variant, size: PacketSize) -> Option<Decimal> {
        self.0.get(variant).and_then(|col| col.get(&size)).copied()
    }

    /// Store a price without validation. Callers go through
    /// [`PricingTable::set_price`].
    fn insert(&mut self, variant: Variant, size: PacketSize, price: Decimal) {
        self.0.entry(variant).or_default().insert(size, price);
    }

    /// Iterate over stored columns.
    pub fn iter(&self) -> impl Iterator<Item = (&Variant, &PriceColumn)> {
        self.0.iter()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Read a price book from loosely-shaped JSON, skipping anything that
    /// does not look like `{variant: {grams: price}}`.
    ///
    /// Prices may be JSON numbers or numeric strings. Unknown packet sizes,
    /// non-numeric prices and non-object columns are dropped with a warning.
    #[must_use]
    pub fn from_json_lenient(value: &serde_json::Value) -> Self {
        let mut book = Self::new();
        let Some(columns) = value.as_object() else {
            warn!("price book is not a JSON object, ignoring it");
            return book;
        };

        for (tag, column) in columns {
            let variant = Variant::new(tag);
            let Some(entries) = column.as_object() else {
                warn!(variant = %variant, "price column is not an object, skipping");
                continue;
            };
            for (grams, price) in entries {
                let size = grams.parse::<PacketSize>();
                let price = match price {
                    serde_json::Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
                    serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
                    _ => None,
                };
                match (size, price) {
                    (Ok(size), Some(price)) => book.insert(variant.clone(), size, price),
                    _ => warn!(variant = %variant, size = %grams, "skipping malformed price entry"),
                }
            }
        }
        book
    }
}

/// A fully resolved price table.
///
/// Built from a [`PriceBook`]; negative stored prices are discarded at
/// construction so they fall through to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    overrides: PriceBook,
    resolved: BTreeMap<Variant, BTreeMap<PacketSize, (Decimal, PriceSource)>>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new(PriceBook::new())
    }
}

impl PricingTable {
    /// Resolve a price book against the built-in defaults.
    #[must_use]
    pub fn new(book: PriceBook) -> Self {
        let mut overrides = PriceBook::new();
        for (variant, column) in book.0 {
            for (size, price) in column {
                if price < Decimal::ZERO {
                    warn!(
                        variant = %variant,
                        size = %size,
                        price = %price,
                        "discarding negative stored price"
                    );
                    continue;
                }
                overrides.insert(variant.clone(), size, price);
            }
        }

        let mut table = Self {
            overrides,
            resolved: BTreeMap::new(),
        };
        let variants: Vec<Variant> = DEFAULT_COLUMNS
            .iter()
            .map(|(tag, _)| Variant::new(tag))
            .chain(table.overrides.0.keys().cloned())
            .collect();
        for variant in variants {
            table.resolve_variant(&variant);
        }
        table
    }

    /// Load the price book from `store`, falling back to the built-in
    /// defaults when the store cannot be read.
    ///
    /// Writers should build the table from `PricingStore::load` instead, so
    /// an unreadable book is reported rather than overwritten.
    pub fn load(store: &impl PricingStore) -> Self {
        match store.load() {
            Ok(book) => Self::new(book),
            Err(e) => {
                warn!(error = %e, "failed to load price book, using defaults");
                Self::default()
            }
        }
    }

    fn resolve_variant(&mut self, variant: &Variant) {
        let column = PacketSize::ALL
            .iter()
            .map(|&size| {
                let entry = self
                    .overrides
                    .get(variant, size)
                    .map(|p| (p, PriceSource::Override))
                    .or_else(|| default_price(variant, size).map(|p| (p, PriceSource::Default)))
                    .unwrap_or_else(|| {
                        (formula_price(variant.category(), size), PriceSource::Formula)
                    });
                (size, entry)
            })
            .collect();
        self.resolved.insert(variant.clone(), column);
    }

    /// Unit price for one packet of `size` in `variant`.
    #[must_use]
    pub fn get_price(&self, variant: &Variant, size: PacketSize) -> Decimal {
        self.price_with_source(variant, size).0
    }

    /// Unit price together with the tier that supplied it.
    #[must_use]
    pub fn price_with_source(&self, variant: &Variant, size: PacketSize) -> (Decimal, PriceSource) {
        if let Some(entry) = self.resolved.get(variant).and_then(|col| col.get(&size)) {
            return *entry;
        }
        debug!(variant = %variant, size = %size, "no price column, using formula");
        (formula_price(variant.category(), size), PriceSource::Formula)
    }

    /// Overwrite the stored price for `(variant, size)`.
    ///
    /// Negative prices are ignored. Returns whether the price was stored.
    pub fn set_price(&mut self, variant: &Variant, size: PacketSize, price: Decimal) -> bool {
        if price < Decimal::ZERO {
            debug!(variant = %variant, size = %size, price = %price, "ignoring negative price");
            return false;
        }
        self.overrides.insert(variant.clone(), size, price);
        self.resolve_variant(variant);
        true
    }

    /// Every packet size of `variant` with its price and source.
    #[must_use]
    pub fn column(&self, variant: &Variant) -> Vec<(PacketSize, Decimal, PriceSource)> {
        PacketSize::ALL
            .iter()
            .map(|&size| {
                let (price, source) = self.price_with_source(variant, size);
                (size, price, source)
            })
            .collect()
    }

    /// Variants with a resolved column (built-in or stored).
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.resolved.keys()
    }

    /// The stored overrides, for persisting through a [`PricingStore`].
    #[must_use]
    pub const fn price_book(&self) -> &PriceBook {
        &self.overrides
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_default_tier() {
        let table = PricingTable::default();
        assert_eq!(
            table.price_with_source(&Variant::new("retail"), PacketSize::G100),
            (dec!(25), PriceSource::Default)
        );
        assert_eq!(
            table.get_price(&Variant::new("cheese"), PacketSize::G1000),
            dec!(320)
        );
    }

    #[test]
    fn test_override_tier_wins() {
        let mut table = PricingTable::default();
        assert!(table.set_price(&Variant::new("sada"), PacketSize::G250, dec!(75)));
        assert_eq!(
            table.price_with_source(&Variant::new("sada"), PacketSize::G250),
            (dec!(75), PriceSource::Override)
        );
        // Other sizes still come from the default column.
        assert_eq!(
            table.price_with_source(&Variant::new("sada"), PacketSize::G100),
            (dec!(25), PriceSource::Default)
        );
    }

    #[test]
    fn test_formula_tier_for_unknown_variant() {
        let table = PricingTable::default();
        assert_eq!(
            table.price_with_source(&Variant::new("mango"), PacketSize::G250),
            (dec!(75.00), PriceSource::Formula)
        );
        assert_eq!(
            table.get_price(&Variant::new("wholesale-mango"), PacketSize::G100),
            dec!(22.00)
        );
    }

    #[test]
    fn test_override_on_unknown_variant_fills_rest_with_formula() {
        let mut table = PricingTable::default();
        table.set_price(&Variant::new("mango"), PacketSize::G50, dec!(19));
        let column = table.column(&Variant::new("mango"));
        assert_eq!(column[0], (PacketSize::G50, dec!(19), PriceSource::Override));
        assert_eq!(
            column[1],
            (PacketSize::G100, dec!(30.00), PriceSource::Formula)
        );
    }

    #[test]
    fn test_negative_price_is_a_no_op() {
        let mut table = PricingTable::default();
        assert!(!table.set_price(&Variant::new("retail"), PacketSize::G100, dec!(-1)));
        assert_eq!(
            table.get_price(&Variant::new("retail"), PacketSize::G100),
            dec!(25)
        );
        assert!(table.price_book().is_empty());
    }

    #[test]
    fn test_negative_stored_price_is_discarded_at_load() {
        let json = serde_json::json!({"retail": {"100": "-5", "250": "72"}});
        let book: PriceBook = serde_json::from_value(json).unwrap();
        let table = PricingTable::new(book);
        assert_eq!(
            table.get_price(&Variant::new("retail"), PacketSize::G100),
            dec!(25)
        );
        assert_eq!(
            table.get_price(&Variant::new("retail"), PacketSize::G250),
            dec!(72)
        );
    }

    #[test]
    fn test_never_negative_even_when_empty() {
        let table = PricingTable::new(PriceBook::new());
        for tag in ["sada", "peri-peri", "cheese", "retail", "wholesale", "unknown", ""] {
            for size in PacketSize::ALL {
                assert!(table.get_price(&Variant::new(tag), size) >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn test_lenient_json_skips_garbage() {
        let json = serde_json::json!({
            "Retail": {"100": 26, "250": "71.5", "300": 10, "500": "abc"},
            "cheese": "oops",
        });
        let book = PriceBook::from_json_lenient(&json);
        assert_eq!(book.get(&Variant::new("retail"), PacketSize::G100), Some(dec!(26)));
        assert_eq!(book.get(&Variant::new("retail"), PacketSize::G250), Some(dec!(71.5)));
        assert_eq!(book.get(&Variant::new("retail"), PacketSize::G500), None);
        assert_eq!(book.get(&Variant::new("cheese"), PacketSize::G100), None);
    }

    #[test]
    fn test_lenient_json_non_object() {
        let book = PriceBook::from_json_lenient(&serde_json::json!([1, 2, 3]));
        assert!(book.is_empty());
    }

    #[test]
    fn test_price_book_serde_shape() {
        let mut table = PricingTable::default();
        table.set_price(&Variant::new("retail"), PacketSize::G100, dec!(26));
        let json = serde_json::to_value(table.price_book()).unwrap();
        assert_eq!(json, serde_json::json!({"retail": {"100": "26"}}));
    }

    #[test]
    fn test_variants_include_defaults_and_overrides() {
        let mut table = PricingTable::default();
        table.set_price(&Variant::new("mango"), PacketSize::G50, dec!(19));
        let tags: Vec<&str> = table.variants().map(Variant::as_str).collect();
        assert!(tags.contains(&"sada"));
        assert!(tags.contains(&"wholesale"));
        assert!(tags.contains(&"mango"));
    }
}
