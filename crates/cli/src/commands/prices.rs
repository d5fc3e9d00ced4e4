//! Price table commands.
//!
//! # Usage
//!
//! ```bash
//! # Show every variant's price column
//! sl-cli prices list
//!
//! # Look up one price
//! sl-cli prices get peri-peri 250
//!
//! # Override a price
//! sl-cli prices set cheese 100 38
//!
//! # Import a YAML price list
//! sl-cli prices import prices.yaml
//! ```
//!
//! # Import File Format
//!
//! ```yaml
//! retail:
//!   100: 25
//!   250: 70
//! wholesale:
//!   1000: 195
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use snack_ledger_core::{PacketSize, PriceBook, PriceSource, PricingStore, PricingTable, Variant};
use tracing::{info, warn};

use super::{CommandError, Context, money};

fn source_label(source: PriceSource) -> &'static str {
    match source {
        PriceSource::Override => "set",
        PriceSource::Default => "default",
        PriceSource::Formula => "formula",
    }
}

/// Print price columns, for one variant or all known variants.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context, variant: Option<&Variant>) {
    let table = PricingTable::load(&ctx.store);
    let variants: Vec<Variant> = variant.map_or_else(
        || table.variants().cloned().collect(),
        |v| vec![v.clone()],
    );

    for variant in variants {
        println!("{variant}");
        for (size, price, source) in table.column(&variant) {
            println!(
                "  {:>6}  {:>10}  ({})",
                size.to_string(),
                money(price),
                source_label(source)
            );
        }
    }
}

/// Print a single price.
#[allow(clippy::print_stdout)]
pub fn get(ctx: &Context, variant: &Variant, size: PacketSize) {
    let table = PricingTable::load(&ctx.store);
    let (price, source) = table.price_with_source(variant, size);
    println!("{variant} {size}: {} ({})", money(price), source_label(source));
}

/// Override one price and persist the table.
///
/// Negative prices are ignored with a warning, leaving the table as it was.
///
/// # Errors
///
/// Returns an error if the stored price book cannot be read or saved. An
/// unreadable price book is left untouched.
pub fn set(
    ctx: &Context,
    variant: &Variant,
    size: PacketSize,
    price: Decimal,
) -> Result<(), CommandError> {
    let mut table = PricingTable::new(PricingStore::load(&ctx.store)?);
    if !table.set_price(variant, size, price) {
        warn!(%variant, %size, %price, "negative price ignored");
        return Ok(());
    }
    PricingStore::save(&ctx.store, table.price_book())?;
    info!(%variant, %size, price = %money(price), "price updated");
    Ok(())
}

/// Apply every entry of a YAML price list.
///
/// Malformed entries are skipped by the lenient reader; negative prices
/// are skipped here. Returns the number of prices stored.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not YAML, or if the
/// stored price book cannot be read or saved.
pub fn import(ctx: &Context, path: &Path) -> Result<usize, CommandError> {
    let import_error = |reason: String| CommandError::Import {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| import_error(e.to_string()))?;
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| import_error(e.to_string()))?;
    let json = serde_json::to_value(yaml).map_err(|e| import_error(e.to_string()))?;
    let imported = PriceBook::from_json_lenient(&json);

    let mut table = PricingTable::new(PricingStore::load(&ctx.store)?);
    let mut stored = 0_usize;
    for (variant, column) in imported.iter() {
        for (&size, &price) in column {
            if table.set_price(variant, size, price) {
                stored += 1;
            } else {
                warn!(%variant, %size, %price, "skipping negative price");
            }
        }
    }

    PricingStore::save(&ctx.store, table.price_book())?;
    info!(path = %path.display(), stored, "price list imported");
    Ok(stored)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use snack_ledger_core::{ProductionProfile, StoreError};

    use super::*;
    use crate::store::JsonStore;

    fn context(dir: &Path) -> Context {
        Context {
            store: JsonStore::open(dir).unwrap(),
            profile: ProductionProfile::default(),
        }
    }

    #[test]
    fn test_set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        set(&ctx, &Variant::new("sada"), PacketSize::G500, dec!(140)).unwrap();
        let table = PricingTable::load(&ctx.store);
        assert_eq!(table.get_price(&Variant::new("sada"), PacketSize::G500), dec!(140));
    }

    #[test]
    fn test_set_negative_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        set(&ctx, &Variant::new("sada"), PacketSize::G500, dec!(-1)).unwrap();
        assert!(PricingStore::load(&ctx.store).unwrap().is_empty());
    }

    #[test]
    fn test_import_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("prices.yaml");
        std::fs::write(
            &file,
            "retail:\n  100: 26\n  250: 72.5\n  333: 9\nWholesale:\n  1000: -5\n  500: 100\n",
        )
        .unwrap();

        assert_eq!(import(&ctx, &file).unwrap(), 3);
        let table = PricingTable::load(&ctx.store);
        assert_eq!(table.get_price(&Variant::new("retail"), PacketSize::G250), dec!(72.5));
        assert_eq!(table.get_price(&Variant::new("wholesale"), PacketSize::G500), dec!(100));
        assert_eq!(table.get_price(&Variant::new("wholesale"), PacketSize::G1000), dec!(200));
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let err = import(&ctx, &dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, CommandError::Import { .. }));
    }

    #[test]
    fn test_unreadable_price_book_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let path = dir.path().join("pricing.json");
        std::fs::write(&path, "{\"retail\": {\"100\": \"26\"").unwrap();
        let file = dir.path().join("prices.yaml");
        std::fs::write(&file, "sada:\n  500: 140\n").unwrap();

        assert!(matches!(
            set(&ctx, &Variant::new("sada"), PacketSize::G500, dec!(140)),
            Err(CommandError::Store(StoreError::Serialization(_)))
        ));
        assert!(matches!(import(&ctx, &file), Err(CommandError::Store(_))));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"retail\": {\"100\": \"26\""
        );
    }
}
