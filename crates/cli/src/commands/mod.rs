//! Command implementations.
//!
//! Each command loads what it needs from the [`JsonStore`], runs the core
//! calculation, writes back any change and prints the result.

pub mod batches;
pub mod dashboard;
pub mod expenses;
pub mod income;
pub mod materials;
pub mod orders;
pub mod prices;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use snack_ledger_core::{PacketSize, ProductionProfile, StoreError, ValidationError};
use thiserror::Error;

use crate::store::JsonStore;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading or writing the data files failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The input was rejected; nothing was written.
    #[error("rejected: {0}")]
    Validation(#[from] ValidationError),

    /// No record with that ID or name.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Record type.
        kind: &'static str,
        /// ID or name searched for.
        key: String,
    },

    /// A file given on the command line could not be read or parsed.
    #[error("cannot import {path}: {reason}")]
    Import {
        /// Path of the file.
        path: String,
        /// What went wrong.
        reason: String,
    },
}

impl CommandError {
    pub(crate) fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

/// Shared state for every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub store: JsonStore,
    pub profile: ProductionProfile,
}

/// Parse a `SIZE=QTY` packet argument such as `250=3` or `250g=3`.
///
/// # Errors
///
/// Returns a message when the size is not sold or the quantity is not a
/// whole number.
pub fn parse_pack(arg: &str) -> Result<(PacketSize, u32), String> {
    let (size, quantity) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SIZE=QTY, got {arg:?}"))?;
    let size = size.parse::<PacketSize>().map_err(|e| e.to_string())?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("quantity must be a whole number, got {quantity:?}"))?;
    Ok((size, quantity))
}

/// Today's date in local time, for entries recorded without `--date`.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a money amount with two decimal places.
#[must_use]
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Format a percentage, or a dash when undefined.
#[must_use]
pub fn percent(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{:.2}%", v.round_dp(2)))
}

/// Format grams as kilograms.
#[must_use]
pub fn kilograms(grams: u64) -> String {
    format!("{:.3} kg", Decimal::from(grams) / Decimal::ONE_THOUSAND)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_pack() {
        assert_eq!(parse_pack("250=3").unwrap(), (PacketSize::G250, 3));
        assert_eq!(parse_pack("1000g=1").unwrap(), (PacketSize::G1000, 1));
        assert!(parse_pack("250").is_err());
        assert!(parse_pack("300=1").is_err());
        assert!(parse_pack("100=-1").is_err());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(money(dec!(120)), "120.00");
        assert_eq!(money(dec!(67.505)), "67.50");
        assert_eq!(percent(None), "-");
        assert_eq!(percent(Some(dec!(86.5))), "86.50%");
        assert_eq!(kilograms(450), "0.450 kg");
    }
}
