//! Expense commands.
//!
//! # Usage
//!
//! ```bash
//! sl-cli expense add --item "Gas refill" --amount 950
//! sl-cli expense add --item "Movie" --amount 300 --extra
//! sl-cli expense list --kind business
//! sl-cli expense toggle <ID>
//! sl-cli expense delete <ID>
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use snack_ledger_core::{ExpenseFilter, ExpenseId, NewExpense};
use tracing::info;

use super::{CommandError, Context, money};

/// Record money spent.
///
/// # Errors
///
/// Returns a validation error for a blank item or non-positive amount, or a
/// storage error.
#[allow(clippy::print_stdout)]
pub fn add(
    ctx: &Context,
    item: &str,
    amount: Decimal,
    date: NaiveDate,
    is_extra: bool,
    remarks: Option<&str>,
) -> Result<ExpenseId, CommandError> {
    let entry = NewExpense {
        item: item.to_owned(),
        amount,
        date,
        is_extra,
        remarks: remarks.map(str::to_owned),
    }
    .validate()?;

    let mut entries = ctx.store.load_expenses()?;
    let id = entry.id;
    let amount = money(entry.amount);
    info!(expense_id = %id, %amount, is_extra, "expense recorded");
    entries.push(entry);
    ctx.store.save_expenses(&entries)?;
    println!("Recorded expense {id}: {amount}");
    Ok(id)
}

/// Print expenses passing `filter`.
///
/// # Errors
///
/// Returns an error if the entries cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context, filter: &ExpenseFilter) -> Result<(), CommandError> {
    let entries = ctx.store.load_expenses()?;
    let shown = filter.apply(&entries);
    for entry in &shown {
        println!(
            "{}  {}  {:<20} {:>10}  {:<8} {}",
            entry.id,
            entry.date,
            entry.item,
            money(entry.amount),
            if entry.is_extra { "extra" } else { "business" },
            entry.remarks.as_deref().unwrap_or("")
        );
    }
    let total = shown
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount));
    println!("{} entries, total {}", shown.len(), money(total));
    Ok(())
}

/// Move an expense between business and extra.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a storage error.
pub fn toggle(ctx: &Context, id: ExpenseId) -> Result<(), CommandError> {
    let mut entries = ctx.store.load_expenses()?;
    let entry = entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| CommandError::not_found("expense", id))?;
    entry.toggle_extra();
    info!(expense_id = %id, is_extra = entry.is_extra, "expense reclassified");
    ctx.store.save_expenses(&entries)?;
    Ok(())
}

/// Delete an expense.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a storage error.
pub fn delete(ctx: &Context, id: ExpenseId) -> Result<(), CommandError> {
    let mut entries = ctx.store.load_expenses()?;
    let before = entries.len();
    entries.retain(|e| e.id != id);
    if entries.len() == before {
        return Err(CommandError::not_found("expense", id));
    }
    ctx.store.save_expenses(&entries)?;
    info!(expense_id = %id, "expense deleted");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use snack_ledger_core::{ProductionProfile, totals};

    use super::*;
    use crate::store::JsonStore;

    fn context(dir: &std::path::Path) -> Context {
        Context {
            store: JsonStore::open(dir).unwrap(),
            profile: ProductionProfile::default(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_toggle_moves_expense_out_of_profit() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let id = add(&ctx, "Dinner", dec!(400), day(), false, None).unwrap();

        let before = totals(&[], &ctx.store.load_expenses().unwrap());
        assert_eq!(before.total_expense, dec!(400));

        toggle(&ctx, id).unwrap();
        let after = totals(&[], &ctx.store.load_expenses().unwrap());
        assert_eq!(after.total_expense, Decimal::ZERO);
        assert_eq!(after.extra_expense, dec!(400));
    }

    #[test]
    fn test_delete_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        assert!(matches!(
            delete(&ctx, ExpenseId::new()),
            Err(CommandError::NotFound { kind: "expense", .. })
        ));
    }
}
