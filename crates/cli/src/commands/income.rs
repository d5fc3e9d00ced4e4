//! Income commands.
//!
//! # Usage
//!
//! ```bash
//! sl-cli income add --customer "Asha" --amount 500 --order <ORDER_ID>
//! sl-cli income list --search asha
//! sl-cli income delete <ID>
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use snack_ledger_core::{IncomeFilter, IncomeId, NewIncome, OrderId};
use tracing::info;

use super::{CommandError, Context, money};

/// Record money received.
///
/// When `order_id` is given it must name an existing order.
///
/// # Errors
///
/// Returns a validation error for a blank customer or non-positive amount,
/// `NotFound` for an unknown order, or a storage error.
#[allow(clippy::print_stdout)]
pub fn add(
    ctx: &Context,
    customer_name: &str,
    amount: Decimal,
    date: NaiveDate,
    order_id: Option<OrderId>,
    remarks: Option<&str>,
) -> Result<IncomeId, CommandError> {
    let entry = NewIncome {
        customer_name: customer_name.to_owned(),
        amount,
        date,
        order_id,
        remarks: remarks.map(str::to_owned),
    }
    .validate()?;

    if let Some(order_id) = order_id {
        let orders = ctx.store.load_orders()?;
        if !orders.iter().any(|o| o.id == order_id) {
            return Err(CommandError::not_found("order", order_id));
        }
    }

    let mut entries = ctx.store.load_income()?;
    let id = entry.id;
    let amount = money(entry.amount);
    info!(income_id = %id, %amount, "income recorded");
    entries.push(entry);
    ctx.store.save_income(&entries)?;
    println!("Recorded income {id}: {amount}");
    Ok(id)
}

/// Print income entries passing `filter`.
///
/// # Errors
///
/// Returns an error if the entries cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context, filter: &IncomeFilter) -> Result<(), CommandError> {
    let entries = ctx.store.load_income()?;
    let shown = filter.apply(&entries);
    for entry in &shown {
        println!(
            "{}  {}  {:<20} {:>10}  {}",
            entry.id,
            entry.date,
            entry.customer_name,
            money(entry.amount),
            entry.remarks.as_deref().unwrap_or("")
        );
    }
    let total = shown
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount));
    println!("{} entries, total {}", shown.len(), money(total));
    Ok(())
}

/// Delete an income entry.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a storage error.
pub fn delete(ctx: &Context, id: IncomeId) -> Result<(), CommandError> {
    let mut entries = ctx.store.load_income()?;
    let before = entries.len();
    entries.retain(|e| e.id != id);
    if entries.len() == before {
        return Err(CommandError::not_found("income", id));
    }
    ctx.store.save_income(&entries)?;
    info!(income_id = %id, "income deleted");
    Ok(())
}
