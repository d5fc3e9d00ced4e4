//! Business overview.
//!
//! # Usage
//!
//! ```bash
//! sl-cli dashboard
//! ```

use snack_ledger_core::{DashboardSummary, dashboard};

use super::{CommandError, Context, kilograms, money, percent};

/// Compute the summary over every stored record.
///
/// # Errors
///
/// Returns an error if any record file cannot be read.
pub fn summary(ctx: &Context) -> Result<DashboardSummary, CommandError> {
    let orders = ctx.store.load_orders()?;
    let incomes = ctx.store.load_income()?;
    let expenses = ctx.store.load_expenses()?;
    Ok(dashboard(&orders, &incomes, &expenses))
}

/// Print the dashboard.
///
/// # Errors
///
/// Returns an error if any record file cannot be read.
#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context) -> Result<(), CommandError> {
    let s = summary(ctx)?;

    println!("Income:            {:>12}", money(s.totals.total_income));
    println!("Expenses:          {:>12}", money(s.totals.total_expense));
    println!("Profit:            {:>12}", money(s.totals.profit));
    println!("Profit margin:     {:>12}", percent(s.totals.profit_margin_percent));
    println!("Extra (excluded):  {:>12}", money(s.totals.extra_expense));
    println!();
    println!(
        "Orders:            {} pending, {} completed",
        s.pending_orders, s.completed_orders
    );
    println!("Order value:       {:>12}", money(s.total_order_value));
    println!("Order weight:      {:>12}", kilograms(s.total_order_weight_grams));
    println!("Received:          {:>12}", money(s.received_against_orders));
    println!("Outstanding:       {:>12}", money(s.outstanding));
    Ok(())
}
