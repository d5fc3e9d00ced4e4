//! Income, expenses and the numbers derived from them.
//!
//! Expenses flagged as extra (personal or non-business spend) are tracked
//! separately and never reduce profit. Sums and differences saturate at the
//! `Decimal` bounds.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cost::{CostBreakdown, MaterialPrices, cost_of};
use crate::error::{ValidationError, optional_text, require_positive, require_text};
use crate::order::Order;
use crate::production::ProductionProfile;
use crate::types::{ExpenseId, IncomeId, OrderId, OrderStatus, PaymentStatus};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Records
// =============================================================================

/// Money received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: IncomeId,
    pub customer_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Order this payment settles, if any.
    pub order_id: Option<OrderId>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording income.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncome {
    pub customer_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub order_id: Option<OrderId>,
    pub remarks: Option<String>,
}

impl NewIncome {
    /// Validate and assign an ID.
    ///
    /// # Errors
    ///
    /// Rejects a blank customer name or a non-positive amount.
    pub fn validate(self) -> Result<IncomeEntry, ValidationError> {
        let customer_name = require_text(&self.customer_name, ValidationError::EmptyCustomerName)?;
        let amount = require_positive(self.amount)?;
        Ok(IncomeEntry {
            id: IncomeId::new(),
            customer_name,
            amount,
            date: self.date,
            order_id: self.order_id,
            remarks: optional_text(self.remarks.as_deref()),
            created_at: Utc::now(),
        })
    }
}

/// Money spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: ExpenseId,
    pub item: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Excluded from profit when set.
    pub is_extra: bool,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExpenseEntry {
    /// Move the expense between business and extra.
    pub const fn toggle_extra(&mut self) {
        self.is_extra = !self.is_extra;
    }
}

/// Input for recording an expense.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub item: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_extra: bool,
    pub remarks: Option<String>,
}

impl NewExpense {
    /// Validate and assign an ID.
    ///
    /// # Errors
    ///
    /// Rejects a blank item or a non-positive amount.
    pub fn validate(self) -> Result<ExpenseEntry, ValidationError> {
        let item = require_text(&self.item, ValidationError::EmptyItem)?;
        let amount = require_positive(self.amount)?;
        Ok(ExpenseEntry {
            id: ExpenseId::new(),
            item,
            amount,
            date: self.date,
            is_extra: self.is_extra,
            remarks: optional_text(self.remarks.as_deref()),
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Income, expense and profit across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_income: Decimal,
    /// Business expenses only.
    pub total_expense: Decimal,
    /// Expenses flagged as extra.
    pub extra_expense: Decimal,
    /// `total_income - total_expense`.
    pub profit: Decimal,
    /// Profit as a percentage of income, `None` without income.
    pub profit_margin_percent: Option<Decimal>,
}

/// Percentage of `part` in `whole`, rounded to two places.
fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)
        .map(|ratio| ratio.saturating_mul(HUNDRED).round_dp(2))
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Reduce income and expense records to totals.
#[must_use]
pub fn totals(incomes: &[IncomeEntry], expenses: &[ExpenseEntry]) -> LedgerTotals {
    let total_income = sum(incomes.iter().map(|i| i.amount));
    let (extra, business): (Vec<&ExpenseEntry>, Vec<&ExpenseEntry>) =
        expenses.iter().partition(|e| e.is_extra);
    let total_expense = sum(business.iter().map(|e| e.amount));
    let extra_expense = sum(extra.iter().map(|e| e.amount));
    let profit = total_income.saturating_sub(total_expense);

    LedgerTotals {
        total_income,
        total_expense,
        extra_expense,
        profit,
        profit_margin_percent: percent_of(profit, total_income),
    }
}

// =============================================================================
// Per-order payments
// =============================================================================

/// How far an order has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayment {
    pub order_id: OrderId,
    pub total_amount: Decimal,
    pub paid: Decimal,
    /// `total_amount - paid`; negative when overpaid.
    pub pending: Decimal,
    pub status: PaymentStatus,
}

/// Classify an order given what has been paid against it.
#[must_use]
pub fn payment_status(total_amount: Decimal, paid: Decimal) -> PaymentStatus {
    if total_amount.saturating_sub(paid) <= Decimal::ZERO {
        PaymentStatus::Paid
    } else if paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}

/// Payment position of `order`, counting income entries linked to it.
#[must_use]
pub fn payment_for(order: &Order, incomes: &[IncomeEntry]) -> OrderPayment {
    let paid = sum(
        incomes
            .iter()
            .filter(|i| i.order_id == Some(order.id))
            .map(|i| i.amount),
    );
    OrderPayment {
        order_id: order.id,
        total_amount: order.total_amount,
        paid,
        pending: order.total_amount.saturating_sub(paid),
        status: payment_status(order.total_amount, paid),
    }
}

// =============================================================================
// Margins
// =============================================================================

/// Estimated profitability of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMargin {
    pub order_id: OrderId,
    pub revenue: Decimal,
    pub cost: CostBreakdown,
    pub gross_profit: Decimal,
    /// Gross profit as a percentage of revenue, `None` for zero revenue.
    pub margin_percent: Option<Decimal>,
}

/// Estimate production cost and margin for `order`.
#[must_use]
pub fn margin_for<P>(order: &Order, profile: &ProductionProfile, prices: &P) -> OrderMargin
where
    P: MaterialPrices + ?Sized,
{
    let requirements = profile.requirements_for(order.total_weight_grams);
    let cost = cost_of(&requirements, prices, profile.gas_rate_per_minute);
    let gross_profit = order.total_amount.saturating_sub(cost.total);
    OrderMargin {
        order_id: order.id,
        revenue: order.total_amount,
        margin_percent: percent_of(gross_profit, order.total_amount),
        gross_profit,
        cost,
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub totals: LedgerTotals,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub total_order_value: Decimal,
    pub total_order_weight_grams: u64,
    /// Income linked to an order.
    pub received_against_orders: Decimal,
    /// Sum of what is still owed on under-paid orders.
    pub outstanding: Decimal,
}

/// Combine orders, income and expenses into dashboard figures.
#[must_use]
pub fn dashboard(
    orders: &[Order],
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
) -> DashboardSummary {
    let payments: Vec<OrderPayment> = orders.iter().map(|o| payment_for(o, incomes)).collect();

    DashboardSummary {
        totals: totals(incomes, expenses),
        pending_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
        completed_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .count(),
        total_order_value: sum(orders.iter().map(|o| o.total_amount)),
        total_order_weight_grams: orders
            .iter()
            .fold(0, |acc, o| acc.saturating_add(o.total_weight_grams)),
        received_against_orders: sum(payments.iter().map(|p| p.paid)),
        outstanding: sum(payments.iter().map(|p| p.pending.max(Decimal::ZERO))),
    }
}
