//! Search and filter predicates over record lists.
//!
//! Filters borrow the records they select and never reorder or modify the
//! underlying collections.

use serde::{Deserialize, Serialize};

use crate::ledger::{ExpenseEntry, IncomeEntry};
use crate::order::Order;
use crate::types::{OrderStatus, Variant};

/// Case-insensitive substring match; an empty needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Criteria for listing orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderFilter {
    /// Matches customer name or variant tag.
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub variant: Option<Variant>,
}

impl OrderFilter {
    /// Whether `order` passes every criterion.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        self.search.as_deref().map(str::trim).is_none_or(|s| {
            contains_ci(&order.customer_name, s) || contains_ci(order.variant.as_str(), s)
        })
            && self.status.is_none_or(|s| order.status == s)
            && self.variant.as_ref().is_none_or(|v| order.variant == *v)
    }

    /// Orders passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

/// Criteria for listing income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IncomeFilter {
    /// Matches customer name or remarks.
    pub search: Option<String>,
}

impl IncomeFilter {
    /// Whether `entry` passes the filter.
    #[must_use]
    pub fn matches(&self, entry: &IncomeEntry) -> bool {
        self.search.as_deref().map(str::trim).is_none_or(|s| {
            contains_ci(&entry.customer_name, s)
                || entry.remarks.as_deref().is_some_and(|r| contains_ci(r, s))
        })
    }

    /// Entries passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, entries: &'a [IncomeEntry]) -> Vec<&'a IncomeEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Which expenses to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    #[default]
    All,
    Business,
    Extra,
}

impl std::str::FromStr for ExpenseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "business" => Ok(Self::Business),
            "extra" => Ok(Self::Extra),
            _ => Err(format!("invalid expense kind: {s}")),
        }
    }
}

/// Criteria for listing expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExpenseFilter {
    /// Matches item or remarks.
    pub search: Option<String>,
    #[serde(default)]
    pub kind: ExpenseKind,
}

impl ExpenseFilter {
    /// Whether `entry` passes every criterion.
    #[must_use]
    pub fn matches(&self, entry: &ExpenseEntry) -> bool {
        let kind_ok = match self.kind {
            ExpenseKind::All => true,
            ExpenseKind::Business => !entry.is_extra,
            ExpenseKind::Extra => entry.is_extra,
        };
        kind_ok
            && self.search.as_deref().map(str::trim).is_none_or(|s| {
                contains_ci(&entry.item, s)
                    || entry.remarks.as_deref().is_some_and(|r| contains_ci(r, s))
            })
    }

    /// Entries passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, entries: &'a [ExpenseEntry]) -> Vec<&'a ExpenseEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}
