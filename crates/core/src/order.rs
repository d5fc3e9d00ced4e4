//! Order intake: packet selections, totals and order records.
//!
//! [`summarize`] is the only producer of order totals. [`NewOrder::validate`]
//! builds line items and totals from the same price lookups, so an order's
//! aggregates always equal the sums of its lines.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_text};
use crate::pricing::PricingTable;
use crate::types::{OrderId, OrderStatus, PacketSize, Variant};

/// Requested quantity per packet size. Missing sizes count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageSelection(BTreeMap<PacketSize, u32>);

impl PackageSelection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for `size`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, size: PacketSize, quantity: u32) -> Self {
        self.set(size, quantity);
        self
    }

    /// Set the quantity for `size`, replacing any previous value.
    pub fn set(&mut self, size: PacketSize, quantity: u32) {
        self.0.insert(size, quantity);
    }

    /// Quantity requested for `size`.
    #[must_use]
    pub fn quantity(&self, size: PacketSize) -> u32 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    /// Whether every quantity is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|q| *q == 0)
    }
}

impl FromIterator<(PacketSize, u32)> for PackageSelection {
    fn from_iter<I: IntoIterator<Item = (PacketSize, u32)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (size, quantity) in iter {
            // Repeated sizes add up, so "100=1 100=2" means three packets.
            let current = selection.quantity(size);
            selection.set(size, current.saturating_add(quantity));
        }
        selection
    }
}

/// One packet size within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLineItem {
    pub size: PacketSize,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// `size × quantity`, in grams.
    pub weight_grams: u64,
    /// `unit_price × quantity`, capped at `Decimal::MAX`.
    pub amount: Decimal,
}

/// Totals for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSummary {
    pub total_weight_grams: u64,
    pub total_packets: u64,
    pub total_amount: Decimal,
}

/// Line items for every size with a non-zero quantity, smallest size first.
#[must_use]
pub fn line_items(
    selection: &PackageSelection,
    variant: &Variant,
    pricing: &PricingTable,
) -> Vec<PackageLineItem> {
    PacketSize::ALL
        .iter()
        .filter_map(|&size| {
            let quantity = selection.quantity(size);
            if quantity == 0 {
                return None;
            }
            let unit_price = pricing.get_price(variant, size);
            Some(PackageLineItem {
                size,
                quantity,
                unit_price,
                weight_grams: u64::from(size.grams()) * u64::from(quantity),
                amount: unit_price.saturating_mul(Decimal::from(quantity)),
            })
        })
        .collect()
}

/// Total weight, packet count and amount of `selection` priced as
/// `variant`. An empty selection sums to zero. Amounts saturate at
/// `Decimal::MAX` instead of overflowing.
#[must_use]
pub fn summarize(
    selection: &PackageSelection,
    variant: &Variant,
    pricing: &PricingTable,
) -> OrderSummary {
    summarize_lines(&line_items(selection, variant, pricing))
}

fn summarize_lines(lines: &[PackageLineItem]) -> OrderSummary {
    lines
        .iter()
        .fold(OrderSummary::default(), |acc, line| OrderSummary {
            total_weight_grams: acc.total_weight_grams.saturating_add(line.weight_grams),
            total_packets: acc.total_packets.saturating_add(u64::from(line.quantity)),
            total_amount: acc.total_amount.saturating_add(line.amount),
        })
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub delivery_date: NaiveDate,
    pub variant: Variant,
    pub packages: Vec<PackageLineItem>,
    pub total_weight_grams: u64,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Flip between pending and completed.
    pub const fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }

    /// Number of packets across all lines.
    #[must_use]
    pub fn total_packets(&self) -> u64 {
        self.packages
            .iter()
            .fold(0, |acc, p| acc.saturating_add(u64::from(p.quantity)))
    }

    /// Whether the stored totals still match the line items.
    ///
    /// Records edited outside this crate can drift; callers use this to
    /// flag them on load.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let summary = summarize_lines(&self.packages);
        let lines_ok = self.packages.iter().all(|line| {
            line.weight_grams == u64::from(line.size.grams()) * u64::from(line.quantity)
                && line.amount == line.unit_price.saturating_mul(Decimal::from(line.quantity))
        });
        lines_ok
            && summary.total_weight_grams == self.total_weight_grams
            && summary.total_amount == self.total_amount
    }
}

/// Input for creating an order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub delivery_date: NaiveDate,
    pub variant: Variant,
    pub selection: PackageSelection,
}

impl NewOrder {
    /// Validate the input and price it against `pricing`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCustomerName`] for a blank customer
    /// and [`ValidationError::EmptyOrder`] when no packet has a non-zero
    /// quantity.
    pub fn validate(self, pricing: &PricingTable) -> Result<Order, ValidationError> {
        let customer_name = require_text(&self.customer_name, ValidationError::EmptyCustomerName)?;
        if self.selection.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        let packages = line_items(&self.selection, &self.variant, pricing);
        let summary = summarize_lines(&packages);

        Ok(Order {
            id: OrderId::new(),
            customer_name,
            delivery_date: self.delivery_date,
            variant: self.variant,
            packages,
            total_weight_grams: summary.total_weight_grams,
            total_amount: summary.total_amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
