//! Snack Ledger Core - pricing, production and bookkeeping calculations.
//!
//! This crate holds everything the bookkeeping front ends compute:
//! - `cli` - Command-line bookkeeping over JSON files
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and the store traits
//! callers implement. It performs no I/O of its own, holds no global state
//! and every calculation returns a usable value for any input it accepts.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, packet sizes, variants and statuses
//! - [`pricing`] - Three-tier unit price lookup
//! - [`production`] - Raw-material requirements per batch
//! - [`cost`] - Production cost from requirements and material prices
//! - [`order`] - Packet selections, order totals and order records
//! - [`ledger`] - Income, expenses, profit, payments and margins
//! - [`filter`] - Search and filter predicates
//! - [`material`] - Raw materials and the batch log
//! - [`store`] - Persistence collaborator traits

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cost;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod material;
pub mod order;
pub mod pricing;
pub mod production;
pub mod store;
pub mod types;

pub use cost::{CostBreakdown, MaterialKey, MaterialPrices, cost_of};
pub use error::ValidationError;
pub use filter::{ExpenseFilter, ExpenseKind, IncomeFilter, OrderFilter};
pub use ledger::{
    DashboardSummary, ExpenseEntry, IncomeEntry, LedgerTotals, NewExpense, NewIncome, OrderMargin,
    OrderPayment, dashboard, margin_for, payment_for, payment_status, totals,
};
pub use material::{
    Material, MaterialUsage, NewMaterial, default_materials, find_by_name, load_materials,
    load_materials_for_update,
};
pub use order::{
    NewOrder, Order, OrderSummary, PackageLineItem, PackageSelection, line_items, summarize,
};
pub use pricing::{PriceBook, PriceSource, PricingTable};
pub use production::{MaterialRequirements, ProductionProfile};
pub use store::{MaterialsStore, MemoryStore, PricingStore, StoreError};
pub use types::*;
