//! Cross-module tests for Snack Ledger.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p snack-ledger-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing_orders` - Price resolution feeding order totals
//! - `production_costs` - Requirements, batch quantization and costing
//! - `bookkeeping` - Profit, payments and the dashboard
