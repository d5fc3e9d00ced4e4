//! JSON file storage for the ledger.
//!
//! # Files (under `LEDGER_DATA_DIR`)
//!
//! - `pricing.json` - Price overrides `{variant: {grams: price}}`
//! - `materials.json` - Raw materials
//! - `orders.json` - Orders
//! - `income.json` - Income entries
//! - `expenses.json` - Expense entries
//! - `usage.json` - Production batch log
//!
//! A missing file reads as an empty collection. Writes go to a temporary
//! file that is renamed over the target, so a crash never leaves half a
//! file behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use snack_ledger_core::{
    ExpenseEntry, IncomeEntry, Material, MaterialUsage, MaterialsStore, Order, PriceBook,
    PricingStore, StoreError,
};
use tracing::{debug, warn};

const PRICING_FILE: &str = "pricing.json";
const MATERIALS_FILE: &str = "materials.json";
const ORDERS_FILE: &str = "orders.json";
const INCOME_FILE: &str = "income.json";
const EXPENSES_FILE: &str = "expenses.json";
const USAGE_FILE: &str = "usage.json";

/// Directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened data directory");
        Ok(Self { dir })
    }

    /// Path of the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read a file's raw contents, `None` if it does not exist.
    fn read_raw(&self, file: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(file)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        match self.read_raw(file)? {
            Some(content) if !content.trim().is_empty() => Ok(serde_json::from_str(&content)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let target = self.path(file);
        let tmp = self.path(&format!(".{file}.tmp"));
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &target)?;
        debug!(file = %target.display(), "saved");
        Ok(())
    }

    // =========================================================================
    // Record collections
    // =========================================================================

    /// Load all orders, warning about any whose totals no longer match
    /// their line items.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or parsed.
    pub fn load_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders: Vec<Order> = self.read_list(ORDERS_FILE)?;
        for order in orders.iter().filter(|o| !o.is_consistent()) {
            warn!(order_id = %order.id, "order totals do not match its line items");
        }
        Ok(orders)
    }

    /// Replace all orders.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn save_orders(&self, orders: &[Order]) -> Result<(), StoreError> {
        self.write_json(ORDERS_FILE, orders)
    }

    /// Load all income entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or parsed.
    pub fn load_income(&self) -> Result<Vec<IncomeEntry>, StoreError> {
        self.read_list(INCOME_FILE)
    }

    /// Replace all income entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn save_income(&self, entries: &[IncomeEntry]) -> Result<(), StoreError> {
        self.write_json(INCOME_FILE, entries)
    }

    /// Load all expense entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or parsed.
    pub fn load_expenses(&self) -> Result<Vec<ExpenseEntry>, StoreError> {
        self.read_list(EXPENSES_FILE)
    }

    /// Replace all expense entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn save_expenses(&self, entries: &[ExpenseEntry]) -> Result<(), StoreError> {
        self.write_json(EXPENSES_FILE, entries)
    }

    /// Load the production batch log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or parsed.
    pub fn load_usage(&self) -> Result<Vec<MaterialUsage>, StoreError> {
        self.read_list(USAGE_FILE)
    }

    /// Append one batch to the log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be read or written.
    pub fn append_usage(&self, usage: MaterialUsage) -> Result<(), StoreError> {
        let mut log = self.load_usage()?;
        log.push(usage);
        self.write_json(USAGE_FILE, &log)
    }
}

impl PricingStore for JsonStore {
    fn load(&self) -> Result<PriceBook, StoreError> {
        match self.read_raw(PRICING_FILE)? {
            Some(content) if !content.trim().is_empty() => {
                let value: serde_json::Value = serde_json::from_str(&content)?;
                Ok(PriceBook::from_json_lenient(&value))
            }
            _ => Ok(PriceBook::new()),
        }
    }

    fn save(&self, book: &PriceBook) -> Result<(), StoreError> {
        self.write_json(PRICING_FILE, book)
    }
}

impl MaterialsStore for JsonStore {
    fn load(&self) -> Result<Vec<Material>, StoreError> {
        self.read_list(MATERIALS_FILE)
    }

    fn save(&self, materials: &[Material]) -> Result<(), StoreError> {
        self.write_json(MATERIALS_FILE, materials)
    }
}
