//! Persistence collaborators.
//!
//! The calculation modules never fetch or write data themselves. Callers
//! hand them a store and decide where it lives (JSON files in the CLI, an
//! in-memory [`MemoryStore`] in tests).

use std::cell::RefCell;

use thiserror::Error;

use crate::material::Material;
use crate::pricing::PriceBook;

/// Errors that can occur while loading or saving.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file or device error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is structurally wrong.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Loads and saves the price book.
pub trait PricingStore {
    /// Read the stored price overrides.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium cannot be read.
    fn load(&self) -> Result<PriceBook, StoreError>;

    /// Replace the stored price overrides.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium cannot be written.
    fn save(&self, book: &PriceBook) -> Result<(), StoreError>;
}

/// Loads and saves the material list.
pub trait MaterialsStore {
    /// Read every stored material.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium cannot be read.
    fn load(&self) -> Result<Vec<Material>, StoreError>;

    /// Replace the stored material list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium cannot be written.
    fn save(&self, materials: &[Material]) -> Result<(), StoreError>;
}

/// Store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    prices: RefCell<PriceBook>,
    materials: RefCell<Vec<Material>>,
}

impl MemoryStore {
    /// Store pre-loaded with a price book.
    #[must_use]
    pub fn with_prices(book: PriceBook) -> Self {
        Self {
            prices: RefCell::new(book),
            materials: RefCell::default(),
        }
    }
}

impl PricingStore for MemoryStore {
    fn load(&self) -> Result<PriceBook, StoreError> {
        Ok(self.prices.borrow().clone())
    }

    fn save(&self, book: &PriceBook) -> Result<(), StoreError> {
        self.prices.replace(book.clone());
        Ok(())
    }
}

impl MaterialsStore for MemoryStore {
    fn load(&self) -> Result<Vec<Material>, StoreError> {
        Ok(self.materials.borrow().clone())
    }

    fn save(&self, materials: &[Material]) -> Result<(), StoreError> {
        self.materials.replace(materials.to_vec());
        Ok(())
    }
}
