//! Raw materials on hand and the production batch log.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::{MaterialPrices, cost_of};
use crate::error::{ValidationError, require_text};
use crate::production::{MaterialRequirements, ProductionProfile};
use crate::store::{MaterialsStore, StoreError};
use crate::types::{MaterialId, UsageId};

/// A raw material with its current unit price and advisory stock level.
///
/// Stock only grows through [`Material::add_stock`]; recording a production
/// batch does not draw it down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// Unit of measure, e.g. `kg` or `L`.
    pub unit: String,
    pub price_per_unit: Decimal,
    pub stock: Decimal,
}

impl Material {
    /// Change the unit price.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativePrice`] for negative prices; the
    /// material is left unchanged.
    pub fn set_price(&mut self, price: Decimal) -> Result<(), ValidationError> {
        if price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(price));
        }
        self.price_per_unit = price;
        Ok(())
    }

    /// Add purchased stock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveStock`] unless `quantity` is
    /// greater than zero.
    pub fn add_stock(&mut self, quantity: Decimal) -> Result<(), ValidationError> {
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveStock(quantity));
        }
        self.stock = self.stock.saturating_add(quantity);
        Ok(())
    }
}

/// Input for creating a material.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    pub unit: String,
    pub price_per_unit: Decimal,
    /// Opening stock.
    #[serde(default)]
    pub stock: Decimal,
}

impl NewMaterial {
    /// Input with zero opening stock.
    #[must_use]
    pub fn new(name: &str, unit: &str, price_per_unit: Decimal) -> Self {
        Self {
            name: name.to_owned(),
            unit: unit.to_owned(),
            price_per_unit,
            stock: Decimal::ZERO,
        }
    }

    /// Validate the input and assign an ID.
    ///
    /// # Errors
    ///
    /// Rejects an empty name, a negative price or negative opening stock.
    pub fn validate(self) -> Result<Material, ValidationError> {
        let name = require_text(&self.name, ValidationError::EmptyMaterialName)?;
        if self.price_per_unit < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(self.price_per_unit));
        }
        if self.stock < Decimal::ZERO {
            return Err(ValidationError::NegativeStock(self.stock));
        }
        Ok(Material {
            id: MaterialId::new(),
            name,
            unit: self.unit.trim().to_owned(),
            price_per_unit: self.price_per_unit,
            stock: self.stock,
        })
    }
}

/// Starter material list used when nothing has been stored yet.
#[must_use]
pub fn default_materials() -> Vec<Material> {
    [
        ("Flour", "kg", Decimal::from(40)),
        ("Oil", "L", Decimal::from(160)),
        ("Salt", "kg", Decimal::from(20)),
        ("Spice", "kg", Decimal::from(400)),
    ]
    .into_iter()
    .map(|(name, unit, price_per_unit)| Material {
        id: MaterialId::new(),
        name: name.to_owned(),
        unit: unit.to_owned(),
        price_per_unit,
        stock: Decimal::ZERO,
    })
    .collect()
}

/// Load materials from `store`, seeding [`default_materials`] when the
/// store is empty or unreadable.
///
/// Only for display and estimates. Anything that saves the list back must
/// use [`load_materials_for_update`].
pub fn load_materials(store: &impl MaterialsStore) -> Vec<Material> {
    load_materials_for_update(store).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load materials, using defaults");
        default_materials()
    })
}

/// Load materials from `store`, seeding [`default_materials`] only when
/// nothing has been stored yet.
///
/// # Errors
///
/// Returns the store's error when the stored list cannot be read, so a
/// damaged file is never replaced by the defaults.
pub fn load_materials_for_update(store: &impl MaterialsStore) -> Result<Vec<Material>, StoreError> {
    let materials = store.load()?;
    if materials.is_empty() {
        Ok(default_materials())
    } else {
        Ok(materials)
    }
}

/// Find a material by case-insensitive name.
pub fn find_by_name<'a>(materials: &'a mut [Material], name: &str) -> Option<&'a mut Material> {
    let needle = name.trim().to_lowercase();
    materials
        .iter_mut()
        .find(|m| m.name.to_lowercase() == needle)
}

/// One recorded production batch. The log is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub id: UsageId,
    pub date: NaiveDate,
    /// Raw flour in the batch.
    pub batch_kg: Decimal,
    pub requirements: MaterialRequirements,
    /// Estimated cost at the material prices current when recorded.
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

impl MaterialUsage {
    /// Record a batch of `batch_kg` flour.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveBatch`] unless `batch_kg` is
    /// greater than zero.
    pub fn record<P>(
        date: NaiveDate,
        batch_kg: Decimal,
        profile: &ProductionProfile,
        prices: &P,
    ) -> Result<Self, ValidationError>
    where
        P: MaterialPrices + ?Sized,
    {
        if batch_kg <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveBatch(batch_kg));
        }
        let requirements = profile.requirements_for_batch(batch_kg);
        let cost = cost_of(&requirements, prices, profile.gas_rate_per_minute);
        debug!(%date, %batch_kg, total_cost = %cost.total, "recorded production batch");

        Ok(Self {
            id: UsageId::new(),
            date,
            batch_kg,
            requirements,
            total_cost: cost.total,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_new_material_validation() {
        assert_eq!(
            NewMaterial::new(" ", "kg", dec!(1)).validate(),
            Err(ValidationError::EmptyMaterialName)
        );
        assert_eq!(
            NewMaterial::new("Flour", "kg", dec!(-1)).validate(),
            Err(ValidationError::NegativePrice(dec!(-1)))
        );
        let mut opening = NewMaterial::new("Flour", "kg", dec!(42));
        opening.stock = dec!(-2);
        assert_eq!(opening.validate(), Err(ValidationError::NegativeStock(dec!(-2))));
        assert_eq!(
            ValidationError::NegativeStock(dec!(-2)).to_string(),
            "opening stock cannot be negative, got -2"
        );

        let material = NewMaterial::new(" Flour ", " kg ", dec!(42)).validate().unwrap();
        assert_eq!(material.name, "Flour");
        assert_eq!(material.unit, "kg");
        assert_eq!(material.stock, Decimal::ZERO);
    }

    #[test]
    fn test_add_stock_only_increases() {
        let mut material = NewMaterial::new("Salt", "kg", dec!(20)).validate().unwrap();
        material.add_stock(dec!(2.5)).unwrap();
        material.add_stock(dec!(1)).unwrap();
        assert_eq!(material.stock, dec!(3.5));
        assert_eq!(
            material.add_stock(dec!(-1)),
            Err(ValidationError::NonPositiveStock(dec!(-1)))
        );
        assert!(material.add_stock(Decimal::ZERO).is_err());
        assert_eq!(material.stock, dec!(3.5));
    }

    #[test]
    fn test_set_price_rejects_negative() {
        let mut material = NewMaterial::new("Oil", "L", dec!(160)).validate().unwrap();
        assert!(material.set_price(dec!(-3)).is_err());
        assert_eq!(material.price_per_unit, dec!(160));
        material.set_price(dec!(170)).unwrap();
        assert_eq!(material.price_per_unit, dec!(170));
    }

    #[test]
    fn test_find_by_name() {
        let mut materials = default_materials();
        assert!(find_by_name(&mut materials, "flour").is_some());
        assert!(find_by_name(&mut materials, " SPICE ").is_some());
        assert!(find_by_name(&mut materials, "sugar").is_none());
    }

    #[test]
    fn test_record_usage_does_not_touch_stock() {
        let mut materials = default_materials();
        find_by_name(&mut materials, "flour").unwrap().add_stock(dec!(25)).unwrap();
        let usage = MaterialUsage::record(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            dec!(5),
            &ProductionProfile::default(),
            &materials,
        )
        .unwrap();

        // 5*40 + 1.25*160 + 0.1*20 + 0.15*400 + 45*1.50
        assert_eq!(usage.total_cost, dec!(529.5));
        assert_eq!(usage.requirements.gas_minutes, 45);
        assert_eq!(find_by_name(&mut materials, "flour").unwrap().stock, dec!(25));
    }

    #[test]
    fn test_record_usage_rejects_empty_batch() {
        let result = MaterialUsage::record(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            Decimal::ZERO,
            &ProductionProfile::default(),
            &default_materials(),
        );
        assert_eq!(result, Err(ValidationError::NonPositiveBatch(Decimal::ZERO)));
    }

    #[test]
    fn test_load_materials_seeds_defaults() {
        let store = MemoryStore::default();
        let materials = load_materials(&store);
        assert_eq!(materials.len(), 4);
    }

    #[test]
    fn test_load_for_update_seeds_only_when_empty() {
        let store = MemoryStore::default();
        assert_eq!(load_materials_for_update(&store).unwrap().len(), 4);

        let mut stored = default_materials();
        stored.truncate(1);
        MaterialsStore::save(&store, &stored).unwrap();
        assert_eq!(load_materials_for_update(&store).unwrap(), stored);
    }
}
