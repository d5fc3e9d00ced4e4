//! Production cost from material requirements.
//!
//! A requirement whose material cannot be priced contributes nothing. A
//! renamed or deleted material lowers the estimate instead of failing it.
//! Every line and the total saturate at `Decimal::MAX`.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::production::MaterialRequirements;

/// Raw materials a recipe draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKey {
    Flour,
    Oil,
    Salt,
    Spice,
}

impl MaterialKey {
    pub const ALL: [Self; 4] = [Self::Flour, Self::Oil, Self::Salt, Self::Spice];

    /// Material names (lowercase) that supply this key.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Flour => &["flour", "maida", "besan"],
            Self::Oil => &["oil", "cooking oil"],
            Self::Salt => &["salt"],
            Self::Spice => &["spice", "spices", "masala"],
        }
    }

    /// Whether a material called `name` supplies this key.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.aliases().iter().any(|alias| *alias == name)
    }

    /// Quantity of this material in `requirements`.
    #[must_use]
    pub const fn quantity_in(self, requirements: &MaterialRequirements) -> Decimal {
        match self {
            Self::Flour => requirements.flour_kg,
            Self::Oil => requirements.oil_l,
            Self::Salt => requirements.salt_kg,
            Self::Spice => requirements.spice_kg,
        }
    }
}

/// Unit price lookup for raw materials.
pub trait MaterialPrices {
    /// Price per unit of `key`, or `None` if it is not known.
    fn price_of(&self, key: MaterialKey) -> Option<Decimal>;
}

impl MaterialPrices for [Material] {
    fn price_of(&self, key: MaterialKey) -> Option<Decimal> {
        self.iter()
            .find(|m| key.matches(&m.name))
            .map(|m| m.price_per_unit)
    }
}

impl MaterialPrices for Vec<Material> {
    fn price_of(&self, key: MaterialKey) -> Option<Decimal> {
        self.as_slice().price_of(key)
    }
}

impl MaterialPrices for BTreeMap<MaterialKey, Decimal> {
    fn price_of(&self, key: MaterialKey) -> Option<Decimal> {
        self.get(&key).copied()
    }
}

impl MaterialPrices for HashMap<MaterialKey, Decimal> {
    fn price_of(&self, key: MaterialKey) -> Option<Decimal> {
        self.get(&key).copied()
    }
}

/// Cost of a production run, split by input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Cost per material. Unpriced materials are present with zero cost.
    pub materials: BTreeMap<MaterialKey, Decimal>,
    /// Burner time cost.
    pub gas: Decimal,
    /// Sum of every line.
    pub total: Decimal,
}

/// Price `requirements` using `prices` and a gas rate per minute.
#[must_use]
pub fn cost_of<P>(
    requirements: &MaterialRequirements,
    prices: &P,
    gas_rate_per_minute: Decimal,
) -> CostBreakdown
where
    P: MaterialPrices + ?Sized,
{
    let materials: BTreeMap<MaterialKey, Decimal> = MaterialKey::ALL
        .iter()
        .map(|&key| {
            let cost = prices
                .price_of(key)
                .map_or(Decimal::ZERO, |price| {
                    key.quantity_in(requirements).saturating_mul(price)
                });
            (key, cost)
        })
        .collect();
    let gas = Decimal::from(requirements.gas_minutes).saturating_mul(gas_rate_per_minute);
    let total = materials
        .values()
        .copied()
        .fold(gas, Decimal::saturating_add);

    CostBreakdown {
        materials,
        gas,
        total,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::material::NewMaterial;
    use crate::production::ProductionProfile;

    fn sample_requirements() -> MaterialRequirements {
        MaterialRequirements {
            flour_kg: dec!(5),
            oil_l: dec!(1.25),
            salt_kg: dec!(0.1),
            spice_kg: dec!(0.15),
            gas_minutes: 45,
        }
    }

    #[test]
    fn test_empty_lookup_is_gas_only() {
        let prices: BTreeMap<MaterialKey, Decimal> = BTreeMap::new();
        let cost = cost_of(&sample_requirements(), &prices, dec!(1.50));
        assert_eq!(cost.gas, dec!(67.50));
        assert_eq!(cost.total, dec!(67.50));
        assert!(cost.materials.values().all(|c| c.is_zero()));
    }

    #[test]
    fn test_full_lookup() {
        let prices = BTreeMap::from([
            (MaterialKey::Flour, dec!(40)),
            (MaterialKey::Oil, dec!(160)),
            (MaterialKey::Salt, dec!(20)),
            (MaterialKey::Spice, dec!(400)),
        ]);
        let cost = cost_of(&sample_requirements(), &prices, dec!(1.50));
        // 200 + 200 + 2 + 60 + 67.5
        assert_eq!(cost.total, dec!(529.5));
        assert_eq!(cost.materials[&MaterialKey::Oil], dec!(200));
    }

    #[test]
    fn test_missing_material_contributes_zero() {
        let prices = BTreeMap::from([(MaterialKey::Flour, dec!(40))]);
        let cost = cost_of(&sample_requirements(), &prices, Decimal::ZERO);
        assert_eq!(cost.total, dec!(200));
        assert_eq!(cost.materials[&MaterialKey::Spice], Decimal::ZERO);
    }

    #[test]
    fn test_material_list_lookup_by_alias() {
        let materials: Vec<Material> = vec![
            NewMaterial::new("Maida", "kg", dec!(40)).validate().unwrap(),
            NewMaterial::new("Cooking Oil", "L", dec!(160)).validate().unwrap(),
        ];
        assert_eq!(materials.price_of(MaterialKey::Flour), Some(dec!(40)));
        assert_eq!(materials.price_of(MaterialKey::Oil), Some(dec!(160)));
        assert_eq!(materials.price_of(MaterialKey::Salt), None);
    }

    #[test]
    fn test_huge_prices_saturate() {
        let prices = BTreeMap::from([
            (MaterialKey::Flour, Decimal::MAX),
            (MaterialKey::Oil, Decimal::MAX),
        ]);
        let cost = cost_of(&sample_requirements(), &prices, Decimal::MAX);
        assert_eq!(cost.materials[&MaterialKey::Flour], Decimal::MAX);
        assert_eq!(cost.gas, Decimal::MAX);
        assert_eq!(cost.total, Decimal::MAX);
    }

    #[test]
    fn test_with_profile_requirements() {
        let profile = ProductionProfile::default();
        let req = profile.requirements_for(7000);
        let prices: BTreeMap<MaterialKey, Decimal> = BTreeMap::new();
        let cost = cost_of(&req, &prices, profile.gas_rate_per_minute);
        assert_eq!(cost.total, dec!(67.50));
    }
}
