//! Raw-material requirements for a production run.
//!
//! Every quantity scales linearly with the flour needed, which is the
//! finished weight divided by the yield ratio. Gas time is the exception:
//! the fryer runs in whole batch slots, so a 5.1 kg batch with a 5 kg slot
//! costs two full slots.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Decimal places kept on derived material quantities.
pub const QUANTITY_DP: u32 = 3;

const GRAMS_PER_KG: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Production constants for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionProfile {
    /// Finished product weight per kg of raw flour.
    pub yield_ratio: Decimal,
    /// Litres of oil per kg of flour.
    pub oil_l_per_kg: Decimal,
    /// Kg of salt per kg of flour.
    pub salt_kg_per_kg: Decimal,
    /// Kg of spice mix per kg of flour.
    pub spice_kg_per_kg: Decimal,
    /// Flour capacity of one fryer slot.
    pub batch_unit_kg: Decimal,
    /// Gas minutes per fryer slot.
    pub minutes_per_batch: u32,
    /// Gas cost per minute of burner time.
    pub gas_rate_per_minute: Decimal,
}

impl Default for ProductionProfile {
    fn default() -> Self {
        Self {
            yield_ratio: Decimal::new(14, 1),
            oil_l_per_kg: Decimal::new(25, 2),
            salt_kg_per_kg: Decimal::new(2, 2),
            spice_kg_per_kg: Decimal::new(3, 2),
            batch_unit_kg: Decimal::from(5),
            minutes_per_batch: 45,
            gas_rate_per_minute: Decimal::new(150, 2),
        }
    }
}

/// Materials and burner time needed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialRequirements {
    pub flour_kg: Decimal,
    pub oil_l: Decimal,
    pub salt_kg: Decimal,
    pub spice_kg: Decimal,
    pub gas_minutes: u32,
}

impl ProductionProfile {
    /// Requirements to produce `weight_grams` of finished product.
    #[must_use]
    pub fn requirements_for(&self, weight_grams: u64) -> MaterialRequirements {
        if weight_grams == 0 || self.yield_ratio <= Decimal::ZERO {
            return MaterialRequirements::default();
        }
        let finished_kg = Decimal::from(weight_grams) / GRAMS_PER_KG;
        self.requirements_for_batch(finished_kg / self.yield_ratio)
    }

    /// Requirements for a batch of `flour_kg` raw flour.
    ///
    /// Non-positive batches need nothing.
    #[must_use]
    pub fn requirements_for_batch(&self, flour_kg: Decimal) -> MaterialRequirements {
        if flour_kg <= Decimal::ZERO {
            return MaterialRequirements::default();
        }
        MaterialRequirements {
            flour_kg: flour_kg.round_dp(QUANTITY_DP),
            oil_l: (flour_kg * self.oil_l_per_kg).round_dp(QUANTITY_DP),
            salt_kg: (flour_kg * self.salt_kg_per_kg).round_dp(QUANTITY_DP),
            spice_kg: (flour_kg * self.spice_kg_per_kg).round_dp(QUANTITY_DP),
            gas_minutes: self.batch_slots(flour_kg).saturating_mul(self.minutes_per_batch),
        }
    }

    /// Whole fryer slots needed for `flour_kg`.
    #[must_use]
    pub fn batch_slots(&self, flour_kg: Decimal) -> u32 {
        if flour_kg <= Decimal::ZERO || self.batch_unit_kg <= Decimal::ZERO {
            return 0;
        }
        let slots = (flour_kg / self.batch_unit_kg).ceil();
        slots.to_u32().unwrap_or(u32::MAX)
    }
}
