//! Requirements, batch quantization and costing.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use snack_ledger_core::{
    MaterialKey, MaterialUsage, MaterialsStore, MemoryStore, NewMaterial, ProductionProfile,
    cost_of, default_materials, load_materials,
};

#[test]
fn test_requirements_monotonic_in_weight() {
    let profile = ProductionProfile::default();
    let mut previous = profile.requirements_for(0);

    for grams in (50..=30_000).step_by(50) {
        let next = profile.requirements_for(grams);
        assert!(next.flour_kg >= previous.flour_kg, "flour at {grams} g");
        assert!(next.oil_l >= previous.oil_l, "oil at {grams} g");
        assert!(next.salt_kg >= previous.salt_kg, "salt at {grams} g");
        assert!(next.spice_kg >= previous.spice_kg, "spice at {grams} g");
        assert!(next.gas_minutes >= previous.gas_minutes, "gas at {grams} g");
        previous = next;
    }
}

#[test]
fn test_gas_is_quantized_per_slot() {
    let profile = ProductionProfile::default();
    assert_eq!(profile.requirements_for_batch(dec!(5)).gas_minutes, 45);
    assert_eq!(profile.requirements_for_batch(dec!(5.1)).gas_minutes, 90);
    assert_eq!(profile.requirements_for_batch(dec!(10)).gas_minutes, 90);
    assert_eq!(profile.requirements_for_batch(dec!(10.001)).gas_minutes, 135);
}

#[test]
fn test_empty_price_lookup_costs_only_gas() {
    let profile = ProductionProfile::default();
    let req = profile.requirements_for(12_000);
    let cost = cost_of(&req, &BTreeMap::<MaterialKey, Decimal>::new(), profile.gas_rate_per_minute);

    assert!(cost.materials.values().all(|c| c.is_zero()));
    assert_eq!(cost.gas, Decimal::from(req.gas_minutes) * profile.gas_rate_per_minute);
    assert_eq!(cost.total, cost.gas);
}

#[test]
fn test_renamed_material_drops_out_of_cost() {
    let profile = ProductionProfile::default();
    let req = profile.requirements_for_batch(dec!(5));

    let mut materials = default_materials();
    let full = cost_of(&req, &materials, profile.gas_rate_per_minute);

    for m in &mut materials {
        if m.name == "Spice" {
            m.name = "Chaat mix".to_owned();
        }
    }
    let degraded = cost_of(&req, &materials, profile.gas_rate_per_minute);

    assert_eq!(degraded.materials.get(&MaterialKey::Spice), Some(&Decimal::ZERO));
    assert_eq!(full.total - degraded.total, dec!(60));
}

#[test]
fn test_materials_store_seeds_defaults() {
    let store = MemoryStore::default();
    assert_eq!(load_materials(&store).len(), 4);

    let mut materials = load_materials(&store);
    materials.push(NewMaterial::new("Besan", "kg", dec!(90)).validate().unwrap());
    MaterialsStore::save(&store, &materials).unwrap();
    assert_eq!(load_materials(&store).len(), 5);
}

#[test]
fn test_usage_log_records_cost_without_touching_stock() {
    let profile = ProductionProfile::default();
    let mut materials = default_materials();
    for m in &mut materials {
        m.add_stock(dec!(10)).unwrap();
    }

    let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let usage = MaterialUsage::record(day, dec!(2.5), &profile, &materials).unwrap();

    assert_eq!(usage.requirements.gas_minutes, 45);
    assert_eq!(
        usage.total_cost,
        cost_of(&usage.requirements, &materials, profile.gas_rate_per_minute).total
    );
    assert!(materials.iter().all(|m| m.stock == dec!(10)));
}
