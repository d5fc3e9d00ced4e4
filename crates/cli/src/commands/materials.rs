//! Raw material commands.
//!
//! # Usage
//!
//! ```bash
//! sl-cli material list
//! sl-cli material add --name "Chilli powder" --unit kg --price 520
//! sl-cli material set-price flour 42
//! sl-cli material add-stock oil 15
//! ```

use rust_decimal::Decimal;
use snack_ledger_core::{
    Material, MaterialId, MaterialsStore, NewMaterial, ValidationError, find_by_name,
    load_materials, load_materials_for_update,
};
use tracing::info;

use super::{CommandError, Context, money};

/// Print every material with price and stock.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context) {
    for material in load_materials(&ctx.store) {
        println!(
            "{:<16} {:>10} / {:<3}  stock {} {}",
            material.name,
            money(material.price_per_unit),
            material.unit,
            material.stock.normalize(),
            material.unit
        );
    }
}

/// Add a new material.
///
/// # Errors
///
/// Returns a validation error for a blank name or negative price, or a
/// storage error. An unreadable materials file is left untouched.
#[allow(clippy::print_stdout)]
pub fn add(
    ctx: &Context,
    name: &str,
    unit: &str,
    price_per_unit: Decimal,
) -> Result<MaterialId, CommandError> {
    let material = NewMaterial::new(name, unit, price_per_unit).validate()?;
    let mut materials = load_materials_for_update(&ctx.store)?;
    let id = material.id;
    let name = material.name.clone();
    materials.push(material);
    MaterialsStore::save(&ctx.store, &materials)?;
    info!(material_id = %id, %name, "material added");
    println!("Added material {id}: {name}");
    Ok(id)
}

fn update<F>(ctx: &Context, name: &str, change: F) -> Result<(), CommandError>
where
    F: FnOnce(&mut Material) -> Result<(), ValidationError>,
{
    let mut materials = load_materials_for_update(&ctx.store)?;
    let material = find_by_name(&mut materials, name)
        .ok_or_else(|| CommandError::not_found("material", name))?;
    change(material)?;
    MaterialsStore::save(&ctx.store, &materials)?;
    Ok(())
}

/// Change the unit price of a material.
///
/// # Errors
///
/// Returns `NotFound` for an unknown material, a validation error for a
/// negative price, or a storage error.
pub fn set_price(ctx: &Context, name: &str, price: Decimal) -> Result<(), CommandError> {
    update(ctx, name, |m| m.set_price(price))?;
    info!(name, price = %money(price), "material price updated");
    Ok(())
}

/// Add purchased stock to a material.
///
/// # Errors
///
/// Returns `NotFound` for an unknown material, a validation error for a
/// non-positive quantity, or a storage error.
pub fn add_stock(ctx: &Context, name: &str, quantity: Decimal) -> Result<(), CommandError> {
    update(ctx, name, |m| m.add_stock(quantity))?;
    info!(name, %quantity, "stock added");
    Ok(())
}
