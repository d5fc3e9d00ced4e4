//! Production batch commands.
//!
//! # Usage
//!
//! ```bash
//! # Materials and cost to make 12 kg of finished snacks
//! sl-cli batch estimate --weight 12000
//!
//! # Log a fried batch of 5 kg flour
//! sl-cli batch record --kg 5 --date 2026-10-18
//!
//! sl-cli batch list
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use snack_ledger_core::{
    CostBreakdown, MaterialRequirements, MaterialUsage, UsageId, cost_of, load_materials,
};
use tracing::info;

use super::{CommandError, Context, kilograms, money};

#[allow(clippy::print_stdout)]
fn print_requirements(req: &MaterialRequirements, cost: &CostBreakdown) {
    println!("  Flour:  {:>9} kg", req.flour_kg);
    println!("  Oil:    {:>9} L", req.oil_l);
    println!("  Salt:   {:>9} kg", req.salt_kg);
    println!("  Spice:  {:>9} kg", req.spice_kg);
    println!("  Gas:    {:>9} min", req.gas_minutes);
    for (key, amount) in &cost.materials {
        println!("  {:<7} {:>10}", format!("{key:?}:"), money(*amount));
    }
    println!("  {:<7} {:>10}", "Gas:", money(cost.gas));
    println!("  {:<7} {:>10}", "Total:", money(cost.total));
}

/// Print what producing `weight_grams` of finished product needs and costs.
#[allow(clippy::print_stdout)]
pub fn estimate(ctx: &Context, weight_grams: u64) {
    let materials = load_materials(&ctx.store);
    let req = ctx.profile.requirements_for(weight_grams);
    let cost = cost_of(&req, &materials, ctx.profile.gas_rate_per_minute);

    println!("Estimate for {}", kilograms(weight_grams));
    print_requirements(&req, &cost);
}

/// Log a fried batch of `batch_kg` flour. Stock levels are not changed.
///
/// # Errors
///
/// Returns a validation error unless `batch_kg` is positive, or a storage
/// error.
#[allow(clippy::print_stdout)]
pub fn record(ctx: &Context, batch_kg: Decimal, date: NaiveDate) -> Result<UsageId, CommandError> {
    let materials = load_materials(&ctx.store);
    let usage = MaterialUsage::record(date, batch_kg, &ctx.profile, &materials)?;
    let id = usage.id;
    let total_cost = usage.total_cost;
    ctx.store.append_usage(usage)?;
    info!(usage_id = %id, %batch_kg, total_cost = %money(total_cost), "batch recorded");
    println!("Recorded batch {id}: {batch_kg} kg flour, cost {}", money(total_cost));
    Ok(id)
}

/// Print the batch log.
///
/// # Errors
///
/// Returns an error if the log cannot be read.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context) -> Result<(), CommandError> {
    let log = ctx.store.load_usage()?;
    for usage in &log {
        println!(
            "{}  {}  {:>7} kg flour  {:>4} min gas  {:>10}",
            usage.id,
            usage.date,
            usage.batch_kg,
            usage.requirements.gas_minutes,
            money(usage.total_cost)
        );
    }
    let total = log
        .iter()
        .fold(Decimal::ZERO, |acc, u| acc.saturating_add(u.total_cost));
    println!("{} batches, total cost {}", log.len(), money(total));
    Ok(())
}
