//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! # Price a cart without saving it
//! sl-cli order quote --variant retail --pack 100=2 --pack 250=1
//!
//! # Take an order
//! sl-cli order add --customer "Asha" --delivery 2026-11-02 --variant cheese --pack 250=4
//!
//! # List, toggle, delete
//! sl-cli order list --status pending
//! sl-cli order toggle <ID>
//! sl-cli order delete <ID>
//!
//! # Estimated production cost and margin
//! sl-cli order margin <ID>
//! ```

use chrono::NaiveDate;
use snack_ledger_core::{
    NewOrder, Order, OrderFilter, OrderId, PackageSelection, PacketSize, PricingTable, Variant,
    line_items, load_materials, margin_for, payment_for, summarize,
};
use tracing::info;

use super::{CommandError, Context, kilograms, money, percent};

/// Print the totals a cart would have, without saving anything.
#[allow(clippy::print_stdout)]
pub fn quote(ctx: &Context, variant: &Variant, packs: &[(PacketSize, u32)]) {
    let pricing = PricingTable::load(&ctx.store);
    let selection: PackageSelection = packs.iter().copied().collect();

    for line in line_items(&selection, variant, &pricing) {
        println!(
            "  {:>3} × {:>6} @ {:>8} = {:>10}",
            line.quantity,
            line.size.to_string(),
            money(line.unit_price),
            money(line.amount)
        );
    }
    let summary = summarize(&selection, variant, &pricing);
    println!(
        "{variant}: {} packets, {}, total {}",
        summary.total_packets,
        kilograms(summary.total_weight_grams),
        money(summary.total_amount)
    );
}

/// Create and save a new order.
///
/// # Errors
///
/// Returns a validation error for a blank customer or an empty cart, or a
/// storage error if the orders cannot be saved.
#[allow(clippy::print_stdout)]
pub fn add(
    ctx: &Context,
    customer_name: &str,
    delivery_date: NaiveDate,
    variant: Variant,
    packs: &[(PacketSize, u32)],
) -> Result<OrderId, CommandError> {
    let pricing = PricingTable::load(&ctx.store);
    let order = NewOrder {
        customer_name: customer_name.to_owned(),
        delivery_date,
        variant,
        selection: packs.iter().copied().collect(),
    }
    .validate(&pricing)?;

    let mut orders = ctx.store.load_orders()?;
    let id = order.id;
    let total = money(order.total_amount);
    info!(order_id = %id, customer = %order.customer_name, %total, "order created");
    orders.push(order);
    ctx.store.save_orders(&orders)?;
    println!("Created order {id}: total {total}");
    Ok(id)
}

/// Print orders passing `filter` with their payment position.
///
/// # Errors
///
/// Returns an error if orders or income cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context, filter: &OrderFilter) -> Result<(), CommandError> {
    let orders = ctx.store.load_orders()?;
    let incomes = ctx.store.load_income()?;

    for order in filter.apply(&orders) {
        let payment = payment_for(order, &incomes);
        println!(
            "{}  {}  {:<20} {:<10} {:>9} {:>10}  {:<9} {} paid {}",
            order.id,
            order.delivery_date,
            order.customer_name,
            order.variant.to_string(),
            kilograms(order.total_weight_grams),
            money(order.total_amount),
            order.status.to_string(),
            payment.status,
            money(payment.paid),
        );
    }
    Ok(())
}

fn find_mut(orders: &mut [Order], id: OrderId) -> Result<&mut Order, CommandError> {
    orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| CommandError::not_found("order", id))
}

/// Flip an order between pending and completed.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a storage error.
pub fn toggle(ctx: &Context, id: OrderId) -> Result<(), CommandError> {
    let mut orders = ctx.store.load_orders()?;
    let order = find_mut(&mut orders, id)?;
    order.toggle_status();
    info!(order_id = %id, status = %order.status, "order status changed");
    ctx.store.save_orders(&orders)?;
    Ok(())
}

/// Delete an order. Income linked to it is kept.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a storage error.
pub fn delete(ctx: &Context, id: OrderId) -> Result<(), CommandError> {
    let mut orders = ctx.store.load_orders()?;
    let before = orders.len();
    orders.retain(|o| o.id != id);
    if orders.len() == before {
        return Err(CommandError::not_found("order", id));
    }
    ctx.store.save_orders(&orders)?;
    info!(order_id = %id, "order deleted");
    Ok(())
}

/// Print the estimated production cost and margin of an order.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a storage error.
#[allow(clippy::print_stdout)]
pub fn margin(ctx: &Context, id: OrderId) -> Result<(), CommandError> {
    let orders = ctx.store.load_orders()?;
    let order = orders
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| CommandError::not_found("order", id))?;
    let materials = load_materials(&ctx.store);
    let margin = margin_for(order, &ctx.profile, &materials);

    println!("Order {} for {}", order.id, order.customer_name);
    println!("  Revenue:       {:>10}", money(margin.revenue));
    for (key, cost) in &margin.cost.materials {
        println!("  {:<14} {:>10}", format!("{key:?}:"), money(*cost));
    }
    println!("  Gas:           {:>10}", money(margin.cost.gas));
    println!("  Total cost:    {:>10}", money(margin.cost.total));
    println!("  Gross profit:  {:>10}", money(margin.gross_profit));
    println!("  Margin:        {:>10}", percent(margin.margin_percent));
    Ok(())
}
