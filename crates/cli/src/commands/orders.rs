//! Order history commands.

use farm2door_core::OrderId;
use farm2door_store::models::Order;

use super::{CliError, Context};

fn print_summary(order: &Order) {
    let who = order
        .user
        .as_ref()
        .map_or_else(|| "guest".to_owned(), ToString::to_string);
    tracing::info!(
        "{:<16} {}  {} item(s)  total {}  ({who})",
        order.id,
        order.date.format("%Y-%m-%d %H:%M"),
        order.unit_count(),
        order.total
    );
}

/// List all orders, most recent first.
pub fn list(ctx: &Context) {
    if ctx.orders.orders().is_empty() {
        tracing::info!("No orders yet");
        return;
    }
    for order in ctx.orders.orders() {
        print_summary(order);
    }
}

/// Show one order with its line items.
///
/// # Errors
///
/// Returns [`CliError::OrderNotFound`] for an unknown ID.
pub fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id = OrderId::new(id);
    let order = ctx
        .orders
        .find(&id)
        .ok_or_else(|| CliError::OrderNotFound(id.to_string()))?;
    print_summary(order);
    for item in &order.items {
        tracing::info!(
            "  {:<14} {:<28} {} x {:>9}",
            item.id,
            item.title,
            item.qty,
            item.price.to_string()
        );
    }
    Ok(())
}
