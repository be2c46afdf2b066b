//! Cart and checkout commands.

use farm2door_core::ProductId;

use super::{CliError, Context};

/// Add a product to the cart, reporting any stock clamp.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown ID.
pub fn add(ctx: &mut Context, id: &str, qty: u32) -> Result<(), CliError> {
    let id = ProductId::new(id);
    if ctx.catalog.find(&id).is_none() {
        return Err(CliError::ProductNotFound(id.to_string()));
    }

    let outcome = ctx.cart.add_to_cart(&mut ctx.catalog, &id, qty)?;
    if outcome.added == 0 {
        tracing::warn!("{id} is out of stock, nothing added");
    } else if outcome.was_clamped() {
        tracing::warn!(
            "Only {} of {} in stock; added {}",
            outcome.added,
            outcome.requested,
            outcome.added
        );
    } else {
        tracing::info!("Added {} x {id}", outcome.added);
    }
    Ok(())
}

/// Set the quantity of a cart line.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the product has no cart line.
pub fn update(ctx: &mut Context, id: &str, qty: u32) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let effective = ctx
        .cart
        .update_qty(&mut ctx.catalog, &id, qty)?
        .ok_or_else(|| CliError::NotInCart(id.to_string()))?;
    if effective != qty {
        tracing::warn!("Quantity clamped to {effective}");
    } else {
        tracing::info!("Quantity of {id} set to {effective}");
    }
    Ok(())
}

/// Remove a line from the cart, restoring its stock.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the product has no cart line.
pub fn remove(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    if !ctx.cart.remove(&mut ctx.catalog, &id)? {
        return Err(CliError::NotInCart(id.to_string()));
    }
    tracing::info!("Removed {id} from the cart");
    Ok(())
}

/// Print the cart contents and subtotal.
pub fn show(ctx: &Context) {
    if ctx.cart.is_empty() {
        tracing::info!("The cart is empty");
        return;
    }
    for line in ctx.cart.lines() {
        tracing::info!(
            "{:<14} {:<28} {} x {:>9} = {}",
            line.id,
            line.title,
            line.qty,
            line.price.to_string(),
            line.line_total()
        );
    }
    tracing::info!("Subtotal: {}", ctx.cart.subtotal());
}

/// Convert the cart into an order, attributed to the signed-in user if any.
///
/// # Errors
///
/// Returns [`CliError::Checkout`] if the cart is empty or persisting fails.
pub fn checkout(ctx: &mut Context) -> Result<(), CliError> {
    let user = ctx.auth.current_user().map(|s| s.id.clone());
    let order = ctx.cart.checkout(&mut ctx.orders, user.as_ref())?;
    tracing::info!(
        "Order {} placed: {} item(s), total {}",
        order.id,
        order.unit_count(),
        order.total
    );
    Ok(())
}
