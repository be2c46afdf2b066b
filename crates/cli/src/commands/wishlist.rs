//! Wishlist commands.

use farm2door_core::ProductId;

use super::{CliError, Context};

/// Add a product to the wishlist.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown ID.
pub fn add(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let product = ctx
        .catalog
        .find(&id)
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?
        .clone();
    if ctx.wishlist.add(&product)? {
        tracing::info!("Added {} to the wishlist", product.title);
    } else {
        tracing::info!("{} is already on the wishlist", product.title);
    }
    Ok(())
}

/// Remove a product from the wishlist.
///
/// # Errors
///
/// Returns [`CliError::Storage`] if persisting fails.
pub fn remove(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    if ctx.wishlist.remove(&id)? {
        tracing::info!("Removed {id} from the wishlist");
    } else {
        tracing::info!("{id} was not on the wishlist");
    }
    Ok(())
}

/// Print the wishlist.
pub fn show(ctx: &Context) {
    if ctx.wishlist.entries().is_empty() {
        tracing::info!("The wishlist is empty");
        return;
    }
    for product in ctx.wishlist.entries() {
        tracing::info!(
            "{:<14} {:<28} {:>9}  stock: {}",
            product.id,
            product.title,
            product.price.to_string(),
            ctx.catalog.available_stock(&product.id)
        );
    }
}
