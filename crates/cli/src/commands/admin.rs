//! Admin commands. Every command here checks for an admin session first.

use farm2door_core::{ProductId, UserId};
use farm2door_store::{NewProduct, ProductUpdate};

use super::{CliError, Context};

/// Add a new product to the catalog.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session, or
/// [`CliError::Catalog`] for invalid fields.
pub fn add_product(ctx: &mut Context, new: NewProduct) -> Result<(), CliError> {
    ctx.require_admin()?;
    let product = ctx.catalog.add_product(new)?;
    tracing::info!("Product {} added: {}", product.id, product.title);
    Ok(())
}

/// Edit fields of an existing product.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session,
/// [`CliError::ProductNotFound`] for an unknown ID, or
/// [`CliError::Catalog`] for invalid fields.
pub fn edit_product(ctx: &mut Context, id: &str, update: ProductUpdate) -> Result<(), CliError> {
    ctx.require_admin()?;
    let id = ProductId::new(id);
    if !ctx.catalog.edit_product(&id, update)? {
        return Err(CliError::ProductNotFound(id.to_string()));
    }
    tracing::info!("Product {id} updated");
    Ok(())
}

/// Delete a product, cascading removal from carts and wishlists.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session or
/// [`CliError::ProductNotFound`] for an unknown ID.
pub fn delete_product(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    ctx.require_admin()?;
    let id = ProductId::new(id);
    let removed = ctx
        .catalog
        .delete_product(&id, &mut ctx.cart, &mut ctx.wishlist)?;
    if !removed {
        return Err(CliError::ProductNotFound(id.to_string()));
    }
    tracing::info!("Product {id} deleted");
    Ok(())
}

/// Replace the whole catalog with the built-in seed list.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session.
pub fn reset_catalog(ctx: &mut Context) -> Result<(), CliError> {
    ctx.require_admin()?;
    ctx.catalog.reset()?;
    tracing::info!("Catalog reset to the built-in seed list");
    Ok(())
}

/// List all registered accounts.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session.
pub fn list_users(ctx: &Context) -> Result<(), CliError> {
    ctx.require_admin()?;
    for user in ctx.auth.list_users() {
        tracing::info!("{:<16} {:<20} <{}> [{}]", user.id, user.name, user.email, user.role);
    }
    Ok(())
}

/// Delete an account.
///
/// # Errors
///
/// Returns [`CliError::AdminRequired`] without an admin session.
pub fn delete_user(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    ctx.require_admin()?;
    let id = UserId::new(id);
    if ctx.auth.delete_user(&id)? {
        tracing::info!("User {id} deleted");
    } else {
        tracing::warn!("No user with ID {id}");
    }
    Ok(())
}
