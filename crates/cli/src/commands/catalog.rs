//! Catalog browsing commands.

use farm2door_core::ProductId;
use farm2door_store::models::Product;

use super::{CliError, Context};

fn print_line(product: &Product) {
    tracing::info!(
        "{:<14} {:<28} {:>9}  {:<12} stock: {}",
        product.id,
        product.title,
        product.price.to_string(),
        product.category,
        product.stock
    );
}

/// List the catalog, optionally filtered by category and/or search term.
pub fn list(ctx: &Context, category: Option<&str>, search: Option<&str>) {
    let products: Vec<&Product> = match search {
        Some(term) => ctx.catalog.search(term),
        None => ctx.catalog.products().iter().collect(),
    };
    let mut shown = 0usize;
    for product in products {
        if category.is_some_and(|c| !product.category.eq_ignore_ascii_case(c)) {
            continue;
        }
        print_line(product);
        shown += 1;
    }
    tracing::info!("{shown} product(s)");
}

/// Show one product in full.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown ID.
pub fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let product = ctx
        .catalog
        .find(&id)
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?;
    tracing::info!("ID:          {}", product.id);
    tracing::info!("Title:       {}", product.title);
    tracing::info!("Price:       {}", product.price);
    tracing::info!("Category:    {}", product.category);
    tracing::info!("Image:       {}", product.image);
    tracing::info!("Stock:       {}", product.stock);
    tracing::info!("Description: {}", product.description);
    Ok(())
}
