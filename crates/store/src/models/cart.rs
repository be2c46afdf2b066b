//! Cart line domain type.

use serde::{Deserialize, Serialize};

use farm2door_core::{Price, ProductId};

use super::Product;

/// One product's pending purchase quantity.
///
/// The cart collection is keyed by `id` (the product ID); at most one line
/// exists per product. Title, price and image are snapshots taken when the
/// line was created, so a later admin price edit does not change what is
/// already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line consumes stock from.
    pub id: ProductId,
    /// Title snapshot at add time.
    pub title: String,
    /// Unit price snapshot at add time.
    pub price: Price,
    /// Image snapshot at add time.
    pub image: String,
    /// Pending purchase quantity. Always at least 1.
    pub qty: u32,
}

impl CartLine {
    /// Snapshot a catalog product into a new cart line.
    #[must_use]
    pub fn snapshot(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            qty,
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}
