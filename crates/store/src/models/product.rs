//! Product domain type.

use serde::{Deserialize, Serialize};

use farm2door_core::{Price, ProductId};

/// A catalog product.
///
/// Owned exclusively by the catalog store. Admin operations mutate any field;
/// the cart reconciler mutates only `stock`, through
/// [`crate::catalog::CatalogStore::adjust_stock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price (non-negative).
    pub price: Price,
    /// Category name, e.g. "Fruits".
    pub category: String,
    /// Image reference (asset path).
    pub image: String,
    /// Short description.
    pub description: String,
    /// Units currently available for purchase. Never negative.
    pub stock: u32,
}

impl Product {
    /// Whether any stock remains.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive substring match on title or category.
    ///
    /// This is the search predicate behind the filtered product view.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.category.to_lowercase().contains(&term)
    }
}
