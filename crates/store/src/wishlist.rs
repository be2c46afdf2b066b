//! Wishlist store: set-semantics product snapshots.

use std::sync::Arc;

use tracing::warn;

use farm2door_core::ProductId;

use crate::models::Product;
use crate::storage::{self, Storage, StorageError, keys};

/// The wishlist: full product snapshots, at most one entry per product ID.
///
/// Entirely independent of stock - wishing for an exhausted product is fine.
pub struct WishlistStore {
    entries: Vec<Product>,
    storage: Arc<dyn Storage>,
}

impl WishlistStore {
    /// Load the wishlist from storage. A missing or corrupt blob yields an
    /// empty wishlist.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let entries = match storage::load_json(storage.as_ref(), keys::WISHLIST) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable wishlist blob");
                Vec::new()
            }
        };
        Self { entries, storage }
    }

    /// All wishlist entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Whether a product is on the wishlist.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == id)
    }

    /// Add a product snapshot. A duplicate ID is a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails.
    pub fn add(&mut self, product: &Product) -> Result<bool, StorageError> {
        if self.contains(&product.id) {
            return Ok(false);
        }
        self.entries.push(product.clone());
        self.persist()?;
        Ok(true)
    }

    /// Remove an entry by product ID. An absent ID is a no-op returning
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails.
    pub fn remove(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        let before = self.entries.len();
        self.entries.retain(|p| &p.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::store_json(self.storage.as_ref(), keys::WISHLIST, &self.entries)
    }
}
