//! Command implementations, one module per command group.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use farm2door_store::{
    AuthError, AuthStore, CartStore, CatalogError, CatalogStore, CheckoutError, JsonFileStorage,
    OrderLedger, Storage, StorageError, WishlistStore,
};

/// Errors surfaced to the user by any command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Persistence error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Account or session error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalog error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Checkout error.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// No product with the given ID.
    #[error("no product with ID {0}")]
    ProductNotFound(String),

    /// No cart line for the given product.
    #[error("product {0} is not in the cart")]
    NotInCart(String),

    /// No order with the given ID.
    #[error("no order with ID {0}")]
    OrderNotFound(String),

    /// The command needs an admin session.
    #[error("this command requires a signed-in admin (try `f2d account login`)")]
    AdminRequired,
}

/// All five stores, loaded from one data directory.
///
/// Every command loads a fresh context, applies its mutation, and exits; the
/// stores persist each transition as it happens.
pub struct Context {
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub orders: OrderLedger,
    pub auth: AuthStore,
}

impl Context {
    /// Open the data directory and load every store from it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Storage`] if the directory cannot be created or
    /// the catalog cannot be persisted after the seed merge.
    pub fn open(data_dir: &Path) -> Result<Self, CliError> {
        let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::open(data_dir)?);
        Ok(Self {
            catalog: CatalogStore::load(Arc::clone(&storage))?,
            cart: CartStore::load(Arc::clone(&storage)),
            wishlist: WishlistStore::load(Arc::clone(&storage)),
            orders: OrderLedger::load(Arc::clone(&storage)),
            auth: AuthStore::load(storage),
        })
    }

    /// Guard for admin-only commands.
    pub fn require_admin(&self) -> Result<(), CliError> {
        if self.auth.is_admin() {
            Ok(())
        } else {
            Err(CliError::AdminRequired)
        }
    }
}
