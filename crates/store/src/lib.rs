//! Farm2Door Store - the client-side state layer.
//!
//! Five stores hold all mutable application state, each persisting its full
//! contents to durable key-value storage on every mutation:
//!
//! - [`catalog::CatalogStore`] - the product list, merged with a built-in
//!   seed catalog on startup; owns every product's stock counter
//! - [`cart::CartStore`] - cart line items; the stock reconciler that keeps
//!   `stock + quantity in cart == initial stock` for every product
//! - [`wishlist::WishlistStore`] - set-semantics product snapshots
//! - [`orders::OrderLedger`] - append-only record of completed orders
//! - [`auth::AuthStore`] - user accounts, addresses, and the single session
//!
//! Stores never reach into each other's state. Cross-store effects are
//! explicit collaborator calls: cart operations take `&mut CatalogStore` and
//! adjust stock through [`catalog::CatalogStore::adjust_stock`]; checkout
//! takes `&mut OrderLedger`; catalog deletion takes the cart and wishlist so
//! it can drop dangling references.
//!
//! Everything is synchronous. Each mutation runs to completion, including its
//! persistence write, before the next one starts. A failed write leaves the
//! in-memory transition applied and is reported to the caller as a non-fatal
//! [`storage::StorageError`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod models;
pub mod orders;
pub mod seed;
pub mod storage;
pub mod wishlist;

pub use auth::{AuthError, AuthStore};
pub use cart::{AddOutcome, CartStore, CheckoutError};
pub use catalog::{CatalogError, CatalogStore, NewProduct, ProductUpdate};
pub use orders::OrderLedger;
pub use storage::{JsonFileStorage, MemoryStorage, Storage, StorageError};
pub use wishlist::WishlistStore;
