//! Integration tests for the Farm2Door state layer.
//!
//! Each test drives the stores end to end against a real JSON file backend in
//! a temporary directory, the same way the CLI does. The harness here wires
//! that up; the scenarios live under `tests/`.
//!
//! # Test Categories
//!
//! - `cart_stock` - Stock conservation across cart operations
//! - `checkout` - Cart to order transitions
//! - `catalog` - Seed merge, persistence, admin edits, delete cascades
//! - `accounts` - Signup, login, sessions, addresses
//! - `wishlist` - Wishlist set semantics and cascades

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tempfile::TempDir;

use farm2door_store::{
    AuthStore, CartStore, CatalogStore, JsonFileStorage, OrderLedger, Storage, WishlistStore,
};

/// A temporary data directory with accessors for every store.
///
/// Stores are loaded fresh on each accessor call, so tests can simulate
/// separate process invocations by loading twice.
pub struct TestHarness {
    storage: Arc<dyn Storage>,
    // Held so the directory outlives the harness.
    _dir: TempDir,
}

impl TestHarness {
    /// Create a harness over a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let storage = JsonFileStorage::open(dir.path()).expect("open storage");
        Self {
            storage: Arc::new(storage),
            _dir: dir,
        }
    }

    /// Load the catalog store (running the seed merge).
    ///
    /// # Panics
    ///
    /// Panics if the merged catalog cannot be persisted.
    #[must_use]
    pub fn catalog(&self) -> CatalogStore {
        CatalogStore::load(Arc::clone(&self.storage)).expect("load catalog")
    }

    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::load(Arc::clone(&self.storage))
    }

    #[must_use]
    pub fn wishlist(&self) -> WishlistStore {
        WishlistStore::load(Arc::clone(&self.storage))
    }

    #[must_use]
    pub fn orders(&self) -> OrderLedger {
        OrderLedger::load(Arc::clone(&self.storage))
    }

    #[must_use]
    pub fn auth(&self) -> AuthStore {
        AuthStore::load(Arc::clone(&self.storage))
    }

    /// Read the raw persisted JSON under a storage key.
    ///
    /// # Panics
    ///
    /// Panics if the read fails.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.storage.get(key).expect("read raw blob")
    }

    /// Overwrite the raw persisted value under a storage key, bypassing the
    /// stores. Used to simulate hand-edited or legacy blobs.
    ///
    /// # Panics
    ///
    /// Panics if the write fails.
    pub fn write_raw(&self, key: &str, value: &str) {
        self.storage.put(key, value).expect("write raw blob");
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
