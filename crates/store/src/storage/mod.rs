//! Durable key-value persistence for store state.
//!
//! The state layout is a handful of independent keyed JSON blobs (the
//! local-storage analog): one key per store, rewritten in full after every
//! mutation. Two backends are provided: [`JsonFileStorage`] keeps one
//! `<key>.json` file per key under a data directory, and [`MemoryStorage`]
//! holds everything in a map for tests and ephemeral runs.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for the persisted state blobs.
///
/// Key names are part of the persisted format; renaming one would orphan
/// the blobs in existing data directories.
pub mod keys {
    /// Ordered product list, including stock counters.
    pub const PRODUCTS: &str = "farm2door_products";
    /// Ordered cart line items.
    pub const CART: &str = "farm2door_cart";
    /// Ordered wishlist product snapshots.
    pub const WISHLIST: &str = "farm2door_wishlist";
    /// Ordered order records, most recent first.
    pub const ORDERS: &str = "farm2door_orders";
    /// Ordered user records (plaintext passwords - demo only).
    pub const USERS: &str = "farm2door_users";
    /// The current session user, password stripped. Absent when logged out.
    pub const SESSION: &str = "farm2door_user";
}

/// Errors that can occur reading or writing persisted state.
///
/// Storage errors are never fatal to a store: a failed write leaves the
/// in-memory state transition applied and is reported to the caller; a failed
/// or corrupt read makes the affected store fall back to its default state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying read or write failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted blob could not be serialized or deserialized.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable key-value storage for JSON blobs.
///
/// Implementations persist synchronously: when `put` returns, the value is
/// as durable as the backend can make it. Values are opaque strings; the
/// typed helpers [`load_json`] and [`store_json`] handle (de)serialization.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend read fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend write fails.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend delete fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and deserialize the JSON blob stored under `key`.
///
/// Returns `Ok(None)` if the key is absent.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the read fails and
/// [`StorageError::Serialization`] if the blob is not valid JSON for `T`.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if serialization fails and
/// [`StorageError::Io`] if the write fails.
pub fn store_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.put(key, &raw)
}
