//! Farm2Door Core - Shared types library.
//!
//! This crate provides common types used across all Farm2Door components:
//! - `store` - Catalog, cart, wishlist, order and auth state stores
//! - `cli` - Command-line storefront driving the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no store
//! logic. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
