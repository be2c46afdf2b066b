//! Domain types persisted by the stores.
//!
//! Field names and shapes match the persisted JSON blobs, so existing data
//! directories load unchanged.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::{Address, AddressFields, ProfileUpdate, SessionUser, SignupRequest, User};
