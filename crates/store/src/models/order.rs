//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farm2door_core::{OrderId, Price, ProductId, UserId};

use super::CartLine;

/// A completed order.
///
/// Created only by checkout and immutable afterwards. The ledger keeps orders
/// most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, time-derived order ID.
    pub id: OrderId,
    /// The purchased items, in cart order.
    pub items: Vec<OrderItem>,
    /// Sum of price times quantity across all items.
    pub total: Price,
    /// The user who placed the order, if a session was active.
    pub user: Option<UserId>,
    /// When the order was placed.
    pub date: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }
}

/// One purchased item inside an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product that was purchased.
    pub id: ProductId,
    /// Title snapshot.
    pub title: String,
    /// Unit price snapshot.
    pub price: Price,
    /// Purchased quantity.
    pub qty: u32,
    /// Image snapshot.
    pub image: String,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            title: line.title.clone(),
            price: line.price,
            qty: line.qty,
            image: line.image.clone(),
        }
    }
}
