//! Order ledger: append-only record of completed orders.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use farm2door_core::{OrderId, Price, UserId};

use crate::models::{Order, OrderItem};
use crate::storage::{self, Storage, StorageError, keys};

/// The order ledger, most recent order first.
///
/// Orders are created by checkout and never mutated afterwards. No delete
/// operation is exposed.
pub struct OrderLedger {
    orders: Vec<Order>,
    storage: Arc<dyn Storage>,
}

impl OrderLedger {
    /// Load the ledger from storage. A missing or corrupt blob yields an
    /// empty ledger.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let orders = match storage::load_json(storage.as_ref(), keys::ORDERS) {
            Ok(Some(orders)) => orders,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable order blob");
                Vec::new()
            }
        };
        Self { orders, storage }
    }

    /// All orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders placed by a given user, most recent first.
    #[must_use]
    pub fn for_user(&self, user: &UserId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.user.as_ref() == Some(user))
            .collect()
    }

    /// Record a completed order with a fresh time-derived ID and the current
    /// timestamp, prepending it to the ledger.
    ///
    /// Called by cart checkout; the caller is responsible for clearing the
    /// cart in the same transition.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails; the order is already in
    /// the in-memory ledger in that case.
    pub fn create(
        &mut self,
        items: Vec<OrderItem>,
        total: Price,
        user: Option<UserId>,
    ) -> Result<Order, StorageError> {
        let order = Order {
            id: OrderId::generate(),
            items,
            total,
            user,
            date: Utc::now(),
        };
        self.orders.insert(0, order.clone());
        self.persist()?;
        debug!(order = %order.id, "Order recorded");
        Ok(order)
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::store_json(self.storage.as_ref(), keys::ORDERS, &self.orders)
    }
}
