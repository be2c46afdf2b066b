//! Cart store: the inventory-aware cart state machine.
//!
//! Every cart mutation adjusts catalog stock through an explicit collaborator
//! call, keeping the conservation invariant: for each product,
//! `catalog stock + quantity in cart == stock before anything was carted`.
//! Quantity math is clamped rather than rejected - stock never goes below 0,
//! a line quantity never goes below 1, and adding more than is available
//! silently caps at what is left. Callers that care about clamping inspect
//! the returned [`AddOutcome`]; no error is raised for it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use farm2door_core::{Price, ProductId, UserId};

use crate::catalog::CatalogStore;
use crate::models::{CartLine, Order, OrderItem};
use crate::orders::OrderLedger;
use crate::storage::{self, Storage, StorageError, keys};

/// Errors from checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout of an empty cart is rejected.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The order was recorded or the cart cleared in memory, but a persist
    /// failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The result of an add-to-cart operation.
///
/// Adding never fails: when stock runs short the quantity is clamped to what
/// is available (possibly zero). The outcome carries both numbers so the
/// caller can tell the user about the shortfall if it wants to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Quantity the caller asked for.
    pub requested: u32,
    /// Quantity actually added to the cart.
    pub added: u32,
}

impl AddOutcome {
    /// Whether the requested quantity was reduced (or zeroed) by stock.
    #[must_use]
    pub const fn was_clamped(&self) -> bool {
        self.added < self.requested
    }
}

/// The cart: at most one line per product, keyed by product ID.
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Load the cart from storage. A missing or corrupt blob yields an
    /// empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let lines = match storage::load_json(storage.as_ref(), keys::CART) {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cart blob");
                Vec::new()
            }
        };
        Self { lines, storage }
    }

    /// All cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Quantity of a product currently in the cart; 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, |l| l.qty)
    }

    /// Sum of price times quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add a product to the cart, consuming catalog stock.
    ///
    /// The quantity is clamped to the available stock; with none available
    /// (or an unknown product, or `qty == 0`) this is a no-op with
    /// `added == 0`. An existing line grows by the clamped quantity; stock is
    /// decremented by exactly that delta.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the cart or catalog fails; the
    /// in-memory transition is already applied.
    pub fn add_to_cart(
        &mut self,
        catalog: &mut CatalogStore,
        id: &ProductId,
        qty: u32,
    ) -> Result<AddOutcome, StorageError> {
        let available = catalog.available_stock(id);
        if available == 0 || qty == 0 {
            return Ok(AddOutcome {
                requested: qty,
                added: 0,
            });
        }

        let qty_to_add = qty.min(available);
        let Some(product) = catalog.find(id).cloned() else {
            // available > 0 implies the product exists; kept for safety
            return Ok(AddOutcome {
                requested: qty,
                added: 0,
            });
        };

        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) {
            line.qty += qty_to_add;
        } else {
            self.lines.push(CartLine::snapshot(&product, qty_to_add));
        }

        // Decrement by the delta actually added, never by the new total.
        catalog.adjust_stock(id, -i64::from(qty_to_add))?;
        self.persist()?;

        let outcome = AddOutcome {
            requested: qty,
            added: qty_to_add,
        };
        debug!(product = %id, requested = qty, added = qty_to_add, "Added to cart");
        Ok(outcome)
    }

    /// Set the quantity of an existing line, adjusting stock by the delta.
    ///
    /// The new quantity is clamped to a minimum of 1 - removing a line goes
    /// through [`Self::remove`], not through a zero quantity. Returns the
    /// effective quantity, or `None` (a no-op) if the line does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails.
    pub fn update_qty(
        &mut self,
        catalog: &mut CatalogStore,
        id: &ProductId,
        qty: u32,
    ) -> Result<Option<u32>, StorageError> {
        let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) else {
            return Ok(None);
        };

        let new_qty = qty.max(1);
        let delta = i64::from(new_qty) - i64::from(line.qty);
        line.qty = new_qty;

        // Stock moves opposite to the quantity change, floored at 0 by the
        // catalog even if outside interference has already drained it.
        catalog.adjust_stock(id, -delta)?;
        self.persist()?;
        debug!(product = %id, qty = new_qty, "Cart quantity updated");
        Ok(Some(new_qty))
    }

    /// Remove a line, restoring its full quantity to catalog stock.
    ///
    /// Returns `false` (a no-op) if no line exists for the product.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails.
    pub fn remove(
        &mut self,
        catalog: &mut CatalogStore,
        id: &ProductId,
    ) -> Result<bool, StorageError> {
        let Some(pos) = self.lines.iter().position(|l| &l.id == id) else {
            return Ok(false);
        };

        let line = self.lines.remove(pos);
        catalog.adjust_stock(id, i64::from(line.qty))?;
        self.persist()?;
        debug!(product = %id, restored = line.qty, "Removed from cart");
        Ok(true)
    }

    /// Convert the cart into an order and clear it.
    ///
    /// Stock is *not* restored: the decrements accumulated by add/update are
    /// now permanently consumed by the completed order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to check out,
    /// or [`CheckoutError::Storage`] if persisting the ledger or cart fails.
    pub fn checkout(
        &mut self,
        orders: &mut OrderLedger,
        user: Option<&UserId>,
    ) -> Result<Order, CheckoutError> {
        if self.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items: Vec<OrderItem> = self.lines.iter().map(OrderItem::from).collect();
        let total = self.subtotal();
        let order = orders.create(items, total, user.cloned())?;

        self.lines.clear();
        self.persist()?;
        info!(order = %order.id, total = %order.total, "Checked out");
        Ok(order)
    }

    /// Drop the line for a product that was deleted from the catalog.
    ///
    /// Unlike [`Self::remove`], no stock is restored - the product no longer
    /// exists.
    pub(crate) fn remove_line_for_deleted_product(
        &mut self,
        id: &ProductId,
    ) -> Result<bool, StorageError> {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        if self.lines.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::store_json(self.storage.as_ref(), keys::CART, &self.lines)
    }
}
