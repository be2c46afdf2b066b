//! Catalog store: the product list and its stock counters.
//!
//! On load the persisted list is merged with the built-in seed catalog:
//! missing seed products are prepended, missing or invalid stock values are
//! backfilled from the seed, seed images are normalized, and the result is
//! deduplicated by ID (first occurrence wins). Admin edits to other fields
//! survive the merge. The merged list is persisted immediately, which makes
//! loading idempotent: a second load with no mutations in between rewrites
//! a byte-identical blob.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use farm2door_core::{Price, ProductId};

use crate::cart::CartStore;
use crate::models::Product;
use crate::seed;
use crate::storage::{self, Storage, StorageError, keys};
use crate::wishlist::WishlistStore;

/// Errors from admin catalog mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The submitted product data is invalid; nothing was changed.
    #[error("invalid product: {0}")]
    Validation(String),

    /// The mutation was applied in memory but persisting it failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fields for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display title (required).
    pub title: String,
    /// Unit price (must be non-negative).
    pub price: Price,
    /// Category name.
    pub category: String,
    /// Image reference.
    pub image: String,
    /// Short description.
    pub description: String,
    /// Initial stock.
    pub stock: u32,
}

/// Partial product edit; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    /// New title.
    pub title: Option<String>,
    /// New unit price (must be non-negative).
    pub price: Option<Price>,
    /// New category.
    pub category: Option<String>,
    /// New image reference.
    pub image: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New stock count.
    pub stock: Option<u32>,
}

/// A persisted product as found in storage.
///
/// `stock` is kept loose here so blobs written before stock tracking existed
/// (or hand-edited to a negative value) still load; normalization happens in
/// the seed merge.
#[derive(Debug, Deserialize)]
struct PersistedProduct {
    id: ProductId,
    title: String,
    price: Price,
    category: String,
    image: String,
    description: String,
    #[serde(default)]
    stock: Option<i64>,
}

/// The product catalog, merged with the seed list on load.
pub struct CatalogStore {
    products: Vec<Product>,
    storage: Arc<dyn Storage>,
}

impl CatalogStore {
    /// Load the catalog from storage, merging in the seed list.
    ///
    /// A missing or corrupt blob falls back to the seed catalog rather than
    /// failing; the merged result is persisted before returning.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if persisting the merged list fails.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        let persisted: Option<Vec<PersistedProduct>> =
            match storage::load_json(storage.as_ref(), keys::PRODUCTS) {
                Ok(found) => found,
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable product blob, reseeding catalog");
                    None
                }
            };

        let products = merge_with_seed(persisted);
        let store = Self { products, storage };
        store.persist()?;
        debug!(count = store.products.len(), "Catalog loaded");
        Ok(store)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// The filtered product view: case-insensitive substring match on title
    /// or category. An empty term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches_search(term))
            .collect()
    }

    /// Stock currently available for a product; 0 for unknown IDs.
    #[must_use]
    pub fn available_stock(&self, id: &ProductId) -> u32 {
        self.find(id).map_or(0, |p| p.stock)
    }

    /// Apply a signed delta to a product's stock, floored at zero.
    ///
    /// This is the single seam through which the cart reconciler touches
    /// catalog state. Unknown IDs are a no-op returning `None`; otherwise the
    /// new stock value is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the change fails; the in-memory
    /// stock is already updated in that case.
    pub fn adjust_stock(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<Option<u32>, StorageError> {
        let Some(product) = self.products.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };

        let adjusted = i64::from(product.stock).saturating_add(delta).max(0);
        product.stock = u32::try_from(adjusted).unwrap_or(u32::MAX);
        let new_stock = product.stock;
        debug!(product = %id, delta, new_stock, "Stock adjusted");

        self.persist()?;
        Ok(Some(new_stock))
    }

    /// Add a product with a freshly generated ID, prepending it to the list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for an empty title or negative
    /// price (nothing is changed), or [`CatalogError::Storage`] if the
    /// persist fails.
    pub fn add_product(&mut self, new: NewProduct) -> Result<Product, CatalogError> {
        if new.title.trim().is_empty() {
            return Err(CatalogError::Validation("title is required".to_owned()));
        }
        if new.price.is_negative() {
            return Err(CatalogError::Validation(
                "price must not be negative".to_owned(),
            ));
        }

        let product = Product {
            id: ProductId::generate(),
            title: new.title,
            price: new.price,
            category: new.category,
            image: new.image,
            description: new.description,
            stock: new.stock,
        };
        self.products.insert(0, product.clone());
        self.persist()?;
        debug!(product = %product.id, "Product added");
        Ok(product)
    }

    /// Merge the given fields into an existing product.
    ///
    /// Returns `false` (a no-op) if the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for a negative price, or
    /// [`CatalogError::Storage`] if the persist fails.
    pub fn edit_product(
        &mut self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<bool, CatalogError> {
        if update.price.is_some_and(|p| p.is_negative()) {
            return Err(CatalogError::Validation(
                "price must not be negative".to_owned(),
            ));
        }

        let Some(product) = self.products.iter_mut().find(|p| &p.id == id) else {
            return Ok(false);
        };

        if let Some(title) = update.title {
            product.title = title;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(image) = update.image {
            product.image = image;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }

        self.persist()?;
        debug!(product = %id, "Product edited");
        Ok(true)
    }

    /// Remove a product and cascade removal of any cart line or wishlist
    /// entry referencing it.
    ///
    /// The cascaded cart removal does not restore stock; the product is gone
    /// entirely. Returns `false` if the ID was unknown (the cascades still
    /// run, so dangling references get cleaned up either way).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting any of the three stores fails.
    pub fn delete_product(
        &mut self,
        id: &ProductId,
        cart: &mut CartStore,
        wishlist: &mut WishlistStore,
    ) -> Result<bool, StorageError> {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        let removed = self.products.len() != before;
        if removed {
            self.persist()?;
            debug!(product = %id, "Product deleted");
        }

        cart.remove_line_for_deleted_product(id)?;
        wishlist.remove(id)?;
        Ok(removed)
    }

    /// Replace the whole catalog with the built-in seed list.
    ///
    /// Admin-only recovery action.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the seed list fails.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.products = seed::catalog();
        self.persist()?;
        debug!("Catalog reset to seed");
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::store_json(self.storage.as_ref(), keys::PRODUCTS, &self.products)
    }
}

/// Merge a persisted product list with the seed catalog.
///
/// - absent blob: the seed catalog as-is
/// - stock absent or negative: backfilled from the seed (0 for non-seed ids)
/// - seed-id images normalized back to the seed reference
/// - seed products missing from the persisted list are prepended
/// - duplicates removed by ID, first occurrence kept
fn merge_with_seed(persisted: Option<Vec<PersistedProduct>>) -> Vec<Product> {
    let seed_products = seed::catalog();
    let seed_by_id: HashMap<&ProductId, &Product> =
        seed_products.iter().map(|p| (&p.id, p)).collect();

    let Some(persisted) = persisted else {
        return seed_products;
    };

    let mut merged: Vec<Product> = persisted
        .into_iter()
        .map(|p| {
            let sample = seed_by_id.get(&p.id);
            let stock = match p.stock {
                Some(s) if s >= 0 => u32::try_from(s).unwrap_or(u32::MAX),
                _ => sample.map_or(0, |s| s.stock),
            };
            let image = sample.map_or(p.image, |s| s.image.clone());
            Product {
                id: p.id,
                title: p.title,
                price: p.price,
                category: p.category,
                image,
                description: p.description,
                stock,
            }
        })
        .collect();

    let missing: Vec<Product> = seed_products
        .iter()
        .filter(|s| !merged.iter().any(|p| p.id == s.id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        debug!(count = missing.len(), "Restoring missing seed products");
        merged.splice(0..0, missing);
    }

    dedupe_by_id(merged)
}

/// Remove duplicate IDs, keeping the first occurrence.
fn dedupe_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = std::collections::HashSet::new();
    products
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn fresh() -> (Arc<MemoryStorage>, CatalogStore) {
        let storage = Arc::new(MemoryStorage::new());
        let catalog = CatalogStore::load(Arc::clone(&storage) as Arc<dyn Storage>).unwrap();
        (storage, catalog)
    }

    #[test]
    fn test_load_seeds_empty_storage() {
        let (_, catalog) = fresh();
        assert_eq!(catalog.products().len(), 20);
        assert_eq!(catalog.available_stock(&ProductId::new("f1")), 10);
    }

    #[test]
    fn test_load_falls_back_on_corrupt_blob() {
        let storage = Arc::new(MemoryStorage::new());
        storage.put(keys::PRODUCTS, "{definitely not json").unwrap();
        let catalog = CatalogStore::load(Arc::clone(&storage) as Arc<dyn Storage>).unwrap();
        assert_eq!(catalog.products().len(), 20);
    }

    #[test]
    fn test_load_backfills_missing_stock_from_seed() {
        let storage = Arc::new(MemoryStorage::new());
        // a seed product persisted without a stock field
        storage
            .put(
                keys::PRODUCTS,
                r#"[{"id":"g1","title":"Edited Gift Box","price":31.5,"category":"Gift","image":"/assets/Gift/gift1.jpg","description":"x"}]"#,
            )
            .unwrap();
        let catalog = CatalogStore::load(Arc::clone(&storage) as Arc<dyn Storage>).unwrap();

        let g1 = catalog.find(&ProductId::new("g1")).unwrap();
        assert_eq!(g1.stock, 10);
        // the admin edit to the title survives the merge
        assert_eq!(g1.title, "Edited Gift Box");
        // and the other 19 seed products come back
        assert_eq!(catalog.products().len(), 20);
    }

    #[test]
    fn test_load_deduplicates_keeping_first() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .put(
                keys::PRODUCTS,
                r#"[
                  {"id":"f1","title":"First","price":1.0,"category":"Fruits","image":"i","description":"d","stock":3},
                  {"id":"f1","title":"Second","price":2.0,"category":"Fruits","image":"i","description":"d","stock":7}
                ]"#,
            )
            .unwrap();
        let catalog = CatalogStore::load(Arc::clone(&storage) as Arc<dyn Storage>).unwrap();

        let f1 = catalog.find(&ProductId::new("f1")).unwrap();
        assert_eq!(f1.title, "First");
        assert_eq!(f1.stock, 3);
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        drop(CatalogStore::load(Arc::clone(&storage) as Arc<dyn Storage>).unwrap());
        let first = storage.get(keys::PRODUCTS).unwrap().unwrap();
        drop(CatalogStore::load(Arc::clone(&storage) as Arc<dyn Storage>).unwrap());
        let second = storage.get(keys::PRODUCTS).unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adjust_stock_floors_at_zero() {
        let (_, mut catalog) = fresh();
        let id = ProductId::new("b2");
        assert_eq!(catalog.adjust_stock(&id, -25).unwrap(), Some(0));
        assert_eq!(catalog.adjust_stock(&id, 4).unwrap(), Some(4));
        assert_eq!(catalog.adjust_stock(&ProductId::new("nope"), 5).unwrap(), None);
    }

    #[test]
    fn test_add_product_prepends_with_fresh_id() {
        let (_, mut catalog) = fresh();
        let added = catalog
            .add_product(NewProduct {
                title: "Honey Jar".to_owned(),
                price: Price::from_cents(650),
                category: "Gift".to_owned(),
                image: "/assets/honey.jpg".to_owned(),
                description: "Raw wildflower honey.".to_owned(),
                stock: 5,
            })
            .unwrap();

        assert!(added.id.as_str().starts_with('p'));
        assert_eq!(catalog.products().first().unwrap().id, added.id);
        assert_eq!(catalog.products().len(), 21);
    }

    #[test]
    fn test_add_product_rejects_invalid_input() {
        let (_, mut catalog) = fresh();
        let err = catalog
            .add_product(NewProduct {
                title: "  ".to_owned(),
                price: Price::from_cents(100),
                category: String::new(),
                image: String::new(),
                description: String::new(),
                stock: 0,
            })
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(catalog.products().len(), 20);
    }

    #[test]
    fn test_edit_product_merges_fields() {
        let (_, mut catalog) = fresh();
        let id = ProductId::new("e1");
        let changed = catalog
            .edit_product(
                &id,
                ProductUpdate {
                    price: Some(Price::from_cents(2599)),
                    ..ProductUpdate::default()
                },
            )
            .unwrap();
        assert!(changed);

        let e1 = catalog.find(&id).unwrap();
        assert_eq!(e1.price, Price::from_cents(2599));
        // untouched fields survive
        assert_eq!(e1.title, "Bluetooth Speaker");
    }

    #[test]
    fn test_edit_unknown_product_is_noop() {
        let (_, mut catalog) = fresh();
        let changed = catalog
            .edit_product(&ProductId::new("ghost"), ProductUpdate::default())
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_search_matches_title_and_category() {
        let (_, catalog) = fresh();
        assert_eq!(catalog.search("fruits").len(), 5);
        assert_eq!(catalog.search("SPEAKER").len(), 1);
        assert_eq!(catalog.search("").len(), 20);
        assert!(catalog.search("no-such-product").is_empty());
    }

    #[test]
    fn test_reset_restores_seed() {
        let (_, mut catalog) = fresh();
        catalog
            .edit_product(
                &ProductId::new("f1"),
                ProductUpdate {
                    stock: Some(0),
                    ..ProductUpdate::default()
                },
            )
            .unwrap();
        catalog.reset().unwrap();
        assert_eq!(catalog.available_stock(&ProductId::new("f1")), 10);
    }
}
