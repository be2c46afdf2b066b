//! Seed merge, persistence, admin edits, and delete cascades.

#![allow(clippy::unwrap_used)]

use farm2door_core::{Price, ProductId};
use farm2door_integration_tests::TestHarness;
use farm2door_store::storage::keys;
use farm2door_store::{NewProduct, ProductUpdate};

#[test]
fn test_first_load_seeds_and_persists_the_catalog() {
    let harness = TestHarness::new();
    assert!(harness.raw(keys::PRODUCTS).is_none());

    let catalog = harness.catalog();
    assert_eq!(catalog.products().len(), 20);
    assert!(harness.raw(keys::PRODUCTS).is_some());
}

#[test]
fn test_corrupt_blob_falls_back_to_seed() {
    let harness = TestHarness::new();
    harness.write_raw(keys::PRODUCTS, "{not json");

    let catalog = harness.catalog();
    assert_eq!(catalog.products().len(), 20);
}

#[test]
fn test_merge_backfills_missing_and_negative_stock() {
    let harness = TestHarness::new();
    // A legacy blob: f1 has no stock field at all, f2 was hand-edited to a
    // negative count. Everything else is absent.
    harness.write_raw(
        keys::PRODUCTS,
        r#"[
            {"id":"f1","title":"Premium Apples (1kg)","price":4.99,
             "category":"Fruits","image":"x.jpg","description":"d"},
            {"id":"f2","title":"Banana Bunch","price":2.99,
             "category":"Fruits","image":"x.jpg","description":"d","stock":-3}
        ]"#,
    );

    let catalog = harness.catalog();
    assert_eq!(catalog.available_stock(&ProductId::new("f1")), 10);
    assert_eq!(catalog.available_stock(&ProductId::new("f2")), 10);
    // The missing seed products were prepended back in.
    assert_eq!(catalog.products().len(), 20);
}

#[test]
fn test_merge_keeps_admin_edits_to_seed_products() {
    let harness = TestHarness::new();
    let id = ProductId::new("f1");
    {
        let mut catalog = harness.catalog();
        catalog
            .edit_product(
                &id,
                ProductUpdate {
                    title: Some("Heirloom Apples (1kg)".to_owned()),
                    price: Some(Price::from_cents(599)),
                    ..ProductUpdate::default()
                },
            )
            .unwrap();
    }

    let catalog = harness.catalog();
    let product = catalog.find(&id).unwrap();
    assert_eq!(product.title, "Heirloom Apples (1kg)");
    assert_eq!(product.price, Price::from_cents(599));
}

#[test]
fn test_added_products_survive_the_merge() {
    let harness = TestHarness::new();
    let id = {
        let mut catalog = harness.catalog();
        catalog
            .add_product(NewProduct {
                title: "Honey Jar".to_owned(),
                price: Price::from_cents(850),
                category: "Gift".to_owned(),
                image: String::new(),
                description: "Raw wildflower honey.".to_owned(),
                stock: 5,
            })
            .unwrap()
            .id
    };

    let catalog = harness.catalog();
    assert_eq!(catalog.products().len(), 21);
    assert_eq!(catalog.available_stock(&id), 5);
}

#[test]
fn test_search_matches_title_and_category() {
    let harness = TestHarness::new();
    let catalog = harness.catalog();

    let by_title = catalog.search("apples");
    assert!(by_title.iter().any(|p| p.id.as_str() == "f1"));

    let by_category = catalog.search("fruit");
    assert_eq!(by_category.len(), 5);

    assert!(catalog.search("zzz-no-such-thing").is_empty());
}

#[test]
fn test_delete_cascades_to_cart_and_wishlist_without_stock_restore() {
    let harness = TestHarness::new();
    let mut catalog = harness.catalog();
    let mut cart = harness.cart();
    let mut wishlist = harness.wishlist();
    let id = ProductId::new("e1");

    let product = catalog.find(&id).unwrap().clone();
    wishlist.add(&product).unwrap();
    cart.add_to_cart(&mut catalog, &id, 4).unwrap();

    assert!(catalog.delete_product(&id, &mut cart, &mut wishlist).unwrap());
    assert!(catalog.find(&id).is_none());
    assert_eq!(cart.quantity_of(&id), 0);
    assert!(!wishlist.contains(&id));

    // The 4 units in the cart are gone with the product, not restored.
    // Deleting a *seeded* product only lasts until the next load: the seed
    // merge prepends it back with default stock.
    let reloaded = harness.catalog();
    assert_eq!(reloaded.available_stock(&id), 10);
}

#[test]
fn test_reset_restores_the_seed_catalog() {
    let harness = TestHarness::new();
    let mut catalog = harness.catalog();
    let mut cart = harness.cart();
    let mut wishlist = harness.wishlist();
    let id = ProductId::new("f1");

    cart.add_to_cart(&mut catalog, &id, 9).unwrap();
    catalog
        .add_product(NewProduct {
            title: "Honey Jar".to_owned(),
            price: Price::from_cents(850),
            category: "Gift".to_owned(),
            image: String::new(),
            description: String::new(),
            stock: 5,
        })
        .unwrap();
    catalog.delete_product(&ProductId::new("g5"), &mut cart, &mut wishlist).unwrap();

    catalog.reset().unwrap();
    assert_eq!(catalog.products().len(), 20);
    assert_eq!(catalog.available_stock(&id), 10);
    assert!(catalog.find(&ProductId::new("g5")).is_some());
}

#[test]
fn test_validation_rejects_bad_product_fields() {
    let harness = TestHarness::new();
    let mut catalog = harness.catalog();

    let empty_title = catalog.add_product(NewProduct {
        title: "   ".to_owned(),
        price: Price::from_cents(100),
        category: "Gift".to_owned(),
        image: String::new(),
        description: String::new(),
        stock: 1,
    });
    assert!(empty_title.is_err());

    let negative_price = catalog.edit_product(
        &ProductId::new("f1"),
        ProductUpdate {
            price: Some(Price::from_cents(-1)),
            ..ProductUpdate::default()
        },
    );
    assert!(negative_price.is_err());
}
