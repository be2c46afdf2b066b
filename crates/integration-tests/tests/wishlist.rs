//! Wishlist behavior against the file backend.

#![allow(clippy::unwrap_used)]

use farm2door_core::ProductId;
use farm2door_integration_tests::TestHarness;

#[test]
fn test_wishlist_ignores_stock() {
    let harness = TestHarness::new();
    let mut catalog = harness.catalog();
    let mut cart = harness.cart();
    let mut wishlist = harness.wishlist();
    let id = ProductId::new("f1");

    // Drain the stock entirely, then wish for the product anyway.
    cart.add_to_cart(&mut catalog, &id, 10).unwrap();
    let product = catalog.find(&id).unwrap().clone();
    assert!(wishlist.add(&product).unwrap());
    assert!(wishlist.contains(&id));
}

#[test]
fn test_wishlist_survives_reload_and_stays_a_set() {
    let harness = TestHarness::new();
    let id = ProductId::new("g3");
    {
        let catalog = harness.catalog();
        let mut wishlist = harness.wishlist();
        let product = catalog.find(&id).unwrap().clone();
        wishlist.add(&product).unwrap();
    }

    let catalog = harness.catalog();
    let mut wishlist = harness.wishlist();
    let product = catalog.find(&id).unwrap().clone();
    assert!(!wishlist.add(&product).unwrap());
    assert_eq!(wishlist.entries().len(), 1);
}

#[test]
fn test_wishlist_entry_is_independent_of_later_edits() {
    let harness = TestHarness::new();
    let mut catalog = harness.catalog();
    let mut wishlist = harness.wishlist();
    let id = ProductId::new("g4");

    let product = catalog.find(&id).unwrap().clone();
    wishlist.add(&product).unwrap();
    catalog
        .edit_product(
            &id,
            farm2door_store::ProductUpdate {
                title: Some("Renamed Mug".to_owned()),
                ..farm2door_store::ProductUpdate::default()
            },
        )
        .unwrap();

    // The snapshot keeps the title it was added with.
    assert_eq!(wishlist.entries().first().unwrap().title, "Personalized Mug");
}
