//! Built-in seed data: the default catalog and the default admin account.
//!
//! The catalog store merges this list into whatever is persisted on every
//! load, so a trimmed or freshly created data directory always ends up with
//! the full default catalog. Admin edits to seeded products survive the
//! merge; only missing products and missing or invalid stock values are
//! filled back in.

use farm2door_core::{Email, Price, ProductId, Role, UserId};

use crate::models::{Product, User};

/// Default stock for every seeded product.
const SEED_STOCK: u32 = 10;

fn product(id: &str, title: &str, cents: i64, category: &str, image: &str, desc: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        price: Price::from_cents(cents),
        category: category.to_owned(),
        image: image.to_owned(),
        description: desc.to_owned(),
        stock: SEED_STOCK,
    }
}

/// The built-in product catalog.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        // Gift
        product(
            "g1",
            "Handmade Gift Box",
            2999,
            "Gift",
            "/assets/Gift/gift1.jpg",
            "Curated handmade items from local farms and artisans.",
        ),
        product(
            "g2",
            "Gourmet Chocolate Pack",
            1250,
            "Gift",
            "/assets/Gift/gift2.jpg",
            "Small-batch chocolate selection.",
        ),
        product(
            "g3",
            "Scented Candle Set",
            1999,
            "Gift",
            "/assets/Gift/gift3.jpg",
            "Farm-inspired fragrances for cozy evenings.",
        ),
        product(
            "g4",
            "Personalized Mug",
            899,
            "Gift",
            "/assets/Gift/gift4.jpg",
            "Custom printed ceramic mug.",
        ),
        product(
            "g5",
            "Flower Bouquet",
            2499,
            "Gift",
            "/assets/Gift/gift5.jpg",
            "Freshly picked seasonal flowers.",
        ),
        // Beauty
        product(
            "b1",
            "Organic Face Oil",
            1550,
            "Beauty",
            "/assets/Beauty/beauty1.jpg",
            "Natural oil blend for glowing skin.",
        ),
        product(
            "b2",
            "Herbal Body Lotion",
            999,
            "Beauty",
            "/assets/Beauty/beauty2.jpg",
            "Light, non-greasy lotion made from farm-grown herbs.",
        ),
        product(
            "b3",
            "Aloe Vera Gel",
            750,
            "Beauty",
            "/assets/Beauty/beauty3.jpg",
            "Soothing gel for skin hydration.",
        ),
        product(
            "b4",
            "Natural Lip Balm",
            399,
            "Beauty",
            "/assets/Beauty/beauty4.jpg",
            "Moisturizing balm with beeswax.",
        ),
        product(
            "b5",
            "Herbal Shampoo",
            1199,
            "Beauty",
            "/assets/Beauty/beauty5.jpg",
            "Gentle shampoo with farm herbs.",
        ),
        // Electronics
        product(
            "e1",
            "Bluetooth Speaker",
            2999,
            "Electronics",
            "/assets/Electronics/electronics1.jpg",
            "Portable speaker with deep bass.",
        ),
        product(
            "e2",
            "Wireless Earbuds",
            6999,
            "Electronics",
            "/assets/Electronics/electronics2.jpg",
            "Compact earbuds with great battery life.",
        ),
        product(
            "e3",
            "Power Bank 10000mAh",
            1999,
            "Electronics",
            "/assets/Electronics/electronics3.jpg",
            "Charge devices on the go.",
        ),
        product(
            "e4",
            "Smart LED Bulb",
            1499,
            "Electronics",
            "/assets/Electronics/electronics4.jpg",
            "Control lighting with your phone.",
        ),
        product(
            "e5",
            "Digital Thermometer",
            999,
            "Electronics",
            "/assets/Electronics/electronics5.jpg",
            "Accurate temperature readings.",
        ),
        // Fruits
        product(
            "f1",
            "Premium Apples (1kg)",
            499,
            "Fruits",
            "/assets/Fruits/fruits1.jpg",
            "Fresh crisp apples sourced locally.",
        ),
        product(
            "f2",
            "Banana Bunch",
            299,
            "Fruits",
            "/assets/Fruits/fruits2.jpg",
            "Ripe bananas, great for smoothies.",
        ),
        product(
            "f3",
            "Oranges (1kg)",
            399,
            "Fruits",
            "/assets/Fruits/fruits3.jpg",
            "Juicy and sweet oranges.",
        ),
        product(
            "f4",
            "Mangoes (1kg)",
            699,
            "Fruits",
            "/assets/Fruits/fruits4.jpg",
            "Seasonal ripe mangoes.",
        ),
        product(
            "f5",
            "Grapes (500g)",
            350,
            "Fruits",
            "/assets/Fruits/fruits5.jpg",
            "Seedless green grapes.",
        ),
    ]
}

/// The default admin account, seeded when no users are persisted.
#[must_use]
pub fn default_admin() -> User {
    User {
        id: UserId::new("u_admin"),
        name: "Admin".to_owned(),
        email: Email::parse("admin@farm2door.local").expect("seed admin email is valid"),
        password: "admin".to_owned(),
        role: Role::Admin,
        phone: String::new(),
        avatar: None,
        addresses: Vec::new(),
    }
}
