//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are string-backed because the persisted storage format carries them as
//! strings (`"g1"`, `"u_admin"`, `"o1718040000000"`). Freshly generated IDs
//! are time-derived: a one-letter entity prefix followed by a millisecond
//! timestamp. The timestamp source is monotonic per process, so two entities
//! created within the same millisecond still get distinct IDs.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Last millisecond value handed out by [`next_timestamp`].
static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Returns a strictly increasing millisecond timestamp.
fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_TIMESTAMP.load(Ordering::Relaxed);
    loop {
        let candidate = if now > last { now } else { last + 1 };
        match LAST_TIMESTAMP.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
/// - `generate()` producing a fresh time-derived ID with the given prefix
///
/// # Example
///
/// ```rust
/// # use farm2door_core::define_id;
/// define_id!(UserId, "u");
/// define_id!(OrderId, "o");
///
/// let user_id = UserId::new("u_admin");
/// let order_id = OrderId::generate();
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh time-derived ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, $crate::types::id::next_id_timestamp()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Public shim so `define_id!` expansions can reach the monotonic clock.
#[doc(hidden)]
#[must_use]
pub fn next_id_timestamp() -> i64 {
    next_timestamp()
}

// Define standard entity IDs
define_id!(ProductId, "p");
define_id!(UserId, "u");
define_id!(OrderId, "o");
define_id!(AddressId, "a");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preserves_value() {
        let id = ProductId::new("g1");
        assert_eq!(id.as_str(), "g1");
        assert_eq!(id.to_string(), "g1");
    }

    #[test]
    fn test_generate_uses_prefix() {
        let id = OrderId::generate();
        assert!(id.as_str().starts_with('o'));
        let rest = &id.as_str()[1..];
        assert!(rest.parse::<i64>().is_ok());
    }

    #[test]
    fn test_generate_is_unique_within_a_millisecond() {
        let a = AddressId::generate();
        let b = AddressId::generate();
        let c = AddressId::generate();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new("u_admin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"u_admin\"");

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_str_conversions() {
        let id: ProductId = "f3".into();
        assert_eq!(id, ProductId::new("f3"));
        let s: String = id.into();
        assert_eq!(s, "f3");
    }
}
