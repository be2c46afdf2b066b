//! User and address domain types.
//!
//! Passwords are stored and compared in plain text. That is a deliberate
//! property of the demo's persisted format, not an oversight; see the
//! security notes in DESIGN.md before reusing any of this for real accounts.

use serde::{Deserialize, Serialize};

use farm2door_core::{AddressId, Email, Role, UserId};

/// A registered user record as persisted in the user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique case-insensitively across all users.
    pub email: Email,
    /// Plaintext password (demo only).
    pub password: String,
    /// Account role.
    pub role: Role,
    /// Phone number, possibly empty.
    #[serde(default)]
    pub phone: String,
    /// Avatar image reference, if set.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Shipping addresses, owned by this user.
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// The session copy of a user: everything except the password.
///
/// Using a separate type guarantees the password field never reaches the
/// persisted session blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Account role.
    pub role: Role,
    /// Phone number, possibly empty.
    #[serde(default)]
    pub phone: String,
    /// Avatar image reference, if set.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Shipping addresses.
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            avatar: user.avatar.clone(),
            addresses: user.addresses.clone(),
        }
    }
}

/// A shipping address, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Unique address ID, generated when the address is added.
    pub id: AddressId,
    /// Short label, e.g. "Home".
    pub label: String,
    /// Street address line.
    pub line: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip: String,
    /// Country.
    pub country: String,
}

/// Address fields without an ID, for adding or editing.
///
/// IDs are generated by the store on add and never change on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    /// Short label, e.g. "Home".
    pub label: String,
    /// Street address line.
    pub line: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip: String,
    /// Country.
    pub country: String,
}

impl AddressFields {
    pub(crate) fn into_address(self, id: AddressId) -> Address {
        Address {
            id,
            label: self.label,
            line: self.line,
            city: self.city,
            zip: self.zip,
            country: self.country,
        }
    }

    pub(crate) fn apply_to(self, address: &mut Address) {
        address.label = self.label;
        address.line = self.line;
        address.city = self.city;
        address.zip = self.zip;
        address.country = self.country;
    }
}

/// Fields for registering a new account.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Display name (required).
    pub name: String,
    /// Email address (required, validated, unique case-insensitively).
    pub email: String,
    /// Password (required; stored in plain text - demo only).
    pub password: String,
    /// Phone number, optional.
    pub phone: String,
    /// Avatar image reference, optional.
    pub avatar: Option<String>,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New avatar image reference.
    pub avatar: Option<String>,
}
