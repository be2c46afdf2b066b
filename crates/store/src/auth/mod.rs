//! Account and session store.
//!
//! Holds the registered user list and the current session. The session is a
//! [`SessionUser`], a password-stripped copy of the account, persisted under
//! its own key so the password never leaves the user list blob.
//!
//! Passwords are stored and compared in plain text; this mirrors the demo's
//! persisted format and must not be reused for real accounts.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use rand::distr::{Alphanumeric, SampleString};
use tracing::{info, warn};

use farm2door_core::{AddressId, Email, Role, UserId};

use crate::models::{Address, AddressFields, ProfileUpdate, SessionUser, SignupRequest, User};
use crate::seed;
use crate::storage::{self, Storage, StorageError, keys};

/// Length of the random part of a reset password.
const RESET_PASSWORD_LEN: usize = 6;

/// The account and session store.
pub struct AuthStore {
    users: Vec<User>,
    session: Option<SessionUser>,
    storage: Arc<dyn Storage>,
}

impl AuthStore {
    /// Load users and the current session from storage.
    ///
    /// A missing, empty, or corrupt user list is replaced with one containing
    /// only the default admin account. A corrupt session blob is discarded,
    /// as is a session pointing at a user that no longer exists.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let users = match storage::load_json::<Vec<User>>(storage.as_ref(), keys::USERS) {
            Ok(Some(users)) if !users.is_empty() => users,
            Ok(_) => vec![seed::default_admin()],
            Err(e) => {
                warn!(error = %e, "Discarding unreadable user blob, reseeding default admin");
                vec![seed::default_admin()]
            }
        };
        let session = match storage::load_json::<SessionUser>(storage.as_ref(), keys::SESSION) {
            Ok(session) => session.filter(|s| users.iter().any(|u| u.id == s.id)),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session blob");
                None
            }
        };
        Self {
            users,
            session,
            storage,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    /// Whether the signed-in user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.role.is_admin())
    }

    /// All registered accounts with passwords stripped.
    #[must_use]
    pub fn list_users(&self) -> Vec<SessionUser> {
        self.users.iter().map(SessionUser::from).collect()
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the name or password is empty,
    /// [`AuthError::InvalidEmail`] if the email does not parse, and
    /// [`AuthError::EmailTaken`] if another account already uses the email
    /// (compared case-insensitively).
    pub fn signup(&mut self, request: SignupRequest) -> Result<SessionUser, AuthError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("name is required".to_owned()));
        }
        if request.password.is_empty() {
            return Err(AuthError::Validation("password is required".to_owned()));
        }
        let email = Email::parse(&request.email)?;
        if self.users.iter().any(|u| u.email.matches(&email)) {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: UserId::generate(),
            name: name.to_owned(),
            email,
            password: request.password,
            role: Role::User,
            phone: request.phone,
            avatar: request.avatar,
            addresses: Vec::new(),
        };
        let session = SessionUser::from(&user);
        self.users.push(user);
        self.persist_users()?;
        self.set_session(session.clone())?;
        info!(user = %session.id, "Account created");
        Ok(session)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for an unknown email and
    /// [`AuthError::InvalidCredentials`] for a wrong password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let user = self
            .users
            .iter()
            .find(|u| u.email.matches_str(email))
            .ok_or(AuthError::UserNotFound)?;
        if user.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        let session = SessionUser::from(user);
        self.set_session(session.clone())?;
        Ok(session)
    }

    /// Sign out. A no-op when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if clearing the persisted session fails.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.session = None;
        self.storage.remove(keys::SESSION)
    }

    /// Update name, phone, or avatar of the signed-in user. `None` fields are
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when nobody is signed in and
    /// [`AuthError::Validation`] when a new name is empty.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<SessionUser, AuthError> {
        if let Some(name) = &update.name
            && name.trim().is_empty()
        {
            return Err(AuthError::Validation("name is required".to_owned()));
        }
        let user = self.session_user_mut()?;
        if let Some(name) = update.name {
            user.name = name.trim().to_owned();
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }
        self.sync_session()
    }

    /// Add a shipping address to the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when nobody is signed in.
    pub fn add_address(&mut self, fields: AddressFields) -> Result<Address, AuthError> {
        let user = self.session_user_mut()?;
        let address = fields.into_address(AddressId::generate());
        user.addresses.push(address.clone());
        self.sync_session()?;
        Ok(address)
    }

    /// Replace the fields of an existing address. An unknown address ID is a
    /// no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when nobody is signed in.
    pub fn edit_address(
        &mut self,
        id: &AddressId,
        fields: AddressFields,
    ) -> Result<bool, AuthError> {
        let user = self.session_user_mut()?;
        let Some(address) = user.addresses.iter_mut().find(|a| &a.id == id) else {
            return Ok(false);
        };
        fields.apply_to(address);
        self.sync_session()?;
        Ok(true)
    }

    /// Remove an address from the signed-in user. An unknown address ID is a
    /// no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when nobody is signed in.
    pub fn remove_address(&mut self, id: &AddressId) -> Result<bool, AuthError> {
        let user = self.session_user_mut()?;
        let before = user.addresses.len();
        user.addresses.retain(|a| &a.id != id);
        if user.addresses.len() == before {
            return Ok(false);
        }
        self.sync_session()?;
        Ok(true)
    }

    /// Overwrite the password of the account matching `email` with a fresh
    /// random one and return the new password in plain text.
    ///
    /// The caller is expected to show it to the user once; nothing else
    /// retains it outside the user list blob.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for an unknown email.
    pub fn reset_password(&mut self, email: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.email.matches_str(email))
            .ok_or(AuthError::UserNotFound)?;
        let suffix = Alphanumeric.sample_string(&mut rand::rng(), RESET_PASSWORD_LEN);
        let password = format!("pw{suffix}");
        user.password.clone_from(&password);
        let id = user.id.clone();
        self.persist_users()?;
        info!(user = %id, "Password reset");
        Ok(password)
    }

    /// Delete an account. If the deleted account is signed in, the session is
    /// cleared as well. An unknown ID is a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails.
    pub fn delete_user(&mut self, id: &UserId) -> Result<bool, StorageError> {
        let before = self.users.len();
        self.users.retain(|u| &u.id != id);
        if self.users.len() == before {
            return Ok(false);
        }
        self.persist_users()?;
        if self.session.as_ref().is_some_and(|s| &s.id == id) {
            self.session = None;
            self.storage.remove(keys::SESSION)?;
        }
        Ok(true)
    }

    fn session_user_mut(&mut self) -> Result<&mut User, AuthError> {
        let id = self
            .session
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or(AuthError::NotAuthenticated)?;
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AuthError::UserNotFound)
    }

    /// Persist the user list and refresh the session copy from the user
    /// record it points at.
    fn sync_session(&mut self) -> Result<SessionUser, AuthError> {
        self.persist_users()?;
        let id = self
            .session
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or(AuthError::NotAuthenticated)?;
        let user = self
            .users
            .iter()
            .find(|u| u.id == id)
            .ok_or(AuthError::UserNotFound)?;
        let session = SessionUser::from(user);
        self.set_session(session.clone())?;
        Ok(session)
    }

    fn set_session(&mut self, session: SessionUser) -> Result<(), StorageError> {
        storage::store_json(self.storage.as_ref(), keys::SESSION, &session)?;
        self.session = Some(session);
        Ok(())
    }

    fn persist_users(&self) -> Result<(), StorageError> {
        storage::store_json(self.storage.as_ref(), keys::USERS, &self.users)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> AuthStore {
        AuthStore::load(Arc::new(MemoryStorage::new()))
    }

    fn request(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Alice".to_owned(),
            email: email.to_owned(),
            password: "hunter2".to_owned(),
            phone: String::new(),
            avatar: None,
        }
    }

    #[test]
    fn test_seeds_default_admin() {
        let auth = store();
        let users = auth.list_users();
        assert_eq!(users.len(), 1);
        assert!(users[0].role.is_admin());
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_signup_signs_in_and_strips_password() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut auth = AuthStore::load(Arc::clone(&storage));
        let session = auth.signup(request("alice@example.com")).unwrap();
        assert_eq!(session.name, "Alice");
        assert_eq!(auth.current_user().unwrap().id, session.id);

        let raw = storage.get(keys::SESSION).unwrap().unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(!raw.contains("password"));
    }

    #[test]
    fn test_signup_rejects_duplicate_email_case_insensitively() {
        let mut auth = store();
        auth.signup(request("alice@example.com")).unwrap();
        let err = auth.signup(request("ALICE@Example.COM")).unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[test]
    fn test_signup_validates_fields() {
        let mut auth = store();
        let mut blank_name = request("a@b.c");
        blank_name.name = "  ".to_owned();
        assert!(matches!(
            auth.signup(blank_name),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.signup(request("not-an-email")),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_login_and_logout() {
        let mut auth = store();
        auth.signup(request("alice@example.com")).unwrap();
        auth.logout().unwrap();
        assert!(auth.current_user().is_none());

        assert!(matches!(
            auth.login("alice@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody@example.com", "hunter2"),
            Err(AuthError::UserNotFound)
        ));
        let session = auth.login("Alice@Example.Com", "hunter2").unwrap();
        assert_eq!(session.name, "Alice");
    }

    #[test]
    fn test_default_admin_can_log_in() {
        let mut auth = store();
        let session = auth.login("admin@farm2door.local", "admin").unwrap();
        assert!(session.role.is_admin());
        assert!(auth.is_admin());
    }

    #[test]
    fn test_update_profile_partial() {
        let mut auth = store();
        auth.signup(request("alice@example.com")).unwrap();
        let session = auth
            .update_profile(ProfileUpdate {
                phone: Some("555-0100".to_owned()),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert_eq!(session.name, "Alice");
        assert_eq!(session.phone, "555-0100");
    }

    #[test]
    fn test_update_profile_requires_session() {
        let mut auth = store();
        assert!(matches!(
            auth.update_profile(ProfileUpdate::default()),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_address_lifecycle() {
        let mut auth = store();
        auth.signup(request("alice@example.com")).unwrap();
        let address = auth
            .add_address(AddressFields {
                label: "Home".to_owned(),
                line: "1 Farm Rd".to_owned(),
                city: "Springfield".to_owned(),
                zip: "12345".to_owned(),
                country: "US".to_owned(),
            })
            .unwrap();
        assert_eq!(auth.current_user().unwrap().addresses.len(), 1);

        let edited = auth
            .edit_address(
                &address.id,
                AddressFields {
                    label: "Work".to_owned(),
                    ..AddressFields::default()
                },
            )
            .unwrap();
        assert!(edited);
        let current = auth.current_user().unwrap().addresses.first().unwrap().clone();
        assert_eq!(current.label, "Work");
        assert_eq!(current.id, address.id);

        assert!(!auth.remove_address(&AddressId::new("a_ghost")).unwrap());
        assert!(auth.remove_address(&address.id).unwrap());
        assert!(auth.current_user().unwrap().addresses.is_empty());
    }

    #[test]
    fn test_reset_password_changes_login() {
        let mut auth = store();
        auth.signup(request("alice@example.com")).unwrap();
        auth.logout().unwrap();

        let password = auth.reset_password("alice@example.com").unwrap();
        assert!(password.starts_with("pw"));
        assert!(matches!(
            auth.login("alice@example.com", "hunter2"),
            Err(AuthError::InvalidCredentials)
        ));
        auth.login("alice@example.com", &password).unwrap();

        assert!(matches!(
            auth.reset_password("nobody@example.com"),
            Err(AuthError::UserNotFound)
        ));
    }

    #[test]
    fn test_delete_user_clears_own_session() {
        let mut auth = store();
        let session = auth.signup(request("alice@example.com")).unwrap();
        assert!(auth.delete_user(&session.id).unwrap());
        assert!(auth.current_user().is_none());
        assert_eq!(auth.list_users().len(), 1);
        assert!(!auth.delete_user(&session.id).unwrap());
    }

    #[test]
    fn test_session_for_deleted_user_is_dropped_on_load() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut auth = AuthStore::load(Arc::clone(&storage));
        let session = auth.signup(request("alice@example.com")).unwrap();

        // Simulate another process deleting the user without touching the
        // session blob.
        auth.users.retain(|u| u.id != session.id);
        auth.persist_users().unwrap();

        let reloaded = AuthStore::load(storage);
        assert!(reloaded.current_user().is_none());
    }

    #[test]
    fn test_reloads_users_from_storage() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut auth = AuthStore::load(Arc::clone(&storage));
        auth.signup(request("alice@example.com")).unwrap();

        let reloaded = AuthStore::load(storage);
        assert_eq!(reloaded.list_users().len(), 2);
        assert_eq!(reloaded.current_user().unwrap().name, "Alice");
    }
}
