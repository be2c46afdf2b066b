//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during account and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] farm2door_core::EmailError),

    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Another account already uses this email.
    #[error("email is already registered")]
    EmailTaken,

    /// No account matches the given email or ID.
    #[error("user not found")]
    UserNotFound,

    /// Wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The operation needs a signed-in user and there is none.
    #[error("not signed in")]
    NotAuthenticated,

    /// Persistence error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
