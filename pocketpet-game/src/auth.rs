//! Account boundary: local credential validation and the trait a backend
//! client implements. Auth failures never touch pet state.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::PASSWORD_MIN_LEN;

/// Opaque account identifier handed back by the backend; also the storage
/// key for the user's pet document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least {PASSWORD_MIN_LEN} characters with a symbol")]
    WeakPassword,
    #[error("email or password is incorrect")]
    WrongCredentials,
    #[error("account already exists for this email")]
    AlreadyRegistered,
    #[error("auth backend error: {0}")]
    Backend(String),
}

/// Minimal structural check matching the sign-up form: an `@` and a dot
/// somewhere in the address.
///
/// # Errors
///
/// Returns [`AuthError::InvalidEmail`] when the address fails the check.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

/// Minimum length plus at least one non-alphanumeric character.
///
/// # Errors
///
/// Returns [`AuthError::WeakPassword`] when the password fails either rule.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let long_enough = password.chars().count() >= PASSWORD_MIN_LEN;
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());
    if long_enough && has_symbol {
        Ok(())
    } else {
        Err(AuthError::WeakPassword)
    }
}

/// Validate both credential fields before any backend call.
///
/// # Errors
///
/// Returns the first failing check, email before password.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email)?;
    validate_password(password)
}

/// Backend auth client. Implementations are expected to run the local
/// validations through [`validate_credentials`] before hitting the wire.
pub trait AuthClient {
    /// # Errors
    ///
    /// Returns an [`AuthError`] when validation or the backend rejects the
    /// registration.
    fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// # Errors
    ///
    /// Returns an [`AuthError`] when validation fails or the credentials
    /// are wrong.
    fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    fn sign_out(&self);
}
