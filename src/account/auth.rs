//! Password hashing and credential verification

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use super::store::{AccountStore, StoreError};
use super::types::{Account, LoginType};
use crate::error::AuthError;

/// Hash a password using Argon2id. Returns the PHC string (salt embedded).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
}

/// Verify a password against a stored digest. A mismatch is `Ok(false)`;
/// only an unreadable stored digest is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Internal(format!("stored digest unreadable: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Resolve a login identifier to its account and check the supplied password.
///
/// Returns the account unchanged; no state is mutated here. The error payload
/// deliberately says no more than "Invalid Password!" on a mismatch, so a
/// caller cannot tell which part of the check failed beyond the not-found
/// distinction.
pub async fn verify_credentials(
    store: &dyn AccountStore,
    login_type: LoginType,
    user: &str,
    password: &str,
) -> Result<Account, AuthError> {
    let found = match login_type {
        LoginType::Username => store.find_by_username(user).await,
        LoginType::Email => store.find_by_email(user).await,
        LoginType::Number => store.find_by_number(user).await,
    }
    .map_err(store_fault)?;

    let account = found.ok_or_else(|| {
        AuthError::NotFound(
            match login_type {
                LoginType::Username => "Username doesn't exist!",
                LoginType::Email => "Email doesn't exist!",
                LoginType::Number => "Number doesn't exist!",
            }
            .to_string(),
        )
    })?;

    if !verify_password(password, &account.password_hash)? {
        return Err(AuthError::Unauthorized("Invalid Password!".to_string()));
    }

    Ok(account)
}

fn store_fault(err: StoreError) -> AuthError {
    AuthError::Internal(err.to_string())
}
