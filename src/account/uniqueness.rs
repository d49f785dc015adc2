//! Concurrent availability pre-check for registration
//!
//! Fans out three independent existence queries against the store and joins
//! on all three before proceeding. This is an early-reject optimization: a
//! concurrent registration racing on the same identifier can pass the check
//! for both callers, and the store's conditional insert remains the
//! authority.

use super::store::AccountStore;
use crate::error::AuthError;

/// Require username, email and phone number to all be unused.
///
/// When more than one identifier is already taken, the reported rejection
/// follows a fixed precedence: username > email > phone number.
pub async fn check_available(
    store: &dyn AccountStore,
    username: &str,
    email: &str,
    number: &str,
) -> Result<(), AuthError> {
    let (by_username, by_email, by_number) = tokio::join!(
        store.exists_by_username(username),
        store.exists_by_email(email),
        store.exists_by_number(number),
    );

    let username_taken = by_username.map_err(|e| AuthError::Internal(e.to_string()))?;
    let email_taken = by_email.map_err(|e| AuthError::Internal(e.to_string()))?;
    let number_taken = by_number.map_err(|e| AuthError::Internal(e.to_string()))?;

    if username_taken {
        return Err(AuthError::Client("UserName Already Exist".to_string()));
    }
    if email_taken {
        return Err(AuthError::Client("Email Already Exist".to_string()));
    }
    if number_taken {
        return Err(AuthError::Client("Phone number Already Exist".to_string()));
    }

    Ok(())
}
