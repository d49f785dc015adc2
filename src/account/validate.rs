//! Syntactic validation of candidate usernames

use crate::error::AuthError;

/// Accepts only 4-20 ASCII letters and digits. Pure, no side effects.
pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let ok = (4..=20).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric());

    if ok {
        Ok(())
    } else {
        Err(AuthError::Client(
            "Username must be 4-20 alphanumeric characters".to_string(),
        ))
    }
}
