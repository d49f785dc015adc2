//! Account type definitions for the auth core

use serde::{Deserialize, Serialize};

/// Persisted session flag, toggled only through the session state machine.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Inactive,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
}

/// Which identifier a login request carries.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginType {
    Username,
    Email,
    Number,
}

/// LOGIN activates the session and issues a token immediately on success;
/// DEFERRED creates the account INACTIVE with no token.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationType {
    Login,
    Deferred,
}

/// Main persisted identity record.
///
/// `username` is the primary key and immutable; `email` and `number` are
/// globally unique across all accounts. The password is stored only as an
/// Argon2id PHC string.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub number: String,

    pub name: String,
    pub recovery_email: Option<String>,
    pub profile_picture_url: Option<String>,

    pub password_hash: String,

    pub session_status: SessionStatus,
    pub role: Role,
    pub created_at: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub login_type: LoginType,
    /// Interpreted per `login_type`: username, email address, or phone number.
    pub user: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub number: String,
    pub name: String,
    pub recovery_email: Option<String>,
    pub profile_picture_url: Option<String>,
    pub password: String,
    pub registration_type: RegistrationType,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_wire_format_names() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"ROLE_USER\"");
        assert_eq!(
            serde_json::to_string(&LoginType::Number).unwrap(),
            "\"NUMBER\""
        );
        assert_eq!(
            serde_json::to_string(&RegistrationType::Deferred).unwrap(),
            "\"DEFERRED\""
        );
    }

    #[test]
    fn login_request_deserializes_from_wire() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"login_type":"EMAIL","user":"a@x.com","password":"pw"}"#)
                .unwrap();
        assert_eq!(request.login_type, LoginType::Email);
        assert_eq!(request.user, "a@x.com");
    }
}
