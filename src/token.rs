//! Session token issuance
//!
//! Builds and signs the bearer token carrying identity claims. Pure over its
//! inputs: the issuer never consults or mutates session state, and is called
//! only when the session has just transitioned (or will transition) to
//! ACTIVE.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::account::types::Role;
use crate::config::TokenConfig;
use crate::error::AuthError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub role: Role,
    /// Subject: the account's username.
    pub sub: String,
    pub email: String,
    pub number: String,
    pub iat: usize,
    pub exp: usize,
}

pub struct TokenIssuer {
    key: EncodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(&config.secret, config.ttl_secs)
    }

    /// Sign a token asserting the given identity claims (HS256).
    pub fn issue(
        &self,
        role: Role,
        username: &str,
        email: &str,
        number: &str,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            role,
            sub: username.to_string(),
            email: email.to_string(),
            number: number.to_string(),
            iat: now as usize,
            exp: (now + self.ttl_secs) as usize,
        };

        encode(&Header::default(), &claims, &self.key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))
    }
}
