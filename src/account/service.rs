//! Register / Login / Logout orchestration
//!
//! Each flow is all-or-nothing up to the first failing step: a rejection from
//! validation, the uniqueness pre-check or credential verification prevents
//! any save from occurring, and a save-time duplicate-key rejection from the
//! store is re-mapped into the same client-error taxonomy as the pre-check.

use std::sync::Arc;
use tracing::{info, warn};

use super::auth::{hash_password, verify_credentials};
use super::session;
use super::store::{AccountStore, IdentifierKind, StoreError};
use super::types::{
    Account, LoginRequest, LoginResponse, RegistrationRequest, RegistrationType, Role,
};
use super::uniqueness::check_available;
use super::validate::validate_username;
use crate::error::AuthError;
use crate::token::TokenIssuer;

pub struct AuthService {
    store: Arc<dyn AccountStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn AccountStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    /// Create a new account. With `RegistrationType::Login` the session
    /// starts ACTIVE and a token is issued; with `Deferred` the account is
    /// created INACTIVE and the response carries no token.
    pub async fn register(&self, request: RegistrationRequest) -> Result<LoginResponse, AuthError> {
        validate_username(&request.username)?;
        check_available(
            self.store.as_ref(),
            &request.username,
            &request.email,
            &request.number,
        )
        .await?;

        let password_hash = hash_password(&request.password)?;

        let account = Account {
            username: request.username,
            email: request.email,
            number: request.number,
            name: request.name,
            recovery_email: request.recovery_email,
            profile_picture_url: request.profile_picture_url,
            password_hash,
            session_status: session::initial_status(request.registration_type),
            role: Role::User,
            created_at: now_millis(),
        };

        // The conditional insert is the authority on uniqueness; the
        // pre-check above can lose a race, in which case the duplicate
        // surfaces here instead.
        let saved = self.store.create(account).await.map_err(map_store_error)?;

        let token = match request.registration_type {
            RegistrationType::Login => Some(self.tokens.issue(
                saved.role,
                &saved.username,
                &saved.email,
                &saved.number,
            )?),
            RegistrationType::Deferred => None,
        };

        info!(username = %saved.username, "account registered");
        Ok(LoginResponse { token })
    }

    /// Verify credentials, activate the session, persist, and issue a token.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let mut account = verify_credentials(
            self.store.as_ref(),
            request.login_type,
            &request.user,
            &request.password,
        )
        .await?;

        session::activate(&mut account);
        let saved = self.store.save(account).await.map_err(map_store_error)?;

        let token = self
            .tokens
            .issue(saved.role, &saved.username, &saved.email, &saved.number)?;

        info!(username = %saved.username, "session activated");
        Ok(LoginResponse { token: Some(token) })
    }

    /// Deactivate the account's session. Idempotent.
    pub async fn logout(&self, username: &str) -> Result<String, AuthError> {
        let mut account = self
            .store
            .find_by_username(username)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AuthError::NotFound("User not found!".to_string()))?;

        session::deactivate(&mut account);
        self.store.save(account).await.map_err(map_store_error)?;

        info!(username, "session deactivated");
        Ok("User logged out!".to_string())
    }
}

fn map_store_error(err: StoreError) -> AuthError {
    match err {
        StoreError::Duplicate(IdentifierKind::Username) => {
            AuthError::Client("UserName Already Exist".to_string())
        }
        StoreError::Duplicate(IdentifierKind::Email) => {
            AuthError::Client("Email Already Exist".to_string())
        }
        StoreError::Duplicate(IdentifierKind::Number) => {
            AuthError::Client("Phone number Already Exist".to_string())
        }
        StoreError::Backend(reason) => {
            warn!(%reason, "storage backend fault");
            AuthError::Internal(reason)
        }
    }
}

fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
