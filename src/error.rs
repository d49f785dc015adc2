use thiserror::Error;

/// Error taxonomy surfaced to the caller of the auth core.
///
/// `Client`, `NotFound` and `Unauthorized` are caller-fault outcomes carrying
/// the user-visible reason string. `Internal` covers failures of the opaque
/// capabilities themselves (hasher, signer, storage backend) and is never
/// used for a caller-fault case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Client(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn is_client(&self) -> bool {
        matches!(self, AuthError::Client(_))
    }
}
