//! Account and session-lifecycle module
//!
//! This module implements the authentication core:
//! - Syntactic username validation
//! - Concurrent identifier-uniqueness pre-checks
//! - Argon2id password hashing and credential verification
//! - The ACTIVE/INACTIVE session state machine
//! - Register / Login / Logout orchestration

pub mod auth;
pub mod service;
pub mod session;
pub mod store;
pub mod types;
pub mod uniqueness;
pub mod validate;

pub use service::AuthService;
pub use store::{AccountStore, IdentifierKind, MemoryAccountStore, StoreError};
pub use types::{
    Account, LoginRequest, LoginResponse, LoginType, RegistrationRequest, RegistrationType, Role,
    SessionStatus,
};
