//! Account persistence contract and in-memory backend
//!
//! The auth core only ever talks to storage through the [`AccountStore`]
//! trait: existence checks and lookups by username/email/number, a `create`
//! that is atomic with respect to the unique-key constraints, and a `save`
//! for updates. The pre-check in `uniqueness` is best-effort; `create` is
//! the authority.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;

use super::types::Account;

/// Which unique identifier a duplicate-key rejection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Username,
    Email,
    Number,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Username => write!(f, "username"),
            IdentifierKind::Email => write!(f, "email"),
            IdentifierKind::Number => write!(f, "phone number"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} already taken")]
    Duplicate(IdentifierKind),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Read/write contract the auth core requires from persistence.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;
    async fn exists_by_number(&self, number: &str) -> Result<bool, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    async fn find_by_number(&self, number: &str) -> Result<Option<Account>, StoreError>;

    /// Conditional insert of a brand-new account. Must atomically reject the
    /// write with [`StoreError::Duplicate`] if any of username, email or
    /// number is already taken; this is what makes the write authoritative
    /// when the registration pre-check loses a race.
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Persist an account previously read from this store (session-status
    /// updates). Must reject a write that would violate the unique-key
    /// constraints on email or number.
    async fn save(&self, account: Account) -> Result<Account, StoreError>;
}

#[derive(Default)]
struct Indexes {
    accounts: HashMap<String, Account>,
    // secondary indexes: identifier -> username
    by_email: HashMap<String, String>,
    by_number: HashMap<String, String>,
}

/// In-memory [`AccountStore`] with true unique-key enforcement on write.
///
/// All three indexes are updated under a single write lock, so a `create` is
/// atomic: two racing inserts for the same identifier cannot both succeed.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Indexes>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.accounts.contains_key(username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.by_email.contains_key(email))
    }

    async fn exists_by_number(&self, number: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.by_number.contains_key(number))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.inner.read().await.accounts.get(username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email)
            .and_then(|u| inner.accounts.get(u))
            .cloned())
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_number
            .get(number)
            .and_then(|u| inner.accounts.get(u))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;

        // Rejection precedence mirrors the pre-check: username > email > number.
        if inner.accounts.contains_key(&account.username) {
            return Err(StoreError::Duplicate(IdentifierKind::Username));
        }
        if inner.by_email.contains_key(&account.email) {
            return Err(StoreError::Duplicate(IdentifierKind::Email));
        }
        if inner.by_number.contains_key(&account.number) {
            return Err(StoreError::Duplicate(IdentifierKind::Number));
        }

        inner
            .by_email
            .insert(account.email.clone(), account.username.clone());
        inner
            .by_number
            .insert(account.number.clone(), account.username.clone());
        inner
            .accounts
            .insert(account.username.clone(), account.clone());

        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;

        // Uniqueness checks exclude the record being updated itself.
        let same = |owner: &String| owner == &account.username;

        if let Some(owner) = inner.by_email.get(&account.email) {
            if !same(owner) {
                return Err(StoreError::Duplicate(IdentifierKind::Email));
            }
        }
        if let Some(owner) = inner.by_number.get(&account.number) {
            if !same(owner) {
                return Err(StoreError::Duplicate(IdentifierKind::Number));
            }
        }

        if let Some(previous) = inner.accounts.get(&account.username).cloned() {
            // Update path: drop stale secondary entries before re-indexing.
            inner.by_email.remove(&previous.email);
            inner.by_number.remove(&previous.number);
        }

        inner
            .by_email
            .insert(account.email.clone(), account.username.clone());
        inner
            .by_number
            .insert(account.number.clone(), account.username.clone());
        inner
            .accounts
            .insert(account.username.clone(), account.clone());

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::{Role, SessionStatus};

    fn account(username: &str, email: &str, number: &str) -> Account {
        Account {
            username: username.to_string(),
            email: email.to_string(),
            number: number.to_string(),
            name: "Test User".to_string(),
            recovery_email: None,
            profile_picture_url: None,
            password_hash: "$argon2id$stub".to_string(),
            session_status: SessionStatus::Inactive,
            role: Role::User,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn create_then_lookup_by_all_keys() {
        let store = MemoryAccountStore::new();
        store
            .create(account("alice1", "a@x.com", "1234567890"))
            .await
            .unwrap();

        assert!(store.exists_by_username("alice1").await.unwrap());
        assert!(store.exists_by_email("a@x.com").await.unwrap());
        assert!(store.exists_by_number("1234567890").await.unwrap());

        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.username, "alice1");
        let by_number = store.find_by_number("1234567890").await.unwrap().unwrap();
        assert_eq!(by_number.username, "alice1");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let store = MemoryAccountStore::new();
        store
            .create(account("alice1", "a@x.com", "1234567890"))
            .await
            .unwrap();

        let err = store
            .create(account("alice1", "b@x.com", "0987654321"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate(IdentifierKind::Username));

        // The losing write left no trace.
        assert!(!store.exists_by_email("b@x.com").await.unwrap());
        let kept = store.find_by_username("alice1").await.unwrap().unwrap();
        assert_eq!(kept.email, "a@x.com");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryAccountStore::new();
        store
            .create(account("alice1", "a@x.com", "1234567890"))
            .await
            .unwrap();

        let err = store
            .create(account("bobby1", "a@x.com", "0987654321"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate(IdentifierKind::Email));
        assert!(!store.exists_by_username("bobby1").await.unwrap());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_number() {
        let store = MemoryAccountStore::new();
        store
            .create(account("alice1", "a@x.com", "1234567890"))
            .await
            .unwrap();

        let err = store
            .create(account("bobby1", "b@x.com", "1234567890"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate(IdentifierKind::Number));
    }

    #[tokio::test]
    async fn update_same_username_keeps_indexes_consistent() {
        let store = MemoryAccountStore::new();
        store
            .create(account("alice1", "a@x.com", "1234567890"))
            .await
            .unwrap();

        let mut updated = account("alice1", "a@x.com", "1234567890");
        updated.session_status = SessionStatus::Active;
        store.save(updated).await.unwrap();

        let found = store.find_by_username("alice1").await.unwrap().unwrap();
        assert_eq!(found.session_status, SessionStatus::Active);
        // Still exactly one owner of the secondary keys.
        assert!(store.exists_by_email("a@x.com").await.unwrap());
        assert!(store.exists_by_number("1234567890").await.unwrap());
    }
}
