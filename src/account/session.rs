//! Session lifecycle state machine
//!
//! The only two states are ACTIVE and INACTIVE, and the persisted
//! `session_status` field is the sole record of "logged in"; there is no
//! in-process session registry. A transition only becomes durable once the
//! mutated account has been saved; an unsaved transition has no observable
//! effect.

use super::types::{Account, RegistrationType, SessionStatus};

/// INACTIVE or ACTIVE -> ACTIVE. Idempotent.
pub fn activate(account: &mut Account) {
    account.session_status = SessionStatus::Active;
}

/// ACTIVE or INACTIVE -> INACTIVE. Idempotent.
pub fn deactivate(account: &mut Account) {
    account.session_status = SessionStatus::Inactive;
}

/// Initial state for a freshly registered account.
pub fn initial_status(registration_type: RegistrationType) -> SessionStatus {
    match registration_type {
        RegistrationType::Login => SessionStatus::Active,
        RegistrationType::Deferred => SessionStatus::Inactive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::Role;

    fn account() -> Account {
        Account {
            username: "alice1".to_string(),
            email: "a@x.com".to_string(),
            number: "1234567890".to_string(),
            name: "Alice".to_string(),
            recovery_email: None,
            profile_picture_url: None,
            password_hash: "$argon2id$stub".to_string(),
            session_status: SessionStatus::Inactive,
            role: Role::User,
            created_at: 0,
        }
    }

    #[test]
    fn activate_and_deactivate_toggle() {
        let mut account = account();
        activate(&mut account);
        assert_eq!(account.session_status, SessionStatus::Active);
        deactivate(&mut account);
        assert_eq!(account.session_status, SessionStatus::Inactive);
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut account = account();
        activate(&mut account);
        activate(&mut account);
        assert_eq!(account.session_status, SessionStatus::Active);
        deactivate(&mut account);
        deactivate(&mut account);
        assert_eq!(account.session_status, SessionStatus::Inactive);
    }

    #[test]
    fn initial_status_follows_registration_type() {
        assert_eq!(initial_status(RegistrationType::Login), SessionStatus::Active);
        assert_eq!(
            initial_status(RegistrationType::Deferred),
            SessionStatus::Inactive
        );
    }
}
