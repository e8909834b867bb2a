//! Account Entity
//!
//! Identity of a registered user. The public profile row is created from
//! this by a database trigger and lives in the `vault` crate.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: UserId,
    pub email: Email,
    /// Unique handle, copied into `profiles.username`
    pub user_name: UserName,
    /// `None` until the confirmation link is followed
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: Email, user_name: UserName) -> Self {
        let now = Utc::now();
        Self {
            account_id: UserId::new(),
            email,
            user_name,
            email_confirmed_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    /// Idempotent; the first confirmation time is kept
    pub fn confirm_email(&mut self) {
        if self.email_confirmed_at.is_none() {
            let now = Utc::now();
            self.email_confirmed_at = Some(now);
            self.updated_at = now;
        }
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            Email::new("ada@example.com").unwrap(),
            UserName::new("ada").unwrap(),
        )
    }

    #[test]
    fn test_new_account_is_unconfirmed() {
        let account = account();
        assert!(!account.is_confirmed());
        assert!(account.last_login_at.is_none());
    }

    #[test]
    fn test_confirm_email_keeps_first_timestamp() {
        let mut account = account();
        account.confirm_email();
        let first = account.email_confirmed_at;
        account.confirm_email();
        assert_eq!(account.email_confirmed_at, first);
        assert!(account.is_confirmed());
    }
}
