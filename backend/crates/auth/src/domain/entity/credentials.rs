//! Credentials Entity
//!
//! Password hash and login failure tracking, kept apart from `Account`
//! so the hash never travels with profile data.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_password::UserPassword;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub account_id: UserId,
    pub password_hash: UserPassword,
    /// Consecutive login failure count
    pub login_failed_count: u16,
    pub last_failed_at: Option<DateTime<Utc>>,
    /// Temporary lockout after too many failures
    pub locked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credentials {
    /// Maximum login failures before temporary lockout
    pub const MAX_LOGIN_FAILURES: u16 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 15;

    pub fn new(account_id: UserId, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            password_hash,
            login_failed_count: 0,
            last_failed_at: None,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked_until
            .is_some_and(|locked_until| Utc::now() < locked_until)
    }

    pub fn record_failure(&mut self) {
        let now = Utc::now();
        self.login_failed_count = self.login_failed_count.saturating_add(1);
        self.last_failed_at = Some(now);
        self.updated_at = now;

        if self.login_failed_count >= Self::MAX_LOGIN_FAILURES {
            self.locked_until = Some(now + chrono::Duration::minutes(Self::LOCKOUT_MINUTES));
        }
    }

    pub fn reset_failures(&mut self) {
        self.login_failed_count = 0;
        self.last_failed_at = None;
        self.locked_until = None;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn credentials() -> Credentials {
        let raw = RawPassword::new("hunter22".to_string()).unwrap();
        Credentials::new(UserId::new(), UserPassword::from_raw(&raw, None).unwrap())
    }

    #[test]
    fn test_locks_after_max_failures() {
        let mut credentials = credentials();
        for _ in 0..Credentials::MAX_LOGIN_FAILURES - 1 {
            credentials.record_failure();
        }
        assert!(!credentials.is_locked());

        credentials.record_failure();
        assert!(credentials.is_locked());

        credentials.reset_failures();
        assert!(!credentials.is_locked());
        assert_eq!(credentials.login_failed_count, 0);
    }
}
