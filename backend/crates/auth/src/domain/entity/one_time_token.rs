//! One-Time Token Entity
//!
//! Email confirmation tokens and magic-link codes. Only the SHA-256 of
//! the raw token is persisted; the raw value exists in the emailed link.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::crypto::{random_token, sha256};

use crate::domain::value_object::token_kind::TokenKind;

#[derive(Debug, Clone)]
pub struct OneTimeToken {
    pub token_hash: Vec<u8>,
    pub account_id: UserId,
    pub kind: TokenKind,
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl OneTimeToken {
    /// Returns the raw token for the link and the record to store
    pub fn issue(account_id: UserId, kind: TokenKind, ttl: Duration) -> (String, Self) {
        let raw = random_token();
        let now = Utc::now();
        let token = Self {
            token_hash: Self::hash_raw(&raw),
            account_id,
            kind,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        };
        (raw, token)
    }

    pub fn hash_raw(raw: &str) -> Vec<u8> {
        sha256(raw.as_bytes()).to_vec()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_stores_only_hash() {
        let (raw, token) = OneTimeToken::issue(UserId::new(), TokenKind::Signup, Duration::hours(1));
        assert_eq!(raw.len(), 43);
        assert_ne!(token.token_hash, raw.as_bytes());
        assert_eq!(token.token_hash, OneTimeToken::hash_raw(&raw));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_tokens_are_unique() {
        let account_id = UserId::new();
        let (a, _) = OneTimeToken::issue(account_id, TokenKind::Code, Duration::hours(1));
        let (b, _) = OneTimeToken::issue(account_id, TokenKind::Code, Duration::hours(1));
        assert_ne!(a, b);
    }
}
