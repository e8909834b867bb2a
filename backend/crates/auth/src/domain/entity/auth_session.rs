//! Auth Session Entity
//!
//! Server-side session referenced by the signed session cookie.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};
use platform::client::ClientFingerprint;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub account_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// SHA-256 of the User-Agent that signed in
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (for logging)
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// TTL comes from `AuthConfig`
    pub fn new(account_id: UserId, fingerprint: &ClientFingerprint, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            account_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint.hash_vec(),
            client_ip: fingerprint.ip_string(),
            user_agent: fingerprint.user_agent.clone(),
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Slide expiry to `now + ttl` once less than half of `ttl` remains.
    /// Returns whether the expiry moved.
    pub fn extend_if_needed(&mut self, ttl: Duration) -> bool {
        let now = Utc::now();

        if self.expires_at_ms < (now + (ttl / 2)).timestamp_millis() {
            self.expires_at_ms = (now + ttl).timestamp_millis();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint() -> ClientFingerprint {
        ClientFingerprint {
            hash: [7u8; 32],
            ip: Some("203.0.113.9".parse().unwrap()),
            user_agent: Some("Mozilla/5.0".to_string()),
        }
    }

    #[test]
    fn test_new_session_copies_fingerprint() {
        let session = AuthSession::new(UserId::new(), &fingerprint(), Duration::days(7));
        assert_eq!(session.client_fingerprint_hash, vec![7u8; 32]);
        assert_eq!(session.client_ip.as_deref(), Some("203.0.113.9"));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_extend_only_past_half_life() {
        let ttl = Duration::days(7);
        let mut session = AuthSession::new(UserId::new(), &fingerprint(), ttl);
        assert!(!session.extend_if_needed(ttl));

        session.expires_at_ms = (Utc::now() + Duration::days(1)).timestamp_millis();
        assert!(session.extend_if_needed(ttl));
        assert!(session.remaining_ms() > Duration::days(6).num_milliseconds());
    }

    #[test]
    fn test_expired_session() {
        let mut session = AuthSession::new(UserId::new(), &fingerprint(), Duration::days(7));
        session.expires_at_ms = Utc::now().timestamp_millis() - 1;
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }
}
