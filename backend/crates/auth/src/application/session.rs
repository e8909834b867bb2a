//! Session tokens
//!
//! The cookie carries `<session uuid>.<base64url HMAC-SHA256(uuid)>`; the
//! session row itself stays in the database.

use kernel::id::{SessionId, UserId};
use platform::client::ClientFingerprint;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Generate signed session token
pub fn issue_session_token(secret: &[u8; 32], session_id: SessionId) -> String {
    let session_id = session_id.to_string();
    let signature = hmac_sha256(secret, session_id.as_bytes());
    format!("{}.{}", session_id, to_base64url(&signature))
}

/// Parse and verify session token
pub fn parse_session_token(secret: &[u8; 32], token: &str) -> AuthResult<SessionId> {
    let (session_id, signature) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;
    let signature = from_base64url(signature).map_err(|_| AuthError::SessionInvalid)?;

    if !verify_hmac_sha256(secret, session_id.as_bytes(), &signature) {
        return Err(AuthError::SessionInvalid);
    }

    session_id
        .parse::<Uuid>()
        .map(SessionId::from_uuid)
        .map_err(|_| AuthError::SessionInvalid)
}

/// Persist a fresh session and return its cookie value
pub(crate) async fn start_session<S>(
    session_repo: &S,
    config: &AuthConfig,
    account_id: UserId,
    fingerprint: &ClientFingerprint,
) -> AuthResult<String>
where
    S: AuthSessionRepository,
{
    let session = AuthSession::new(account_id, fingerprint, config.session_ttl_chrono()?);
    session_repo.create(&session).await?;

    tracing::debug!(
        account_id = %account_id,
        session_id = %session.session_id,
        "Session started"
    );

    Ok(issue_session_token(&config.session_secret, session.session_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [42u8; 32];

    #[test]
    fn test_token_roundtrip() {
        let id = SessionId::new();
        let token = issue_session_token(&SECRET, id);
        assert_eq!(parse_session_token(&SECRET, &token).unwrap(), id);
    }

    #[test]
    fn test_rejects_tampered_or_foreign_tokens() {
        let id = SessionId::new();
        let token = issue_session_token(&SECRET, id);

        let other = SessionId::new();
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{other}.{signature}");
        assert!(matches!(
            parse_session_token(&SECRET, &forged),
            Err(AuthError::SessionInvalid)
        ));

        assert!(parse_session_token(&[1u8; 32], &token).is_err());
        assert!(parse_session_token(&SECRET, "no-dot").is_err());
        assert!(parse_session_token(&SECRET, "a.!!!").is_err());
    }
}
