//! Verify One-Time Token Use Case
//!
//! Redeems an email confirmation token or a magic-link code for a session.

use std::sync::Arc;

use platform::client::ClientFingerprint;

use crate::application::config::AuthConfig;
use crate::application::session::start_session;
use crate::domain::entity::one_time_token::OneTimeToken;
use crate::domain::repository::{AccountRepository, AuthSessionRepository, OneTimeTokenRepository};
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};

pub struct VerifyTokenUseCase<T, A, S>
where
    T: OneTimeTokenRepository,
    A: AccountRepository,
    S: AuthSessionRepository,
{
    token_repo: Arc<T>,
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<T, A, S> VerifyTokenUseCase<T, A, S>
where
    T: OneTimeTokenRepository,
    A: AccountRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        token_repo: Arc<T>,
        account_repo: Arc<A>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            token_repo,
            account_repo,
            session_repo,
            config,
        }
    }

    /// Consume `raw_token` and return a session token for its account
    pub async fn execute(
        &self,
        raw_token: &str,
        kind: TokenKind,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<String> {
        if raw_token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let token = self
            .token_repo
            .consume(&OneTimeToken::hash_raw(raw_token), kind)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let mut account = self
            .account_repo
            .find_by_id(token.account_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // Either kind of link proves control of the mailbox
        account.confirm_email();
        account.record_login();
        self.account_repo.update(&account).await?;

        let session_token = start_session(
            self.session_repo.as_ref(),
            &self.config,
            account.account_id,
            &fingerprint,
        )
        .await?;

        tracing::info!(
            account_id = %account.account_id,
            token_kind = %kind,
            "One-time token redeemed"
        );

        Ok(session_token)
    }
}
