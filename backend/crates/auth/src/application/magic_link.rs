//! Magic Link Use Case
//!
//! Emails a one-time sign-in code to a confirmed account. The caller sees
//! the same answer whether or not the address is registered.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;
use kernel::form::FieldErrors;
use platform::rate_limit::RateLimitStore;
use platform::redirect::safe_redirect_path;

use crate::application::config::AuthConfig;
use crate::domain::entity::one_time_token::OneTimeToken;
use crate::domain::mailer::{Mailer, OutgoingEmail};
use crate::domain::repository::{AccountRepository, OneTimeTokenRepository};
use crate::domain::value_object::{email::Email, token_kind::TokenKind};
use crate::error::{AuthError, AuthResult};

pub const MAGIC_LINK_SENT_MESSAGE: &str = "Check your email for a sign-in link.";

pub struct MagicLinkInput {
    pub email: String,
    pub next: Option<String>,
    pub client_ip: Option<IpAddr>,
}

pub struct MagicLinkUseCase<A, T, M, L>
where
    A: AccountRepository,
    T: OneTimeTokenRepository,
    M: Mailer,
    L: RateLimitStore,
{
    account_repo: Arc<A>,
    token_repo: Arc<T>,
    mailer: Arc<M>,
    rate_limits: Arc<L>,
    config: Arc<AuthConfig>,
}

impl<A, T, M, L> MagicLinkUseCase<A, T, M, L>
where
    A: AccountRepository,
    T: OneTimeTokenRepository,
    M: Mailer,
    L: RateLimitStore,
{
    pub fn new(
        account_repo: Arc<A>,
        token_repo: Arc<T>,
        mailer: Arc<M>,
        rate_limits: Arc<L>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            token_repo,
            mailer,
            rate_limits,
            config,
        }
    }

    pub async fn execute(&self, input: MagicLinkInput) -> AuthResult<()> {
        let client = input
            .client_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let limit = self
            .rate_limits
            .check_and_increment(
                &format!("magic_link:{client}"),
                &self.config.magic_link_rate_limit,
                Utc::now().timestamp_millis(),
            )
            .await;
        if !limit.allowed {
            return Err(AuthError::RateLimited);
        }

        let email = Email::new(&input.email)
            .map_err(|e| AuthError::Validation(FieldErrors::field("email", e.to_string())))?;

        let account = match self.account_repo.find_by_email(&email).await? {
            Some(account) if account.is_confirmed() => account,
            _ => {
                tracing::debug!("Magic link requested for unknown or unconfirmed address");
                return Ok(());
            }
        };

        let (raw_token, token) = OneTimeToken::issue(
            account.account_id,
            TokenKind::Code,
            self.config.one_time_token_ttl_chrono()?,
        );
        self.token_repo.create(&token).await?;

        let next: String = url::form_urlencoded::byte_serialize(
            safe_redirect_path(input.next.as_deref()).as_bytes(),
        )
        .collect();
        let link = self
            .config
            .absolute_url(&format!("/auth/callback?code={raw_token}&next={next}"));

        self.mailer
            .send(OutgoingEmail {
                to: account.email,
                subject: "Your PromptVault sign-in link".to_string(),
                link,
            })
            .await?;

        tracing::info!(account_id = %account.account_id, "Magic link issued");
        Ok(())
    }
}
