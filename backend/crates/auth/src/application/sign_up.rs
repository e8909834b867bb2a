//! Sign Up Use Case
//!
//! Creates a new account. The matching public profile is created by a
//! database trigger.

use std::sync::Arc;

use kernel::form::FieldErrors;
use platform::client::ClientFingerprint;

use crate::application::config::AuthConfig;
use crate::application::session::start_session;
use crate::domain::entity::{
    account::Account, credentials::Credentials, one_time_token::OneTimeToken,
};
use crate::domain::mailer::{Mailer, OutgoingEmail};
use crate::domain::repository::{AccountRepository, AuthSessionRepository, OneTimeTokenRepository};
use crate::domain::value_object::{
    email::Email,
    token_kind::TokenKind,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub const CONFIRMATION_SENT_MESSAGE: &str = "Check your email to confirm your account.";

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug)]
pub enum SignUpOutput {
    /// A confirmation link was handed to the mailer
    ConfirmationSent,
    /// Confirmation is disabled; the account is signed in right away
    SignedIn { session_token: String },
}

/// Sign up use case
pub struct SignUpUseCase<A, T, S, M>
where
    A: AccountRepository,
    T: OneTimeTokenRepository,
    S: AuthSessionRepository,
    M: Mailer,
{
    account_repo: Arc<A>,
    token_repo: Arc<T>,
    session_repo: Arc<S>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<A, T, S, M> SignUpUseCase<A, T, S, M>
where
    A: AccountRepository,
    T: OneTimeTokenRepository,
    S: AuthSessionRepository,
    M: Mailer,
{
    pub fn new(
        account_repo: Arc<A>,
        token_repo: Arc<T>,
        session_repo: Arc<S>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            token_repo,
            session_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignUpInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignUpOutput> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", Email::new(&input.email));
        let password = errors.check("password", RawPassword::new(input.password));
        let user_name = errors.check("username", UserName::new(&input.username));

        let (Some(email), Some(password), Some(user_name)) = (email, password, user_name) else {
            return Err(AuthError::Validation(errors));
        };

        if self.account_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = UserPassword::from_raw(&password, self.config.pepper())?;

        let mut account = Account::new(email, user_name);
        if !self.config.require_email_confirmation {
            account.confirm_email();
        }
        let credentials = Credentials::new(account.account_id, password_hash);

        // Unique keys still decide races between the check above and this insert
        self.account_repo.create(&account, &credentials).await?;

        tracing::info!(
            account_id = %account.account_id,
            user_name = %account.user_name,
            confirmed = account.is_confirmed(),
            "Account created"
        );

        if account.is_confirmed() {
            let session_token = start_session(
                self.session_repo.as_ref(),
                &self.config,
                account.account_id,
                &fingerprint,
            )
            .await?;
            return Ok(SignUpOutput::SignedIn { session_token });
        }

        let (raw_token, token) = OneTimeToken::issue(
            account.account_id,
            TokenKind::Signup,
            self.config.one_time_token_ttl_chrono()?,
        );
        self.token_repo.create(&token).await?;

        let link = self.config.absolute_url(&format!(
            "/api/auth/confirm?token_hash={raw_token}&type={}&next=/feed",
            TokenKind::Signup
        ));
        self.mailer
            .send(OutgoingEmail {
                to: account.email.clone(),
                subject: "Confirm your PromptVault account".to_string(),
                link,
            })
            .await?;

        Ok(SignUpOutput::ConfirmationSent)
    }
}
