//! Sign In Use Case
//!
//! Authenticates an account with email and password and creates a session.

use std::sync::Arc;

use kernel::form::FieldErrors;

use crate::application::config::AuthConfig;
use crate::application::session::start_session;
use crate::domain::repository::{AccountRepository, AuthSessionRepository, CredentialsRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<A, C, S>
where
    A: AccountRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<A>,
    credentials_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, C, S> SignInUseCase<A, C, S>
where
    A: AccountRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        account_repo: Arc<A>,
        credentials_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            credentials_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", Email::new(&input.email));
        let password = errors.check("password", RawPassword::new(input.password));

        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Validation(errors));
        };

        let mut account = self
            .account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let mut credentials = self
            .credentials_repo
            .find_by_account_id(account.account_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        if credentials.is_locked() {
            return Err(AuthError::AccountLocked);
        }

        if !credentials
            .password_hash
            .verify(&password, self.config.pepper())
        {
            credentials.record_failure();
            self.credentials_repo.update(&credentials).await?;
            return Err(AuthError::InvalidCredentials);
        }

        // Checked after the password so unconfirmed addresses are not enumerable
        if !account.is_confirmed() {
            return Err(AuthError::EmailNotConfirmed);
        }

        if credentials.login_failed_count > 0 {
            credentials.reset_failures();
            self.credentials_repo.update(&credentials).await?;
        }

        account.record_login();
        self.account_repo.update(&account).await?;

        let session_token = start_session(
            self.session_repo.as_ref(),
            &self.config,
            account.account_id,
            &fingerprint,
        )
        .await?;

        tracing::info!(account_id = %account.account_id, "User signed in");

        Ok(SignInOutput { session_token })
    }
}
