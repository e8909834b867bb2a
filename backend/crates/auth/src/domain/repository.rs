//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{SessionId, UserId};

use crate::domain::entity::{
    account::Account, auth_session::AuthSession, credentials::Credentials,
    one_time_token::OneTimeToken,
};
use crate::domain::value_object::{email::Email, token_kind::TokenKind, user_name::UserName};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert the account and its credentials atomically.
    ///
    /// Fails with `UserNameTaken` / `EmailTaken` when a unique key is hit.
    async fn create(&self, account: &Account, credentials: &Credentials) -> AuthResult<()>;

    async fn find_by_id(&self, account_id: UserId) -> AuthResult<Option<Account>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Persist confirmation and last-login changes
    async fn update(&self, account: &Account) -> AuthResult<()>;
}

/// Credentials repository trait
#[trait_variant::make(CredentialsRepository: Send)]
pub trait LocalCredentialsRepository {
    async fn find_by_account_id(&self, account_id: UserId) -> AuthResult<Option<Credentials>>;

    /// Update failure tracking
    async fn update(&self, credentials: &Credentials) -> AuthResult<()>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find an unexpired session and verify fingerprint
    async fn find_by_id(
        &self,
        session_id: SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Update expiry and last activity
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete(&self, session_id: SessionId) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// One-time token repository trait
#[trait_variant::make(OneTimeTokenRepository: Send)]
pub trait LocalOneTimeTokenRepository {
    async fn create(&self, token: &OneTimeToken) -> AuthResult<()>;

    /// Delete and return an unexpired token of `kind`.
    ///
    /// A token can be consumed at most once.
    async fn consume(&self, token_hash: &[u8], kind: TokenKind)
    -> AuthResult<Option<OneTimeToken>>;

    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Everything the auth handlers need from storage
pub trait AuthStore:
    AccountRepository
    + CredentialsRepository
    + AuthSessionRepository
    + OneTimeTokenRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: AccountRepository
        + CredentialsRepository
        + AuthSessionRepository
        + OneTimeTokenRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
