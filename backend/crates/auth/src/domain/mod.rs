//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    account::Account, auth_session::AuthSession, credentials::Credentials,
    one_time_token::OneTimeToken,
};
pub use mailer::{Mailer, OutgoingEmail};
pub use repository::{
    AccountRepository, AuthSessionRepository, AuthStore, CredentialsRepository,
    OneTimeTokenRepository,
};
