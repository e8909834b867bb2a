//! Outgoing email port

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// A transactional email with a single action link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Email,
    pub subject: String,
    pub link: String,
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, email: OutgoingEmail) -> AuthResult<()>;
}
