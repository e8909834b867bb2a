//! Log-only mail outbox
//!
//! Links are written to the log instead of being delivered.

use crate::domain::mailer::{Mailer, OutgoingEmail};
use crate::error::AuthResult;

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> AuthResult<()> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            link = %email.link,
            "Outgoing email"
        );
        Ok(())
    }
}
