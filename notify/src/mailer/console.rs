//! Console transport for development.

use crate::mailer::Mailer;
use crate::render::RenderedEmail;
use maitred_core::Result;
use tracing::info;

/// Transport that logs emails instead of sending them.
///
/// The development fallback when neither an email API credential nor an
/// SMTP relay is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    /// Create a console transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Mailer for ConsoleMailer {
    async fn send(&self, from: &str, to: &[String], email: &RenderedEmail) -> Result<()> {
        info!(
            from = %from,
            to = ?to,
            subject = %email.subject,
            "email (console transport)"
        );
        info!("{}", email.text);
        Ok(())
    }
}
