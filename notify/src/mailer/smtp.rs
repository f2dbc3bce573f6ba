//! SMTP transport using Lettre.

use crate::mailer::Mailer;
use crate::render::RenderedEmail;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use maitred_core::{Error, Result};

/// Transport that relays messages through an authenticated SMTP server.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl SmtpMailer {
    /// Create a transport for the given relay.
    #[must_use]
    pub fn new(host: String, port: u16, username: String, password: String) -> Self {
        Self {
            host,
            port,
            credentials: Credentials::new(username, password),
        }
    }

    /// Build a transport per message; avoids connection pooling issues.
    fn build_transport(&self) -> Result<SmtpTransport> {
        let relay = SmtpTransport::relay(&self.host)
            .map_err(|err| Error::Notification(format!("SMTP relay error: {err}")))?;
        Ok(relay
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, from: &str, to: &[String], email: &RenderedEmail) -> Result<()> {
        let mut builder = Message::builder()
            .from(parse_mailbox(from)?)
            .subject(email.subject.clone());
        for recipient in to {
            builder = builder.to(parse_mailbox(recipient)?);
        }
        let message = builder
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|err| Error::Notification(format!("failed to build email: {err}")))?;

        let mailer = self.build_transport()?;
        tokio::task::spawn_blocking(move || {
            mailer
                .send(&message)
                .map(|_| ())
                .map_err(|err| Error::Notification(format!("failed to send email: {err}")))
        })
        .await
        .map_err(|err| Error::Notification(format!("email task failed: {err}")))?
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox> {
    raw.parse()
        .map_err(|err| Error::Notification(format!("invalid email address {raw:?}: {err}")))
}
