//! Outbound mail transports.
//!
//! The [`Mailer`] trait abstracts over delivery services. Three transports
//! ship: an HTTP email API ([`ResendMailer`]), an authenticated SMTP relay
//! ([`SmtpMailer`]) and a console logger for development
//! ([`ConsoleMailer`]). [`AnyMailer`] wraps the startup-selected one
//! behind a single concrete type.

mod api;
mod console;
mod smtp;

#[cfg(any(test, feature = "test-utils"))]
mod mock;

use crate::render::RenderedEmail;
use maitred_core::Result;
use maitred_core::config::MailTransport;
use std::future::Future;

pub use api::ResendMailer;
pub use console::ConsoleMailer;
pub use smtp::SmtpMailer;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockMailer, SentEmail};

/// Outbound mail transport.
pub trait Mailer: Send + Sync {
    /// Send one rendered email to the given recipients as a single
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [`maitred_core::Error::Notification`] when the transport
    /// rejects or fails to deliver the message.
    fn send(
        &self,
        from: &str,
        to: &[String],
        email: &RenderedEmail,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// The startup-selected transport behind one concrete type.
#[derive(Clone)]
pub enum AnyMailer {
    /// HTTP email API.
    Api(ResendMailer),

    /// Authenticated SMTP relay.
    Smtp(SmtpMailer),

    /// Console logging (development).
    Console(ConsoleMailer),
}

impl AnyMailer {
    /// Build the transport selected by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`maitred_core::Error::Config`] when the underlying
    /// transport cannot be constructed.
    pub fn from_transport(transport: &MailTransport) -> Result<Self> {
        match transport {
            MailTransport::Api { api_key } => Ok(Self::Api(ResendMailer::new(api_key.clone())?)),
            MailTransport::Smtp {
                host,
                port,
                username,
                password,
            } => Ok(Self::Smtp(SmtpMailer::new(
                host.clone(),
                *port,
                username.clone(),
                password.clone(),
            ))),
            MailTransport::Console => Ok(Self::Console(ConsoleMailer::new())),
        }
    }
}

impl Mailer for AnyMailer {
    async fn send(&self, from: &str, to: &[String], email: &RenderedEmail) -> Result<()> {
        match self {
            Self::Api(mailer) => mailer.send(from, to, email).await,
            Self::Smtp(mailer) => mailer.send(from, to, email).await,
            Self::Console(mailer) => mailer.send(from, to, email).await,
        }
    }
}
