//! Recording mock transport for tests.

use crate::mailer::Mailer;
use crate::render::RenderedEmail;
use maitred_core::{Error, Result};
use std::sync::{Arc, Mutex, PoisonError};

/// One recorded send.
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// Sender identity.
    pub from: String,

    /// Recipient list of the single message.
    pub to: Vec<String>,

    /// Subject line.
    pub subject: String,
}

/// Transport that records sends instead of delivering them.
///
/// Clones share the same record, so a test can keep a handle while the
/// notifier owns another.
#[derive(Debug, Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: bool,
}

impl MockMailer {
    /// Create a recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose every send errors (after recording it).
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    /// Snapshot of every recorded send, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Mailer for MockMailer {
    async fn send(&self, from: &str, to: &[String], email: &RenderedEmail) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentEmail {
                from: from.to_string(),
                to: to.to_vec(),
                subject: email.subject.clone(),
            });
        if self.fail {
            Err(Error::Notification("mock transport failure".to_string()))
        } else {
            Ok(())
        }
    }
}
