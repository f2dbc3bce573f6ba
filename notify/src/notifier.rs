//! Email-backed notification sink.

use crate::mailer::Mailer;
use crate::render::{Audience, Venue, render};
use maitred_core::config::EmailConfig;
use maitred_core::providers::NotificationSink;
use maitred_core::{LifecycleEvent, Reservation, Result};
use tracing::debug;

/// Notification sink that renders and sends email for lifecycle events.
///
/// Sends exactly one message to the guest and, when administrative
/// recipients are configured, exactly one joint message to all of them.
/// The second send is skipped when the first fails; the engine logs and
/// swallows whatever comes back either way.
#[derive(Clone)]
pub struct EmailNotifier<M> {
    mailer: M,
    from: String,
    admin_recipients: Vec<String>,
    venue: Venue,
}

impl<M: Mailer> EmailNotifier<M> {
    /// Create a notifier over the given transport and sender settings.
    pub fn new(mailer: M, config: &EmailConfig) -> Self {
        Self {
            mailer,
            from: config.from.clone(),
            admin_recipients: config.admin_recipients.clone(),
            venue: Venue {
                name: config.venue_name.clone(),
                address: config.venue_address.clone(),
            },
        }
    }
}

impl<M: Mailer> NotificationSink for EmailNotifier<M> {
    async fn notify(&self, event: LifecycleEvent, reservation: &Reservation) -> Result<()> {
        let guest = render(event, Audience::Guest, reservation, &self.venue);
        self.mailer
            .send(
                &self.from,
                std::slice::from_ref(&reservation.email),
                &guest,
            )
            .await?;
        debug!(reservation = %reservation.id, event = ?event, "guest notification sent");

        if !self.admin_recipients.is_empty() {
            let admin = render(event, Audience::Admin, reservation, &self.venue);
            self.mailer
                .send(&self.from, &self.admin_recipients, &admin)
                .await?;
            debug!(reservation = %reservation.id, event = ?event, "admin notification sent");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mailer::MockMailer;
    use chrono::NaiveDate;
    use maitred_core::Status;
    use maitred_core::config::MailTransport;
    use uuid::Uuid;

    fn config(admins: Vec<String>) -> EmailConfig {
        EmailConfig {
            from: "Maitred <noreply@example.com>".to_string(),
            admin_recipients: admins,
            transport: MailTransport::Console,
            venue_name: "Maitred".to_string(),
            venue_address: "1 Main Street".to_string(),
        }
    }

    fn reservation() -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0851234567".to_string(),
            guests: "4".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: "19:30".to_string(),
            occasion: None,
            special_requests: None,
            status: Status::Confirmed,
        }
    }

    #[tokio::test]
    async fn sends_guest_copy_then_one_joint_admin_copy() {
        let mailer = MockMailer::new();
        let notifier = EmailNotifier::new(
            mailer.clone(),
            &config(vec![
                "boss@example.com".to_string(),
                "floor@example.com".to_string(),
            ]),
        );

        notifier
            .notify(LifecycleEvent::StatusChanged, &reservation())
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["ada@example.com"]);
        // One message jointly to all admins, not one per admin.
        assert_eq!(sent[1].to, vec!["boss@example.com", "floor@example.com"]);
        assert_ne!(sent[0].subject, sent[1].subject);
    }

    #[tokio::test]
    async fn skips_admin_copy_when_none_configured() {
        let mailer = MockMailer::new();
        let notifier = EmailNotifier::new(mailer.clone(), &config(vec![]));

        notifier
            .notify(LifecycleEvent::Received, &reservation())
            .await
            .unwrap();

        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_notification_error() {
        let mailer = MockMailer::failing();
        let notifier = EmailNotifier::new(mailer.clone(), &config(vec![]));

        let err = notifier
            .notify(LifecycleEvent::Received, &reservation())
            .await
            .unwrap_err();
        assert!(matches!(err, maitred_core::Error::Notification(_)));
        assert_eq!(mailer.sent().len(), 1);
    }
}
