//! # Maitred Notify
//!
//! Notification Sink: renders and dispatches transactional email for
//! reservation lifecycle events.
//!
//! One parameterized renderer produces both the guest copy and the joint
//! administrative copy for each event; the [`Mailer`] trait abstracts the
//! outbound transport (HTTP email API, SMTP relay, or the console for
//! development). Dispatch is best-effort by contract: the engine calls
//! the sink detached and logs failures rather than surfacing them.

mod mailer;
mod notifier;
mod render;

pub use mailer::{AnyMailer, ConsoleMailer, Mailer, ResendMailer, SmtpMailer};
pub use notifier::EmailNotifier;
pub use render::{RenderedEmail, Venue, event_window, reference_code};

#[cfg(any(test, feature = "test-utils"))]
pub use mailer::{MockMailer, SentEmail};
