//! Domain model for reservations, subscribers and staff identity.
//!
//! The backing store keeps `guests` and `time` as text for schema
//! compatibility, so those fields stay textual end to end and are
//! validated at the boundary (see [`crate::validate`]).

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reservation lifecycle status.
///
/// [`Status::Pending`] is the only state the system assigns at creation.
/// Transitions are not restricted: staff may move a reservation between
/// any two statuses, including out of `Confirmed`/`Cancelled` and back
/// into the same status (which re-sends the notification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Awaiting staff review.
    Pending,

    /// Confirmed by staff.
    Confirmed,

    /// Cancelled by staff.
    Cancelled,
}

impl Status {
    /// Stable lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether *entering* this status notifies the guest.
    #[must_use]
    pub const fn is_notifiable(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(Error::Validation(format!("Unknown status: {other}"))),
        }
    }
}

/// A structurally valid email address.
///
/// Parsing checks shape only (single `@`, non-empty local part, dotted
/// domain, no whitespace); deliverability is the mail provider's problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalize (trim) an email address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the input is not shaped like an
    /// email address.
    pub fn parse(raw: &str) -> Result<Self> {
        let candidate = raw.trim();
        if Self::is_valid(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(Error::Validation("Invalid email address".to_string()))
        }
    }

    fn is_valid(candidate: &str) -> bool {
        if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = candidate.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An incoming reservation request.
///
/// Carries no identifier and no trusted status: the engine forces
/// [`Status::Pending`] on create regardless of what the client sent (any
/// client-supplied `status` field is dropped at deserialization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    /// Guest name.
    pub name: String,

    /// Guest contact email.
    pub email: String,

    /// Guest phone number.
    pub phone: String,

    /// Party size as text (validated to 1–20 at creation).
    pub guests: String,

    /// Reservation date.
    pub date: NaiveDate,

    /// Clock time, `"HH:MM"` or `"HH:MM:SS"` free text.
    pub time: String,

    /// Optional occasion (birthday, anniversary, …).
    #[serde(default)]
    pub occasion: Option<String>,

    /// Optional special requests.
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// A stored reservation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned unique identifier.
    pub id: Uuid,

    /// Guest name.
    pub name: String,

    /// Guest contact email.
    pub email: String,

    /// Guest phone number.
    pub phone: String,

    /// Party size as text.
    pub guests: String,

    /// Reservation date.
    pub date: NaiveDate,

    /// Clock time, `"HH:MM"` or `"HH:MM:SS"` free text.
    pub time: String,

    /// Optional occasion.
    #[serde(default)]
    pub occasion: Option<String>,

    /// Optional special requests.
    #[serde(default)]
    pub special_requests: Option<String>,

    /// Lifecycle status.
    pub status: Status,
}

/// A newsletter subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Store-assigned identifier.
    pub id: Uuid,

    /// Subscribed email address.
    pub email: String,
}

/// A verified staff identity reported by the identity provider.
///
/// Never persisted by this system; validated per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    /// Provider-assigned user id.
    pub id: String,

    /// Staff email address.
    pub email: String,
}

/// A successful credential verification: bearer token plus identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSession {
    /// Opaque bearer token issued by the identity provider.
    pub access_token: String,

    /// The authenticated staff user.
    pub user: StaffUser,
}

/// Lifecycle events that trigger notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A new reservation was received and stored as pending.
    Received,

    /// A reservation's status was changed by staff.
    StatusChanged,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&Status::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::Confirmed);
    }

    #[test]
    fn status_from_str_rejects_unknown() {
        assert_eq!("pending".parse::<Status>().unwrap(), Status::Pending);
        assert!("archived".parse::<Status>().is_err());
        // Case-sensitive, matching the wire format.
        assert!("Confirmed".parse::<Status>().is_err());
    }

    #[test]
    fn only_confirmed_and_cancelled_notify() {
        assert!(!Status::Pending.is_notifiable());
        assert!(Status::Confirmed.is_notifiable());
        assert!(Status::Cancelled.is_notifiable());
    }

    #[test]
    fn email_parse_accepts_ordinary_addresses() {
        let email = EmailAddress::parse("  guest@example.com ").unwrap();
        assert_eq!(email.as_str(), "guest@example.com");
    }

    #[test]
    fn email_parse_rejects_malformed_addresses() {
        for bad in ["", "guest", "@example.com", "guest@", "guest@example", "gu est@example.com", "a@b@c.com"] {
            assert!(EmailAddress::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn client_supplied_status_is_dropped_on_deserialize() {
        let body = serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "0851234567",
            "guests": "4",
            "date": "2024-06-01",
            "time": "19:30",
            "status": "confirmed"
        });
        let parsed: NewReservation = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.name, "Ada");
        // No status field exists to smuggle a pre-confirmed booking in.
    }
}
