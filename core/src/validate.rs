//! Boundary validation for reservation submissions.
//!
//! Checks run in a fixed order and fail fast, so the caller always gets
//! the first applicable reason with its exact user-facing message. All of
//! this happens before any store call is made.

use crate::error::{Error, Result};
use crate::model::{EmailAddress, NewReservation};
use std::ops::RangeInclusive;

/// Maximum accepted guest-name length.
const MAX_NAME_LEN: usize = 100;

/// Maximum accepted occasion length.
const MAX_OCCASION_LEN: usize = 100;

/// Maximum accepted special-requests length.
const MAX_SPECIAL_REQUESTS_LEN: usize = 500;

/// Accepted party size, inclusive.
const GUEST_RANGE: RangeInclusive<u32> = 1..=20;

/// Validate a reservation submission.
///
/// Order matters: name, then phone, then guests (the stated workflow
/// rules), then the request-model limits (email shape, field lengths).
///
/// # Errors
///
/// Returns [`Error::Validation`] carrying the first failing rule's
/// user-facing message.
pub fn validate_new_reservation(submission: &NewReservation) -> Result<()> {
    let name = submission.name.trim();
    if name.len() < 2 {
        return Err(Error::Validation(
            "Name must be at least 2 characters".to_string(),
        ));
    }
    if submission.phone.trim().len() < 8 {
        return Err(Error::Validation(
            "Phone number must be at least 8 digits".to_string(),
        ));
    }
    parse_guests(&submission.guests)?;
    EmailAddress::parse(&submission.email)?;
    if name.len() > MAX_NAME_LEN {
        return Err(Error::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if let Some(occasion) = &submission.occasion {
        if occasion.len() > MAX_OCCASION_LEN {
            return Err(Error::Validation(format!(
                "Occasion must be at most {MAX_OCCASION_LEN} characters"
            )));
        }
    }
    if let Some(requests) = &submission.special_requests {
        if requests.len() > MAX_SPECIAL_REQUESTS_LEN {
            return Err(Error::Validation(format!(
                "Special requests must be at most {MAX_SPECIAL_REQUESTS_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Parse the textual guest count.
///
/// The stored representation is text, so the rule is: non-empty, decimal
/// digits only, parsed value within [`GUEST_RANGE`]. Leading zeros are
/// tolerated (`"04"` is four guests).
///
/// # Errors
///
/// Returns [`Error::Validation`] with the stated guest-count message for
/// anything else.
pub fn parse_guests(raw: &str) -> Result<u32> {
    let is_digits = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit());
    is_digits
        .then(|| raw.parse::<u32>().ok())
        .flatten()
        .filter(|n| GUEST_RANGE.contains(n))
        .ok_or_else(|| Error::Validation("Guests must be between 1 and 20".to_string()))
}
