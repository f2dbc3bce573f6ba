//! Rendering for reservation notification emails.
//!
//! One parameterized renderer produces every variant: guest and admin
//! audience, "received" and "status changed" events, with copy keyed on
//! the new status. Derived values (reference code, display date/time,
//! calendar window) have explicit fallbacks for malformed stored text.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use maitred_core::{LifecycleEvent, Reservation, Status};
use uuid::Uuid;

/// Default reservation slot length for the calendar link, in minutes.
const SLOT_MINUTES: i64 = 120;

/// Placeholder shown for empty optional fields.
const EMPTY_FIELD: &str = "-";

/// Venue identity rendered into every email.
#[derive(Debug, Clone)]
pub struct Venue {
    /// Display name.
    pub name: String,

    /// Street address; may be empty, in which case the directions link
    /// searches for the name alone.
    pub address: String,
}

/// A rendered email: subject plus HTML and plain-text bodies.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub html: String,

    /// Plain-text fallback body.
    pub text: String,
}

/// Which audience a rendering is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Audience {
    /// The guest who booked.
    Guest,

    /// The joint administrative copy.
    Admin,
}

/// Derive the human-shareable reference code from a reservation id:
/// the last 6 hex characters with hyphens stripped, uppercased.
#[must_use]
pub fn reference_code(id: Uuid) -> String {
    let hex = id.simple().to_string();
    hex[hex.len() - 6..].to_uppercase()
}

/// Compute the calendar time range for a stored date/time pair.
///
/// Returns local `YYYYMMDDTHHMMSS` strings for start and start plus the
/// default slot. Falls back to an all-day `YYYYMMDD` pair when the time
/// does not parse, and to an empty pair when the date does not parse
/// either (the calendar link then omits the range and lets the user pick).
#[must_use]
pub fn event_window(date: &str, time: &str) -> (String, String) {
    let Ok(day) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") else {
        return (String::new(), String::new());
    };
    match parse_clock(time) {
        Some(clock) => {
            let start = NaiveDateTime::new(day, clock);
            let end = start + Duration::minutes(SLOT_MINUTES);
            (
                start.format("%Y%m%dT%H%M%S").to_string(),
                end.format("%Y%m%dT%H%M%S").to_string(),
            )
        }
        None => {
            let all_day = day.format("%Y%m%d").to_string();
            (all_day.clone(), all_day)
        }
    }
}

/// Parse `"HH:MM"` or `"HH:MM:SS"` into a clock value, dropping seconds.
fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.split(':');
    let hour = parts.next()?.trim().parse().ok()?;
    let minute = parts.next()?.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Long-form display date, e.g. "Saturday, 01 June 2024".
fn display_date(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

/// 12-hour display time, e.g. "7:30 PM". Malformed stored text is shown
/// as-is rather than hidden.
fn display_time(raw: &str) -> String {
    let mut parts = raw.split(':');
    let Some(hour) = parts.next().map(str::trim).and_then(|p| p.parse::<u32>().ok()) else {
        return raw.to_string();
    };
    let minute = match parts.next() {
        None => 0,
        Some(part) => match part.trim().parse::<u32>() {
            Ok(minute) => minute,
            Err(_) => return raw.to_string(),
        },
    };
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

/// Google Calendar deep link for the reservation.
fn calendar_link(reservation: &Reservation, venue: &Venue) -> String {
    let (start, end) = event_window(&reservation.date.to_string(), &reservation.time);
    let details = format!(
        "Your booking at {}.\n\nName: {}\nGuests: {}\nReference: {}\nIf your plans change, please let us know.",
        venue.name,
        reservation.name,
        reservation.guests,
        reference_code(reservation.id),
    );
    let mut params = vec![
        ("action", "TEMPLATE".to_string()),
        ("text", format!("Reservation at {}", venue.name)),
        ("details", details),
        ("location", location_query(venue)),
    ];
    if !start.is_empty() {
        params.push(("dates", format!("{start}/{end}")));
    }
    format!(
        "https://calendar.google.com/calendar/render?{}",
        serde_urlencoded::to_string(params).unwrap_or_default()
    )
}

/// Google Maps directions deep link for the venue.
fn maps_link(venue: &Venue) -> String {
    let params = [("api", "1".to_string()), ("query", location_query(venue))];
    format!(
        "https://www.google.com/maps/search/?{}",
        serde_urlencoded::to_string(params).unwrap_or_default()
    )
}

fn location_query(venue: &Venue) -> String {
    if venue.address.trim().is_empty() {
        venue.name.clone()
    } else {
        format!("{} {}", venue.name, venue.address)
    }
}

/// Render one email for the given event, audience and reservation.
pub(crate) fn render(
    event: LifecycleEvent,
    audience: Audience,
    reservation: &Reservation,
    venue: &Venue,
) -> RenderedEmail {
    let reference = reference_code(reservation.id);
    let date = display_date(reservation.date);
    let time = display_time(&reservation.time);
    let name = reservation.name.as_str();
    let guests = reservation.guests.as_str();
    let status = reservation.status;

    let (subject, title, intro) = match (event, audience) {
        (LifecycleEvent::Received, Audience::Guest) => (
            format!("Reservation received (Ref {reference})"),
            "We have your reservation request".to_string(),
            format!(
                "Hi {name}, thanks for booking with us. Your request is pending review \
                 by our team; you will get another email once we confirm availability."
            ),
        ),
        (LifecycleEvent::Received, Audience::Admin) => (
            format!("New pending booking: {date} {time}, {name}, {guests} guests"),
            "New reservation (pending)".to_string(),
            "A new reservation was submitted and needs review. Reply to this email to \
             contact the guest directly."
                .to_string(),
        ),
        (LifecycleEvent::StatusChanged, Audience::Guest) => match status {
            Status::Confirmed => (
                format!("Reservation confirmed: {date} {time} (Ref {reference})"),
                "Your reservation is confirmed".to_string(),
                format!(
                    "Hi {name}, good news: your reservation is confirmed. If you are \
                     running late or need to adjust your party size, just reply to this \
                     email."
                ),
            ),
            Status::Cancelled => (
                format!("Reservation cancelled (Ref {reference})"),
                "Your reservation was cancelled".to_string(),
                format!(
                    "Hi {name}, your reservation has been cancelled. If this was a \
                     mistake or you need a new time, reply and we will help."
                ),
            ),
            other => (
                format!("Reservation update: {other} (Ref {reference})"),
                "Reservation update".to_string(),
                format!("Hi {name}, your reservation status is now {other}."),
            ),
        },
        (LifecycleEvent::StatusChanged, Audience::Admin) => (
            format!("Reservation {status}: {date} {time}, {name}, {guests} guests (Ref {reference})"),
            format!("Reservation {status}"),
            "A reservation status was updated.".to_string(),
        ),
    };

    let rows = details_rows(reservation, &reference, &date, &time);
    let html = render_html(&title, &intro, &rows, audience, reservation, venue);
    let text = render_text(&title, &intro, &rows, audience, reservation, venue);

    RenderedEmail {
        subject,
        html,
        text,
    }
}

fn details_rows(
    reservation: &Reservation,
    reference: &str,
    date: &str,
    time: &str,
) -> Vec<(&'static str, String)> {
    let optional = |value: &Option<String>| {
        value
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| EMPTY_FIELD.to_string())
    };
    vec![
        ("Reservation name", reservation.name.clone()),
        ("Guests", reservation.guests.clone()),
        ("Date", date.to_string()),
        ("Time", time.to_string()),
        ("Contact email", reservation.email.clone()),
        ("Phone", reservation.phone.clone()),
        ("Occasion", optional(&reservation.occasion)),
        ("Special requests", optional(&reservation.special_requests)),
        ("Reference", reference.to_string()),
        ("Status", reservation.status.to_string()),
    ]
}

fn render_html(
    title: &str,
    intro: &str,
    rows: &[(&'static str, String)],
    audience: Audience,
    reservation: &Reservation,
    venue: &Venue,
) -> String {
    let table_rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr>\
                 <td style=\"padding: 8px 12px; border-bottom: 1px solid #e6e6e6; color: #667085; width: 180px;\">{label}</td>\
                 <td style=\"padding: 8px 12px; border-bottom: 1px solid #e6e6e6; color: #1a1a1a;\">{value}</td>\
                 </tr>"
            )
        })
        .collect();

    let actions = if audience == Audience::Guest {
        format!(
            "<p style=\"margin: 30px 0;\">\
             <a href=\"{calendar}\" style=\"display: inline-block; background-color: #0e7a4a; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;\">Add to Calendar</a>\
             &nbsp;\
             <a href=\"{maps}\" style=\"display: inline-block; background-color: #0a5a36; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;\">Get Directions</a>\
             </p>",
            calendar = calendar_link(reservation, venue),
            maps = maps_link(venue),
        )
    } else {
        String::new()
    };

    let footer = if venue.address.trim().is_empty() {
        venue.name.clone()
    } else {
        format!("{}<br>{}", venue.name, venue.address)
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #0e7a4a;">{title}</h2>
        <p>{intro}</p>
        <table cellpadding="0" cellspacing="0" width="100%" style="border: 1px solid #e6e6e6; border-radius: 8px;">
            <tbody>{table_rows}</tbody>
        </table>
        {actions}
        <p style="color: #666; font-size: 14px; margin-top: 40px;">{footer}</p>
    </div>
</body>
</html>
"#
    )
}

fn render_text(
    title: &str,
    intro: &str,
    rows: &[(&'static str, String)],
    audience: Audience,
    reservation: &Reservation,
    venue: &Venue,
) -> String {
    let mut lines = vec![title.to_string(), String::new(), intro.to_string(), String::new()];
    for (label, value) in rows {
        lines.push(format!("{label}: {value}"));
    }
    if audience == Audience::Guest {
        lines.push(String::new());
        lines.push(format!("Add to calendar: {}", calendar_link(reservation, venue)));
        lines.push(format!("Directions: {}", maps_link(venue)));
    }
    lines.push(String::new());
    lines.push(venue.name.clone());
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn venue() -> Venue {
        Venue {
            name: "Maitred".to_string(),
            address: "1 Main Street".to_string(),
        }
    }

    fn reservation(status: Status) -> Reservation {
        Reservation {
            id: "a1b2c3d4-e5f6-7890-aaaa-bbbbbbbbbbbb".parse().unwrap(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0851234567".to_string(),
            guests: "4".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: "19:30".to_string(),
            occasion: None,
            special_requests: None,
            status,
        }
    }

    #[test]
    fn reference_code_is_last_six_hex_uppercased() {
        let id: Uuid = "a1b2c3d4-e5f6-7890-aaaa-bbbbbbbbbbbb".parse().unwrap();
        assert_eq!(reference_code(id), "BBBBBB");
    }

    #[test]
    fn event_window_adds_the_default_slot() {
        let (start, end) = event_window("2024-06-01", "19:30");
        assert_eq!(start, "20240601T193000");
        assert_eq!(end, "20240601T213000");
    }

    #[test]
    fn event_window_drops_seconds() {
        let (start, _) = event_window("2024-06-01", "19:30:45");
        assert_eq!(start, "20240601T193000");
    }

    #[test]
    fn event_window_falls_back_to_all_day() {
        let (start, end) = event_window("2024-06-01", "evening");
        assert_eq!(start, "20240601");
        assert_eq!(end, "20240601");
    }

    #[test]
    fn event_window_yields_empty_pair_without_a_date() {
        assert_eq!(event_window("soon", "evening"), (String::new(), String::new()));
    }

    #[test]
    fn display_time_is_twelve_hour() {
        assert_eq!(display_time("19:30"), "7:30 PM");
        assert_eq!(display_time("00:15"), "12:15 AM");
        assert_eq!(display_time("12:00"), "12:00 PM");
        assert_eq!(display_time("7"), "7:00 AM");
        assert_eq!(display_time("evening"), "evening");
    }

    #[test]
    fn calendar_link_carries_the_encoded_range() {
        let link = calendar_link(&reservation(Status::Pending), &venue());
        assert!(link.starts_with("https://calendar.google.com/calendar/render?"));
        assert!(link.contains("dates=20240601T193000%2F20240601T213000"));
    }

    #[test]
    fn calendar_link_falls_back_to_all_day_range() {
        let mut res = reservation(Status::Pending);
        res.time = "evening".to_string();
        let link = calendar_link(&res, &venue());
        assert!(link.contains("dates=20240601%2F20240601"));
    }

    #[test]
    fn status_change_copy_differs_per_status() {
        let venue = venue();
        let confirmed = render(
            LifecycleEvent::StatusChanged,
            Audience::Guest,
            &reservation(Status::Confirmed),
            &venue,
        );
        let cancelled = render(
            LifecycleEvent::StatusChanged,
            Audience::Guest,
            &reservation(Status::Cancelled),
            &venue,
        );
        let pending = render(
            LifecycleEvent::StatusChanged,
            Audience::Guest,
            &reservation(Status::Pending),
            &venue,
        );
        assert!(confirmed.subject.contains("confirmed"));
        assert!(cancelled.subject.contains("cancelled"));
        assert!(pending.subject.contains("pending"));
        assert_ne!(confirmed.subject, cancelled.subject);
        assert_ne!(confirmed.html, cancelled.html);
    }

    #[test]
    fn guest_copy_has_actions_and_admin_copy_does_not() {
        let venue = venue();
        let res = reservation(Status::Pending);
        let guest = render(LifecycleEvent::Received, Audience::Guest, &res, &venue);
        let admin = render(LifecycleEvent::Received, Audience::Admin, &res, &venue);
        assert!(guest.html.contains("Add to Calendar"));
        assert!(!admin.html.contains("Add to Calendar"));
        assert!(guest.subject.contains("Ref BBBBBB"));
        assert!(admin.subject.contains("4 guests"));
    }

    #[test]
    fn empty_optionals_render_as_placeholder() {
        let res = reservation(Status::Pending);
        let rendered = render(LifecycleEvent::Received, Audience::Guest, &res, &venue());
        assert!(rendered.text.contains("Occasion: -"));
        assert!(rendered.text.contains("Special requests: -"));
    }
}
