//! Startup configuration.
//!
//! All configuration is read once at process start into an immutable
//! [`Config`] and passed by reference into component constructors, never
//! held as ambient mutable globals. Missing required values fail startup
//! with a descriptive [`Error::Config`].

use crate::error::{Error, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Connect timeout for every outbound service call.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Total request timeout for every outbound service call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Default bind address when `BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default SMTP submission port.
const DEFAULT_SMTP_PORT: u16 = 587;

/// Data-store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the REST data store, without a trailing slash.
    pub url: String,

    /// Service credential; bypasses row-level restrictions.
    pub service_key: String,
}

/// Identity-provider connection settings.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity provider, without a trailing slash.
    pub url: String,

    /// Public (anon) credential sent with every provider call.
    pub anon_key: String,
}

/// Outbound email transport, selected once at startup.
#[derive(Debug, Clone)]
pub enum MailTransport {
    /// HTTP email API with a bearer credential.
    Api {
        /// Provider API key.
        api_key: String,
    },

    /// Authenticated SMTP relay.
    Smtp {
        /// SMTP server host.
        host: String,

        /// SMTP server port.
        port: u16,

        /// Authentication username.
        username: String,

        /// Authentication password.
        password: String,
    },

    /// Log emails instead of sending them (development fallback).
    Console,
}

/// Email sender identity and routing.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Sender identity, e.g. `"Maitred <noreply@example.com>"`.
    pub from: String,

    /// Administrative recipients for the joint copy; may be empty.
    pub admin_recipients: Vec<String>,

    /// Selected outbound transport.
    pub transport: MailTransport,

    /// Venue display name rendered into emails and deep links.
    pub venue_name: String,

    /// Venue street address used for the directions link; may be empty.
    pub venue_address: String,
}

/// Complete startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Data-store gateway settings.
    pub store: StoreConfig,

    /// Identity-provider settings.
    pub identity: IdentityConfig,

    /// Email sender settings.
    pub email: EmailConfig,

    /// Origins allowed for credentialed cross-origin requests.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing or malformed
    /// variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Factored out of [`Config::from_env`] so parsing is testable without
    /// mutating the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing or malformed
    /// key.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            get(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{key} must be set")))
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|err| Error::Config(format!("BIND_ADDR is not a valid socket address: {err}")))?;

        let store = StoreConfig {
            url: strip_trailing_slash(require("STORE_URL")?),
            service_key: require("STORE_SERVICE_KEY")?,
        };

        let identity = IdentityConfig {
            url: strip_trailing_slash(require("AUTH_URL")?),
            anon_key: require("AUTH_ANON_KEY")?,
        };

        let transport = match get("EMAIL_API_KEY").filter(|key| !key.trim().is_empty()) {
            Some(api_key) => MailTransport::Api { api_key },
            None => match get("SMTP_HOST").filter(|host| !host.trim().is_empty()) {
                Some(host) => MailTransport::Smtp {
                    host,
                    port: match get("SMTP_PORT") {
                        Some(raw) => raw.parse::<u16>().map_err(|err| {
                            Error::Config(format!("SMTP_PORT is not a valid port: {err}"))
                        })?,
                        None => DEFAULT_SMTP_PORT,
                    },
                    username: get("SMTP_USERNAME").unwrap_or_default(),
                    password: get("SMTP_PASSWORD").unwrap_or_default(),
                },
                None => MailTransport::Console,
            },
        };

        let email = EmailConfig {
            from: require("FROM_EMAIL")?,
            admin_recipients: split_csv(get("ADMIN_EMAILS").or_else(|| get("ADMIN_EMAIL"))),
            transport,
            venue_name: get("VENUE_NAME").unwrap_or_else(|| "Maitred".to_string()),
            venue_address: get("VENUE_ADDRESS").unwrap_or_default(),
        };

        Ok(Self {
            bind_addr,
            store,
            identity,
            email,
            allowed_origins: split_csv(get("ALLOWED_ORIGINS")),
        })
    }
}

/// Split a comma-separated value into trimmed, non-empty entries.
fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn strip_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
