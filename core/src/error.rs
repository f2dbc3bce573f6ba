//! Error types shared across the reservation backend.

use thiserror::Error;

/// Result type alias for reservation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the reservation backend.
///
/// Covers validation, authentication, downstream-service and notification
/// failure modes. Each variant maps to exactly one HTTP status in the web
/// layer, so handlers never invent status codes ad hoc.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Client input failed a stated validation rule.
    ///
    /// The message is user-facing and returned verbatim.
    #[error("{0}")]
    Validation(String),

    /// Credential verification failed.
    ///
    /// Deliberately carries no detail: a bad password, an unknown account
    /// and a provider outage all collapse to the same message so the
    /// endpoint cannot be used as a credential-guessing oracle.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, invalid or expired session token.
    ///
    /// Uniform regardless of which of those it was.
    #[error("Invalid or expired token")]
    Unauthenticated,

    /// The targeted record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Unique-constraint conflict on subscriber creation.
    #[error("Already subscribed")]
    AlreadySubscribed,

    /// Request quota exceeded for this client address.
    #[error("Too many requests, please try again later")]
    TooManyRequests,

    /// The store did not answer within the bounded timeout.
    #[error("Timed out contacting database. Please try again.")]
    UpstreamTimeout,

    /// The store or identity provider reported a failure.
    ///
    /// Surfaced opaquely with the upstream's own status and body.
    #[error("Upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status reported by the upstream service.
        status: u16,
        /// Raw upstream response body.
        body: String,
    },

    /// The upstream call failed before producing a status (connect, TLS,
    /// malformed response body).
    #[error("Upstream transport error: {0}")]
    Transport(String),

    /// Email rendering or dispatch failed.
    ///
    /// Never surfaced to API callers; logged at the dispatch task
    /// boundary and discarded.
    #[error("Notification dispatch failed: {0}")]
    Notification(String),

    /// Startup configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error is caused by client input or client
    /// credentials rather than a backend failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidCredentials
                | Self::Unauthenticated
                | Self::NotFound(_)
                | Self::AlreadySubscribed
                | Self::TooManyRequests
        )
    }

    /// Returns `true` if the failure originated in a downstream service.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout | Self::Upstream { .. } | Self::Transport(_)
        )
    }
}
