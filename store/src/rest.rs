//! PostgREST-style gateway implementation.

use maitred_core::config::{CONNECT_TIMEOUT, REQUEST_TIMEOUT, StoreConfig};
use maitred_core::providers::DataStore;
use maitred_core::{
    EmailAddress, Error, NewReservation, Reservation, Result, Status, Subscriber,
};
use reqwest::header::{ACCEPT, RANGE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

/// Reservation collection name.
const RESERVATIONS: &str = "reservations";

/// Subscriber collection name.
const SUBSCRIBERS: &str = "subscribers";

/// Row range requested on reads; avoids pagination surprises.
const READ_RANGE: &str = "0-9999";

/// Ordering applied to every list operation.
const LIST_ORDER: &str = "date.asc,time.asc";

/// Gateway to a PostgREST-style data store.
///
/// Writes ask for the stored representation back
/// (`Prefer: return=representation`), so create and update responses carry
/// the generated or updated row. Every call authenticates with the service
/// credential, which bypasses row-level restrictions. No call is retried:
/// a failed store call fails the whole operation.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    service_key: String,
}

/// Create payload: the validated submission plus the server-forced status.
#[derive(Serialize)]
struct ReservationPayload<'a> {
    #[serde(flatten)]
    reservation: &'a NewReservation,
    status: Status,
}

impl RestStore {
    /// Create a gateway from store settings, with the standard bounded
    /// timeouts (connect 5 s, total 20 s).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        Self::with_timeouts(config, CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    /// Create a gateway with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn with_timeouts(
        config: &StoreConfig,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.url.clone(),
            service_key: config.service_key.clone(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{collection}", self.base_url)
    }

    /// Attach the service credential headers.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Send a request, mapping failures into the shared taxonomy.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(map_request_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "store call failed");
            Err(Error::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Read rows from a collection with the given filter parameters.
    async fn read(&self, collection: &str, params: &[(&str, String)]) -> Result<Vec<Reservation>> {
        let request = self
            .authed(self.client.get(self.collection_url(collection)))
            .query(params)
            .header(ACCEPT, "application/json")
            .header(RANGE, READ_RANGE);
        self.send(request).await?.json().await.map_err(map_request_error)
    }
}

impl DataStore for RestStore {
    async fn create_reservation(
        &self,
        reservation: &NewReservation,
        status: Status,
    ) -> Result<Reservation> {
        let request = self
            .authed(self.client.post(self.collection_url(RESERVATIONS)))
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&ReservationPayload {
                reservation,
                status,
            });
        let rows: Vec<Reservation> =
            self.send(request).await?.json().await.map_err(map_request_error)?;
        rows.into_iter().next().ok_or_else(empty_representation)
    }

    async fn update_reservation_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> Result<Option<Reservation>> {
        let params = [("id", format!("eq.{id}")), ("select", "*".to_string())];
        let request = self
            .authed(self.client.patch(self.collection_url(RESERVATIONS)))
            .query(&params)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "status": status }));
        let rows: Vec<Reservation> =
            self.send(request).await?.json().await.map_err(map_request_error)?;
        // An empty representation means nothing matched the id filter.
        Ok(rows.into_iter().next())
    }

    async fn list_by_email(&self, email: &EmailAddress) -> Result<Vec<Reservation>> {
        let params = [
            ("select", "*".to_string()),
            ("email", format!("eq.{email}")),
            ("order", LIST_ORDER.to_string()),
        ];
        self.read(RESERVATIONS, &params).await
    }

    async fn list_by_status(&self, status: Status) -> Result<Vec<Reservation>> {
        let params = [
            ("select", "*".to_string()),
            ("status", format!("eq.{status}")),
            ("order", LIST_ORDER.to_string()),
        ];
        self.read(RESERVATIONS, &params).await
    }

    async fn list_all(&self, status: Option<Status>) -> Result<Vec<Reservation>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", LIST_ORDER.to_string()),
        ];
        if let Some(status) = status {
            params.push(("status", format!("eq.{status}")));
        }
        self.read(RESERVATIONS, &params).await
    }

    async fn create_subscriber(&self, email: &EmailAddress) -> Result<Subscriber> {
        let request = self
            .authed(self.client.post(self.collection_url(SUBSCRIBERS)))
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "email": email.as_str() }));
        match self.send(request).await {
            Ok(response) => {
                let rows: Vec<Subscriber> =
                    response.json().await.map_err(map_request_error)?;
                rows.into_iter().next().ok_or_else(empty_representation)
            }
            // Unique-constraint violation on the email column.
            Err(Error::Upstream { status, .. }) if status == StatusCode::CONFLICT.as_u16() => {
                Err(Error::AlreadySubscribed)
            }
            Err(err) => Err(err),
        }
    }
}

/// Map a reqwest failure into the shared taxonomy.
///
/// Timeouts (connect or read/write) become [`Error::UpstreamTimeout`];
/// everything that failed before producing a status (connect refusals,
/// TLS, body decoding) becomes [`Error::Transport`].
fn map_request_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::UpstreamTimeout
    } else {
        Error::Transport(err.to_string())
    }
}

fn empty_representation() -> Error {
    Error::Transport("store returned an empty representation".to_string())
}
