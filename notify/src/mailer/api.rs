//! HTTP email API transport.

use crate::mailer::Mailer;
use crate::render::RenderedEmail;
use maitred_core::config::{CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use maitred_core::{Error, Result};
use reqwest::Client;
use serde::Serialize;

/// Default API endpoint (Resend-compatible).
const DEFAULT_API_URL: &str = "https://api.resend.com";

/// Transport that posts messages to a Resend-compatible HTTP email API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl ResendMailer {
    /// Create a transport with the given API credential.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Point the transport at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, from: &str, to: &[String], email: &RenderedEmail) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from,
                to,
                subject: &email.subject,
                html: &email.html,
                text: &email.text,
            })
            .send()
            .await
            .map_err(|err| Error::Notification(format!("email API request failed: {err}")))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Notification(format!(
                "email API rejected the message ({status}): {body}"
            )))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn email() -> RenderedEmail {
        RenderedEmail {
            subject: "Reservation received".to_string(),
            html: "<p>hello</p>".to_string(),
            text: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_the_message_with_bearer_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("Authorization", "Bearer re_123"))
            .and(body_partial_json(json!({
                "from": "Maitred <noreply@example.com>",
                "to": ["guest@example.com"],
                "subject": "Reservation received"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = ResendMailer::new("re_123".to_string())
            .unwrap()
            .with_base_url(server.uri());
        mailer
            .send(
                "Maitred <noreply@example.com>",
                &["guest@example.com".to_string()],
                &email(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejection_maps_to_notification_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid from"))
            .mount(&server)
            .await;

        let mailer = ResendMailer::new("re_123".to_string())
            .unwrap()
            .with_base_url(server.uri());
        let err = mailer
            .send("bad", &["guest@example.com".to_string()], &email())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Notification(_)));
    }
}
