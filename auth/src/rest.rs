//! REST identity provider implementation.

use maitred_core::config::{CONNECT_TIMEOUT, REQUEST_TIMEOUT, IdentityConfig};
use maitred_core::providers::IdentityProvider;
use maitred_core::{Error, LoginSession, Result, StaffUser};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Identity provider speaking a GoTrue-style REST protocol.
///
/// Two calls are used: the password grant
/// (`POST {base}/token?grant_type=password`) and token introspection
/// (`GET {base}/user`). Both carry the public (anon) credential; the
/// bearer token is only ever the one under inspection.
#[derive(Debug, Clone)]
pub struct RestIdentityProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    email: String,
}

impl From<ProviderUser> for StaffUser {
    fn from(user: ProviderUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl RestIdentityProvider {
    /// Create a provider from identity settings, with the standard
    /// bounded timeouts (connect 5 s, total 20 s).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        })
    }
}

impl IdentityProvider for RestIdentityProvider {
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<LoginSession> {
        let outcome = async {
            let response = self
                .client
                .post(format!("{}/token", self.base_url))
                .query(&[("grant_type", "password")])
                .header("apikey", &self.anon_key)
                .json(&serde_json::json!({ "email": email, "password": password }))
                .send()
                .await?;
            response.error_for_status()?.json::<TokenResponse>().await
        }
        .await;

        match outcome {
            Ok(token) => Ok(LoginSession {
                access_token: token.access_token,
                user: token.user.into(),
            }),
            Err(err) => {
                // Collapse every failure mode to the same rejection.
                debug!(error = %err, "credential verification failed");
                Err(Error::InvalidCredentials)
            }
        }
    }

    async fn verify_token(&self, token: &str) -> Result<StaffUser> {
        let outcome = async {
            let response = self
                .client
                .get(format!("{}/user", self.base_url))
                .header("apikey", &self.anon_key)
                .bearer_auth(token)
                .send()
                .await?;
            response.error_for_status()?.json::<ProviderUser>().await
        }
        .await;

        match outcome {
            Ok(user) => Ok(user.into()),
            Err(err) => {
                // Fail closed, uniformly.
                debug!(error = %err, "token verification failed");
                Err(Error::Unauthenticated)
            }
        }
    }
}
