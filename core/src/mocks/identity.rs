//! Mock identity provider.

use crate::error::{Error, Result};
use crate::model::{LoginSession, StaffUser};
use crate::providers::IdentityProvider;

/// Mock identity provider accepting a single configured credential pair
/// and a single valid token.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    email: String,
    password: String,
    token: String,
    user_id: String,
}

impl MockIdentityProvider {
    /// Create a provider accepting the given email/password pair.
    ///
    /// The issued token defaults to `"test-token"`.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            token: "test-token".to_string(),
            user_id: "staff-1".to_string(),
        }
    }

    /// Override the token this provider issues and accepts.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    fn user(&self) -> StaffUser {
        StaffUser {
            id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new("staff@example.com", "correct horse battery staple")
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<LoginSession> {
        if email == self.email && password == self.password {
            Ok(LoginSession {
                access_token: self.token.clone(),
                user: self.user(),
            })
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    async fn verify_token(&self, token: &str) -> Result<StaffUser> {
        if token == self.token {
            Ok(self.user())
        } else {
            Err(Error::Unauthenticated)
        }
    }
}
