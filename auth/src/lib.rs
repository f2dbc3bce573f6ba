//! # Maitred Auth
//!
//! Identity Verifier: exchanges staff credentials for a session token and
//! validates bearer tokens, by delegating to an external identity
//! provider. The provider is opaque: this system mints no tokens,
//! maintains no revocation list and persists nothing about sessions.
//!
//! Failure modes are deliberately collapsed: every credential failure
//! becomes "invalid email or password" and every token failure becomes
//! "invalid or expired token", so neither endpoint can be used as a
//! credential-guessing oracle.

mod rest;

pub use rest::RestIdentityProvider;
