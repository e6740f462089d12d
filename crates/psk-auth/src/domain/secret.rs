//! # Shared Secret
//!
//! The pre-shared key. It is never embedded in an envelope, never logged, and
//! is resolved afresh for every digest so that a rotated value takes effect on
//! the next call.

use crate::domain::errors::ConfigError;
use crate::ports::outbound::{SecretOverride, SecurityConfigProvider};
use std::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The pre-shared key. Cleared from memory on drop.
///
/// No `PartialEq`: compare secrets with [`ConstantTimeEq`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Wraps a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw key material.
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns true for the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.expose().ct_eq(other.expose())
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Resolves the secret for one digest computation.
///
/// The override source wins over configuration. An empty value counts as
/// absent.
///
/// # Errors
///
/// `ConfigError::MissingSecret` if neither source supplies a value.
pub fn resolve_secret(
    secret_override: &dyn SecretOverride,
    config: &dyn SecurityConfigProvider,
) -> Result<SharedSecret, ConfigError> {
    if let Some(secret) = secret_override.shared_secret().filter(|s| !s.is_empty()) {
        return Ok(secret);
    }

    config
        .shared_secret()
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingSecret)
}
