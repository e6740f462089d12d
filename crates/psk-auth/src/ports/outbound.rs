//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the codec depends on. All are queried per call and must be
//! thread-safe; concurrent decodes from many peers is the normal load.

use crate::domain::errors::{ConfigError, IdentityError};
use crate::domain::secret::SharedSecret;
use shared_types::{DigestScheme, IdentitySource, SerializationMode};
use std::sync::Arc;

/// Read-only view of the plugin configuration.
pub trait SecurityConfigProvider: Send + Sync {
    /// Configured shared secret, if any.
    fn shared_secret(&self) -> Option<SharedSecret>;

    /// Configured serialization mode. Defaults to binary when unset.
    ///
    /// # Errors
    /// `ConfigError::InvalidOption` for an unknown spelling.
    fn serialization_mode(&self) -> Result<SerializationMode, ConfigError>;

    /// Configured caller identity source. Defaults to uid when unset.
    ///
    /// # Errors
    /// `ConfigError::InvalidOption` for an unknown spelling.
    fn identity_source(&self) -> Result<IdentitySource, ConfigError>;

    /// Configured digest scheme. Defaults to md5 when unset.
    ///
    /// # Errors
    /// `ConfigError::InvalidOption` for an unknown spelling.
    fn digest_scheme(&self) -> Result<DigestScheme, ConfigError>;

    /// This node's configured identity.
    fn node_identity(&self) -> Option<String>;
}

/// Environment-style source consulted before configuration for the secret.
pub trait SecretOverride: Send + Sync {
    /// Override secret, if one is set.
    fn shared_secret(&self) -> Option<SharedSecret>;
}

/// Process and OS identity primitives.
pub trait OsIdentity: Send + Sync {
    /// Real user id of the current process.
    fn uid(&self) -> u32;

    /// Real group id of the current process.
    fn gid(&self) -> u32;

    /// Group name for `gid`.
    ///
    /// # Errors
    /// `IdentityError` if there is no such group or the lookup fails.
    fn group_name(&self, gid: u32) -> Result<String, IdentityError>;

    /// Login name of the current user.
    ///
    /// # Errors
    /// `IdentityError` if no name can be determined.
    fn login_name(&self) -> Result<String, IdentityError>;
}

/// Sink for decode outcomes. Increments must be thread-safe.
pub trait ValidationStats: Send + Sync {
    /// A received digest matched.
    fn record_validated(&self);

    /// A received digest did not match.
    fn record_unvalidated(&self);
}

impl<T: SecurityConfigProvider + ?Sized> SecurityConfigProvider for Arc<T> {
    fn shared_secret(&self) -> Option<SharedSecret> {
        (**self).shared_secret()
    }

    fn serialization_mode(&self) -> Result<SerializationMode, ConfigError> {
        (**self).serialization_mode()
    }

    fn identity_source(&self) -> Result<IdentitySource, ConfigError> {
        (**self).identity_source()
    }

    fn digest_scheme(&self) -> Result<DigestScheme, ConfigError> {
        (**self).digest_scheme()
    }

    fn node_identity(&self) -> Option<String> {
        (**self).node_identity()
    }
}

impl<T: ValidationStats + ?Sized> ValidationStats for Arc<T> {
    fn record_validated(&self) {
        (**self).record_validated()
    }

    fn record_unvalidated(&self) {
        (**self).record_unvalidated()
    }
}
