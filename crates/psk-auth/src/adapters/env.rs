//! # Secret Override Sources
//!
//! The process environment is consulted for the shared secret before the
//! plugin configuration.

use crate::domain::secret::SharedSecret;
use crate::ports::outbound::SecretOverride;
use std::collections::HashMap;
use std::env;

/// Environment variable holding the override secret.
pub const PSK_ENV_VAR: &str = "MCOLLECTIVE_PSK";

/// Reads [`PSK_ENV_VAR`] from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl SecretOverride for ProcessEnvironment {
    fn shared_secret(&self) -> Option<SharedSecret> {
        env::var(PSK_ENV_VAR).ok().map(SharedSecret::new)
    }
}

/// Never overrides. Configuration alone supplies the secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverride;

impl SecretOverride for NoOverride {
    fn shared_secret(&self) -> Option<SharedSecret> {
        None
    }
}

/// Map-backed override, keyed like the environment.
impl SecretOverride for HashMap<String, String> {
    fn shared_secret(&self) -> Option<SharedSecret> {
        self.get(PSK_ENV_VAR).map(SharedSecret::new)
    }
}
