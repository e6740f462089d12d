//! Codec builders shared by the integration tests and benchmarks.

use psk_auth::{
    AtomicValidationStats, EnvelopeCodec, IdentityError, NoOverride, OsIdentity, PluginConfig,
    SecurityContext, SecurityError, PSK_KEY,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Deterministic process identity.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    pub uid: u32,
    pub gid: u32,
    pub group: Option<String>,
    pub login: Option<String>,
}

impl Default for FixedIdentity {
    fn default() -> Self {
        Self {
            uid: 1000,
            gid: 1000,
            group: Some("staff".to_string()),
            login: Some("deploy".to_string()),
        }
    }
}

impl OsIdentity for FixedIdentity {
    fn uid(&self) -> u32 {
        self.uid
    }

    fn gid(&self) -> u32 {
        self.gid
    }

    fn group_name(&self, gid: u32) -> Result<String, IdentityError> {
        self.group
            .clone()
            .ok_or(IdentityError::UnknownGroup { gid })
    }

    fn login_name(&self) -> Result<String, IdentityError> {
        self.login
            .clone()
            .ok_or(IdentityError::UnknownUser { uid: self.uid })
    }
}

/// Agent request body used across the suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub cmd: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn ping() -> Self {
        Self {
            cmd: "ping".to_string(),
            args: Vec::new(),
        }
    }
}

/// A codec plus handles on its configuration and counters.
pub struct Peer {
    pub codec: EnvelopeCodec,
    pub config: Arc<PluginConfig>,
    pub stats: Arc<AtomicValidationStats>,
}

impl Peer {
    /// Peer with `secret` and any extra configuration pairs. The process
    /// environment is never consulted.
    pub fn with_options(secret: &str, options: &[(&str, &str)]) -> Result<Self, SecurityError> {
        Self::build(secret, options, FixedIdentity::default())
    }

    pub fn build(
        secret: &str,
        options: &[(&str, &str)],
        identity: impl OsIdentity + 'static,
    ) -> Result<Self, SecurityError> {
        let config = Arc::new(PluginConfig::from_pairs(
            std::iter::once((PSK_KEY, secret)).chain(options.iter().copied()),
        ));
        let stats = Arc::new(AtomicValidationStats::new());

        let context = SecurityContext::with_os_identity(config.clone(), identity)
            .with_secret_override(NoOverride)
            .with_stats(stats.clone());

        Ok(Self {
            codec: EnvelopeCodec::new(context)?,
            config,
            stats,
        })
    }

    /// Peer with default options.
    pub fn new(secret: &str) -> Result<Self, SecurityError> {
        Self::with_options(secret, &[])
    }
}
