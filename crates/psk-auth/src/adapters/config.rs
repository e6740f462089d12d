//! # Plugin Configuration
//!
//! Thread-safe key/value store implementing [`SecurityConfigProvider`].
//!
//! ## Keys
//!
//! | Key | Default | Values |
//! |-----|---------|--------|
//! | `plugin.psk` | none (required) | the shared secret |
//! | `plugin.psk.serializer` | `marshal` | `marshal`, `binary`, `yaml` |
//! | `plugin.psk.callertype` | `uid` | `uid`, `gid`, `group`, `user`, `identity` |
//! | `plugin.psk.digest` | `md5` | `md5`, `hmac-sha256` |
//! | `identity` | none | this node's identity |
//!
//! Values can be replaced at any time with [`PluginConfig::set`]; every read
//! sees the latest value, which is how secret rotation takes effect without a
//! restart.

use crate::domain::errors::ConfigError;
use crate::domain::secret::SharedSecret;
use crate::ports::outbound::SecurityConfigProvider;
use parking_lot::RwLock;
use shared_types::{DigestScheme, IdentitySource, SerializationMode};
use std::collections::HashMap;
use std::str::FromStr;

/// Shared secret.
pub const PSK_KEY: &str = "plugin.psk";
/// Serialization mode.
pub const SERIALIZER_KEY: &str = "plugin.psk.serializer";
/// Caller identity source.
pub const CALLERTYPE_KEY: &str = "plugin.psk.callertype";
/// Digest scheme.
pub const DIGEST_KEY: &str = "plugin.psk.digest";
/// Node identity.
pub const IDENTITY_KEY: &str = "identity";

/// In-memory plugin configuration.
#[derive(Debug, Default)]
pub struct PluginConfig {
    values: RwLock<HashMap<String, String>>,
}

impl PluginConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Parses `key = value` lines.
    ///
    /// Blank lines and lines starting with `#` are ignored. Later keys win.
    ///
    /// # Errors
    ///
    /// `ConfigError::Malformed` for a line without `=` or with an empty key.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Malformed {
                line: index + 1,
                reason: "expected key = value".to_string(),
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Malformed {
                    line: index + 1,
                    reason: "empty key".to_string(),
                });
            }

            values.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self {
            values: RwLock::new(values),
        })
    }

    /// Sets or replaces a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Removes a value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// Reads a value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn parse_option<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr<Err = shared_types::OptionParseError> + Default,
    {
        match self.get(key) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(T::default()),
        }
    }
}

impl SecurityConfigProvider for PluginConfig {
    fn shared_secret(&self) -> Option<SharedSecret> {
        self.values.read().get(PSK_KEY).map(SharedSecret::new)
    }

    fn serialization_mode(&self) -> Result<SerializationMode, ConfigError> {
        self.parse_option(SERIALIZER_KEY)
    }

    fn identity_source(&self) -> Result<IdentitySource, ConfigError> {
        self.parse_option(CALLERTYPE_KEY)
    }

    fn digest_scheme(&self) -> Result<DigestScheme, ConfigError> {
        self.parse_option(DIGEST_KEY)
    }

    fn node_identity(&self) -> Option<String> {
        self.get(IDENTITY_KEY)
    }
}
