//! # Security Errors
//!
//! Error taxonomy for envelope encoding, decoding and caller identity.
//!
//! Every failure is a distinct variant so that callers can alert on
//! "could not parse" differently from "parsed but untrusted" without matching
//! on message text.

use shared_types::{OptionParseError, SerializationMode};
use thiserror::Error;

/// Required configuration is missing or malformed.
///
/// Fatal: a misconfigured peer cannot safely operate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither the environment override nor `plugin.psk` supplies a secret.
    #[error("No plugin.psk configuration option specified")]
    MissingSecret,

    /// `callertype = identity` but no node identity is configured.
    #[error("Caller type is identity but no node identity is configured")]
    MissingIdentity,

    /// An option value is not one of the accepted spellings.
    #[error("Invalid configuration: {0}")]
    InvalidOption(#[from] OptionParseError),

    /// A configuration source could not be parsed.
    #[error("Malformed configuration at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// An OS-level identity lookup failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No group entry exists for the gid.
    #[error("No group entry for gid {gid}")]
    UnknownGroup { gid: u32 },

    /// No login name could be determined for the uid.
    #[error("No login name for uid {uid}")]
    UnknownUser { uid: u32 },

    /// The lookup itself failed.
    #[error("Identity lookup failed: {0}")]
    LookupFailed(String),
}

/// Errors returned by the envelope codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecurityError {
    /// Required configuration is missing or invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A value could not be encoded in the configured mode.
    #[error("Serialization failed using {mode}: {message}")]
    Serialization {
        mode: SerializationMode,
        message: String,
    },

    /// Bytes do not conform to the configured mode. Not a security signal.
    #[error("Deserialization failed using {mode}: {message}")]
    Deserialization {
        mode: SerializationMode,
        message: String,
    },

    /// Digest mismatch. The body was not decoded.
    ///
    /// `sender_id` and `request_id` are copied from the unauthenticated
    /// header as received. Use them for logging only, never for decisions.
    #[error("Received an invalid signature in message {request_id} from {sender_id}")]
    AuthenticationFailure {
        /// Claimed sender, not verified.
        sender_id: String,
        /// Claimed request id, not verified.
        request_id: String,
    },

    /// OS lookup for the selected identity kind failed.
    #[error(transparent)]
    IdentityResolution(#[from] IdentityError),
}

/// Coarse classification for operational policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Fix the configuration; nothing will work until then.
    Configuration,
    /// Malformed input or version mismatch.
    Encoding,
    /// Security event.
    Authentication,
    /// Local OS identity problem.
    Identity,
}

impl SecurityError {
    /// Classifies the error.
    pub fn class(&self) -> ErrorClass {
        match self {
            SecurityError::Configuration(_) => ErrorClass::Configuration,
            SecurityError::Serialization { .. } | SecurityError::Deserialization { .. } => {
                ErrorClass::Encoding
            }
            SecurityError::AuthenticationFailure { .. } => ErrorClass::Authentication,
            SecurityError::IdentityResolution(_) => ErrorClass::Identity,
        }
    }

    /// Returns true for a digest mismatch.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, SecurityError::AuthenticationFailure { .. })
    }

    /// Returns true if the input could not be parsed.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, SecurityError::Deserialization { .. })
    }

    /// Returns true for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SecurityError::Configuration(_))
    }
}

impl From<OptionParseError> for SecurityError {
    fn from(err: OptionParseError) -> Self {
        SecurityError::Configuration(ConfigError::InvalidOption(err))
    }
}
