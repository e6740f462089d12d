//! # Option Enums
//!
//! Closed enumerations for every configurable choice of the authentication
//! scheme. Each one parses from the string used in plugin configuration and
//! displays back as its canonical spelling.

use crate::errors::OptionParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SERIALIZATION MODE
// =============================================================================

/// Encoding used for both the envelope wrapper and the body inside it.
///
/// The mode is never written into the bytes. Both ends of a conversation must
/// be configured with the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SerializationMode {
    /// Compact positional binary encoding (bincode).
    #[default]
    Binary,
    /// Human-readable YAML.
    Yaml,
}

impl SerializationMode {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SerializationMode::Binary => "marshal",
            SerializationMode::Yaml => "yaml",
        }
    }
}

impl fmt::Display for SerializationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SerializationMode {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marshal" | "binary" | "bincode" => Ok(SerializationMode::Binary),
            "yaml" => Ok(SerializationMode::Yaml),
            _ => Err(OptionParseError {
                option: "serializer",
                value: s.to_string(),
                expected: "marshal, binary, yaml",
            }),
        }
    }
}

// =============================================================================
// IDENTITY SOURCE
// =============================================================================

/// Where the caller identity string is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdentitySource {
    /// Numeric user id of the current process.
    #[default]
    Uid,
    /// Numeric group id of the current process.
    Gid,
    /// Name of the current process group.
    Group,
    /// Login name of the current user.
    User,
    /// The configured node identity.
    Identity,
}

impl IdentitySource {
    /// The `<kind>` prefix used in caller id strings.
    pub fn kind(&self) -> &'static str {
        match self {
            IdentitySource::Uid => "uid",
            IdentitySource::Gid => "gid",
            IdentitySource::Group => "group",
            IdentitySource::User => "user",
            IdentitySource::Identity => "identity",
        }
    }
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl FromStr for IdentitySource {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uid" => Ok(IdentitySource::Uid),
            "gid" => Ok(IdentitySource::Gid),
            "group" => Ok(IdentitySource::Group),
            "user" => Ok(IdentitySource::User),
            "identity" => Ok(IdentitySource::Identity),
            _ => Err(OptionParseError {
                option: "callertype",
                value: s.to_string(),
                expected: "uid, gid, group, user, identity",
            }),
        }
    }
}

// =============================================================================
// DIGEST SCHEME
// =============================================================================

/// Keyed digest construction used to tag envelope bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestScheme {
    /// `md5(body ++ secret)` as lowercase hex. Compatible with existing peers.
    #[default]
    Md5Concat,
    /// HMAC-SHA256 keyed by the secret, lowercase hex. Not wire compatible
    /// with `Md5Concat` peers.
    HmacSha256,
}

impl DigestScheme {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestScheme::Md5Concat => "md5",
            DigestScheme::HmacSha256 => "hmac-sha256",
        }
    }

    /// Length of the hex tag this scheme produces.
    pub fn tag_len(&self) -> usize {
        match self {
            DigestScheme::Md5Concat => 32,
            DigestScheme::HmacSha256 => 64,
        }
    }
}

impl fmt::Display for DigestScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestScheme {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(DigestScheme::Md5Concat),
            "hmac-sha256" | "hmac_sha256" => Ok(DigestScheme::HmacSha256),
            _ => Err(OptionParseError {
                option: "digest",
                value: s.to_string(),
                expected: "md5, hmac-sha256",
            }),
        }
    }
}
