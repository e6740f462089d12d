//! # PSK Envelope Authentication
//!
//! Signs outbound request/reply envelopes with a pre-shared key and rejects
//! inbound envelopes whose digest does not prove possession of that key. It
//! also derives the caller identity string consumed by authorization layers.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Serializer, digest, identity projection. No I/O.
//! - **Ports Layer** (`ports/`): Inbound API and the collaborators it needs
//!   (configuration, secret override, OS identity, validation counters).
//! - **Adapters Layer** (`adapters/`): In-process implementations of the ports.
//! - **Service Layer** (`service.rs`): The envelope codec wiring it together.
//!
//! ## Security Notes
//!
//! - **Integrity only**: no encryption, no replay protection, no key rotation
//!   protocol. A rotated secret is picked up on the next call.
//! - **Verify before decode**: the body is never deserialized unless its
//!   digest matched.
//! - **Wire compatibility**: the default digest is `md5(body ++ secret)`. It is
//!   a weak MAC construction kept for interoperability; `hmac-sha256` is an
//!   explicit opt-in that existing peers do not understand.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use psk_auth::{EnvelopeCodec, EnvelopeSecurityApi, PluginConfig, SecurityContext};
//!
//! let config = PluginConfig::from_pairs([("plugin.psk", "topsecret")]);
//! let codec = EnvelopeCodec::new(SecurityContext::new(config))?;
//!
//! let bytes = codec.encode_reply("node1", "/reply/queue", &"pong", "req-1")?;
//! let envelope = codec.decode::<String>(&bytes)?;
//! assert_eq!(envelope.body, "pong");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::config::{
    PluginConfig, CALLERTYPE_KEY, DIGEST_KEY, IDENTITY_KEY, PSK_KEY, SERIALIZER_KEY,
};
pub use adapters::env::{NoOverride, ProcessEnvironment, PSK_ENV_VAR};
pub use adapters::stats::{AtomicValidationStats, StatsSnapshot};
#[cfg(unix)]
pub use adapters::os_identity::SystemIdentity;
pub use domain::digest::{compute_tag, verify_tag};
pub use domain::errors::{ConfigError, ErrorClass, IdentityError, SecurityError};
pub use domain::identity::resolve_caller_id;
pub use domain::secret::{resolve_secret, SharedSecret};
pub use domain::serializer::Serializer;
pub use ports::inbound::EnvelopeSecurityApi;
pub use ports::outbound::{OsIdentity, SecretOverride, SecurityConfigProvider, ValidationStats};
pub use service::{EnvelopeCodec, SecurityContext};

pub use shared_types::{
    DigestScheme, Envelope, FactFilter, Filter, IdentitySource, Payload, RequestRouting,
    SerializationMode, WireEnvelope,
};
