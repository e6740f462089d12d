//! # Shared Types Crate
//!
//! This crate contains the `Envelope<B>` wire model and the option enums that
//! every peer must agree on before exchanging messages.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All wire-level types are defined here.
//! - **Digest Over Bytes**: An `Envelope<Payload>` is what travels on the wire;
//!   the digest always covers the still-serialized body.
//! - **No Negotiation**: Serialization mode and digest scheme are never carried
//!   in the envelope. Peers are configured consistently out of band.

pub mod envelope;
pub mod errors;
pub mod options;
pub mod payload;

pub use envelope::{
    current_timestamp, new_request_id, Envelope, FactFilter, Filter, RequestRouting, WireEnvelope,
};
pub use errors::OptionParseError;
pub use options::{DigestScheme, IdentitySource, SerializationMode};
pub use payload::Payload;
