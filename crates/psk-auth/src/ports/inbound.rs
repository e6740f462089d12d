//! # Inbound Ports (Driving Ports / API)
//!
//! The public contract the transport and agent layers call.

use crate::domain::errors::SecurityError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Envelope, RequestRouting};

/// Envelope authentication API.
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no per-call
/// state; callers may invoke them concurrently from any number of threads.
pub trait EnvelopeSecurityApi: Send + Sync {
    /// Signs and serializes a request.
    ///
    /// `routing.caller_id` is replaced with this process's caller id.
    ///
    /// # Errors
    /// - `SecurityError::Configuration` if no secret is configured or the
    ///   caller id source is `identity` without a node identity
    /// - `SecurityError::Serialization` if `message` cannot be encoded
    /// - `SecurityError::IdentityResolution` if the caller id lookup fails
    fn encode_request<T: Serialize + ?Sized>(
        &self,
        sender_id: &str,
        target: &str,
        message: &T,
        request_id: &str,
        routing: RequestRouting,
    ) -> Result<Vec<u8>, SecurityError>;

    /// Signs and serializes a reply. Replies carry no routing.
    ///
    /// # Errors
    /// - `SecurityError::Configuration` if no secret is configured
    /// - `SecurityError::Serialization` if `message` cannot be encoded
    fn encode_reply<T: Serialize + ?Sized>(
        &self,
        sender_id: &str,
        target: &str,
        message: &T,
        request_id: &str,
    ) -> Result<Vec<u8>, SecurityError>;

    /// Deserializes an envelope, verifies its digest, then decodes the body.
    ///
    /// On any error the caller receives nothing of the envelope.
    ///
    /// # Errors
    /// - `SecurityError::Deserialization` if the wrapper or the body is
    ///   unreadable in the configured mode
    /// - `SecurityError::AuthenticationFailure` on digest mismatch; the body
    ///   is never decoded in that case
    /// - `SecurityError::Configuration` if no secret is configured
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Envelope<T>, SecurityError>;

    /// Caller identity of this process, `"<kind>=<value>"`.
    ///
    /// # Errors
    /// - `SecurityError::Configuration` for `identity` without a node identity
    /// - `SecurityError::IdentityResolution` if an OS lookup fails
    fn caller_id(&self) -> Result<String, SecurityError>;
}
