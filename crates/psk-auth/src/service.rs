//! # Envelope Codec Service
//!
//! Application service implementing [`EnvelopeSecurityApi`].
//!
//! ## Flows
//!
//! ```text
//! outbound:  message ──serialize──▶ body ──digest──▶ tag
//!                                    └──── Envelope{header, body, tag} ──serialize──▶ bytes
//!
//! inbound:   bytes ──deserialize──▶ WireEnvelope ──verify(body, tag)──▶ deserialize(body)
//!                                                     │
//!                                                     └─ mismatch: AuthenticationFailure,
//!                                                        body never decoded
//! ```
//!
//! The codec holds no per-call state. Serialization mode and digest scheme are
//! resolved once at construction; the secret, caller identity source and node
//! identity are read from configuration on every call.

use crate::adapters::env::ProcessEnvironment;
use crate::adapters::stats::AtomicValidationStats;
use crate::domain::digest::{compute_tag, verify_tag};
use crate::domain::errors::SecurityError;
use crate::domain::identity::resolve_caller_id;
use crate::domain::secret::{resolve_secret, SharedSecret};
use crate::domain::serializer::Serializer;
use crate::ports::inbound::EnvelopeSecurityApi;
use crate::ports::outbound::{OsIdentity, SecretOverride, SecurityConfigProvider, ValidationStats};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{current_timestamp, DigestScheme, Envelope, RequestRouting, WireEnvelope};
use std::sync::Arc;
use tracing::{debug, warn};

// =============================================================================
// SECURITY CONTEXT
// =============================================================================

/// Collaborators injected into the codec.
///
/// One context (and therefore one counter pair) is normally shared by every
/// codec in a process. Cloning is cheap.
#[derive(Clone)]
pub struct SecurityContext {
    /// Plugin configuration
    pub config: Arc<dyn SecurityConfigProvider>,
    /// Consulted before `config` for the secret
    pub secret_override: Arc<dyn SecretOverride>,
    /// Process/OS identity primitives
    pub os_identity: Arc<dyn OsIdentity>,
    /// Decode outcome counters
    pub stats: Arc<dyn ValidationStats>,
}

impl SecurityContext {
    /// Context over `config` with the process environment as secret override,
    /// the live OS identity and fresh atomic counters.
    #[cfg(unix)]
    pub fn new(config: impl SecurityConfigProvider + 'static) -> Self {
        Self::with_os_identity(config, crate::adapters::os_identity::SystemIdentity)
    }

    /// Like [`SecurityContext::new`] with an explicit OS identity source.
    pub fn with_os_identity(
        config: impl SecurityConfigProvider + 'static,
        os_identity: impl OsIdentity + 'static,
    ) -> Self {
        Self {
            config: Arc::new(config),
            secret_override: Arc::new(ProcessEnvironment),
            os_identity: Arc::new(os_identity),
            stats: Arc::new(AtomicValidationStats::new()),
        }
    }

    /// Replaces the secret override source.
    pub fn with_secret_override(mut self, secret_override: impl SecretOverride + 'static) -> Self {
        self.secret_override = Arc::new(secret_override);
        self
    }

    /// Replaces the OS identity source.
    pub fn with_identity(mut self, os_identity: impl OsIdentity + 'static) -> Self {
        self.os_identity = Arc::new(os_identity);
        self
    }

    /// Replaces the counters sink.
    pub fn with_stats(mut self, stats: Arc<dyn ValidationStats>) -> Self {
        self.stats = stats;
        self
    }
}

// =============================================================================
// ENVELOPE CODEC
// =============================================================================

/// Signs, serializes, verifies and decodes envelopes.
#[derive(Clone)]
pub struct EnvelopeCodec {
    context: SecurityContext,
    serializer: Serializer,
    digest: DigestScheme,
}

impl EnvelopeCodec {
    /// Creates a codec, resolving serialization mode and digest scheme.
    ///
    /// # Errors
    ///
    /// `SecurityError::Configuration` if either option has an unknown value.
    pub fn new(context: SecurityContext) -> Result<Self, SecurityError> {
        let mode = context.config.serialization_mode()?;
        let digest = context.config.digest_scheme()?;

        debug!(serializer = %mode, digest = %digest, "Envelope codec configured");
        if digest != DigestScheme::Md5Concat {
            warn!(digest = %digest, "Non-default digest scheme; md5 peers will reject our envelopes");
        }

        Ok(Self {
            context,
            serializer: Serializer::new(mode),
            digest,
        })
    }

    /// The serializer this codec uses.
    pub fn serializer(&self) -> Serializer {
        self.serializer
    }

    /// The digest scheme this codec uses.
    pub fn digest_scheme(&self) -> DigestScheme {
        self.digest
    }

    fn secret(&self) -> Result<SharedSecret, SecurityError> {
        Ok(resolve_secret(
            self.context.secret_override.as_ref(),
            self.context.config.as_ref(),
        )?)
    }

    /// Serializes `message`, tags it and serializes the assembled envelope.
    fn seal<T: Serialize + ?Sized>(
        &self,
        sender_id: &str,
        target: &str,
        message: &T,
        request_id: &str,
        routing: Option<RequestRouting>,
    ) -> Result<Vec<u8>, SecurityError> {
        // Secret first: a misconfigured peer fails before doing any work.
        let secret = self.secret()?;

        let body = self.serializer.serialize(message)?;
        let digest = compute_tag(self.digest, &body, &secret);

        let envelope = WireEnvelope {
            sender_id: sender_id.to_string(),
            request_id: request_id.to_string(),
            target: target.to_string(),
            msg_time: current_timestamp(),
            routing,
            body: body.into(),
            digest,
        };

        self.serializer.serialize(&envelope)
    }
}

impl EnvelopeSecurityApi for EnvelopeCodec {
    fn encode_request<T: Serialize + ?Sized>(
        &self,
        sender_id: &str,
        target: &str,
        message: &T,
        request_id: &str,
        mut routing: RequestRouting,
    ) -> Result<Vec<u8>, SecurityError> {
        routing.caller_id = self.caller_id()?;
        self.seal(sender_id, target, message, request_id, Some(routing))
    }

    fn encode_reply<T: Serialize + ?Sized>(
        &self,
        sender_id: &str,
        target: &str,
        message: &T,
        request_id: &str,
    ) -> Result<Vec<u8>, SecurityError> {
        self.seal(sender_id, target, message, request_id, None)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Envelope<T>, SecurityError> {
        // 1. Unwrap the envelope; the body stays serialized
        let envelope: WireEnvelope = self.serializer.deserialize(bytes)?;

        // 2. Verify the digest over the still-serialized body
        let secret = self.secret()?;
        if !verify_tag(self.digest, &envelope.body, &secret, &envelope.digest) {
            self.context.stats.record_unvalidated();
            warn!(
                sender_id = %envelope.sender_id,
                request_id = %envelope.request_id,
                "Received an invalid signature in message"
            );
            return Err(SecurityError::AuthenticationFailure {
                sender_id: envelope.sender_id,
                request_id: envelope.request_id,
            });
        }
        self.context.stats.record_validated();

        // 3. Only now decode the body
        let serializer = self.serializer;
        envelope.try_map_body(|body| serializer.deserialize(&body))
    }

    fn caller_id(&self) -> Result<String, SecurityError> {
        let source = self.context.config.identity_source()?;
        let node_identity = self.context.config.node_identity();
        resolve_caller_id(
            source,
            self.context.os_identity.as_ref(),
            node_identity.as_deref(),
        )
    }
}
