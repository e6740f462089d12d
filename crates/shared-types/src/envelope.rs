//! # `Envelope` Wire Model
//!
//! The signed wrapper exchanged between peers for both requests and replies.
//!
//! ## Security Properties
//!
//! - **Digest Over Bytes**: On the wire the body is a [`Payload`] holding the
//!   serialized message. The digest is computed over exactly those bytes.
//! - **Verify Before Decode**: A `WireEnvelope` is only turned into an
//!   `Envelope<T>` after its digest has been checked.
//! - **Positional Layout**: Every field is always present. No conditional
//!   skipping, so the binary encoding stays stable.

use crate::payload::Payload;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A single fact comparison inside a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactFilter {
    /// Fact name, e.g. `operatingsystem`.
    pub fact: String,
    /// Comparison operator, e.g. `==`, `=~`, `>=`.
    pub operator: String,
    /// Value to compare against.
    pub value: String,
}

/// Discovery filter attached to requests.
///
/// Opaque to the authentication layer; it is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Fact comparisons.
    pub fact: Vec<FactFilter>,
    /// Configuration management classes.
    pub cf_class: Vec<String>,
    /// Agents that must be present.
    pub agent: Vec<String>,
    /// Node identities.
    pub identity: Vec<String>,
}

impl Filter {
    /// Creates an empty filter (matches every node).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.fact.is_empty()
            && self.cf_class.is_empty()
            && self.agent.is_empty()
            && self.identity.is_empty()
    }

    /// Adds a fact constraint.
    pub fn with_fact(
        mut self,
        fact: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fact.push(FactFilter {
            fact: fact.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a class constraint.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.cf_class.push(class.into());
        self
    }

    /// Adds an agent constraint.
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent.push(agent.into());
        self
    }

    /// Adds an identity constraint.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity.push(identity.into());
        self
    }
}

/// Routing metadata that only requests carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRouting {
    /// Discovery filter.
    pub filter: Filter,
    /// Target agent name.
    pub agent: Option<String>,
    /// Target collective (sub-network).
    pub collective: Option<String>,
    /// Caller identity of the originator, `"<kind>=<value>"`.
    ///
    /// Filled in by the codec at encode time; any value supplied by the
    /// caller is overwritten.
    pub caller_id: String,
}

impl RequestRouting {
    /// Routing with the given filter and no agent or collective.
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Sets the target agent.
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Sets the target collective.
    pub fn with_collective(mut self, collective: impl Into<String>) -> Self {
        self.collective = Some(collective.into());
        self
    }
}

/// The unit exchanged between peers.
///
/// `B` is [`Payload`] while the envelope is untrusted (see [`WireEnvelope`]),
/// and the caller's message type once the digest has been verified and the
/// body decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<B> {
    // =========================================================================
    // HEADER SECTION
    // =========================================================================
    /// Identity of the originating peer.
    pub sender_id: String,

    /// Correlates a reply to its request.
    pub request_id: String,

    /// Destination address (topic/queue name), opaque to this layer.
    pub target: String,

    /// Unix timestamp (seconds) at encode time.
    pub msg_time: u64,

    /// Request routing. `None` for replies.
    pub routing: Option<RequestRouting>,

    // =========================================================================
    // PAYLOAD SECTION
    // =========================================================================
    /// Serialized body on the wire, decoded body after verification.
    pub body: B,

    // =========================================================================
    // SECURITY SECTION
    // =========================================================================
    /// Hex digest over the serialized body and the shared secret.
    pub digest: String,
}

/// An envelope as read off the wire: body still serialized, digest unchecked.
pub type WireEnvelope = Envelope<Payload>;

impl<B> Envelope<B> {
    /// Returns true if this envelope is a request.
    pub fn is_request(&self) -> bool {
        self.routing.is_some()
    }

    /// Returns true if this envelope is a reply.
    pub fn is_reply(&self) -> bool {
        self.routing.is_none()
    }

    /// Replaces the body, keeping every header field.
    pub fn map_body<C>(self, f: impl FnOnce(B) -> C) -> Envelope<C> {
        Envelope {
            sender_id: self.sender_id,
            request_id: self.request_id,
            target: self.target,
            msg_time: self.msg_time,
            routing: self.routing,
            body: f(self.body),
            digest: self.digest,
        }
    }

    /// Fallible [`Envelope::map_body`]. On error nothing of the envelope is
    /// returned.
    pub fn try_map_body<C, E>(self, f: impl FnOnce(B) -> Result<C, E>) -> Result<Envelope<C>, E> {
        let body = f(self.body)?;
        Ok(Envelope {
            sender_id: self.sender_id,
            request_id: self.request_id,
            target: self.target,
            msg_time: self.msg_time,
            routing: self.routing,
            body,
            digest: self.digest,
        })
    }
}

/// Returns the current Unix timestamp.
///
/// If the system clock is before UNIX_EPOCH it returns 0.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Generates a fresh request id: 32 lowercase hex characters.
pub fn new_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}
