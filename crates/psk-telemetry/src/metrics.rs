//! Prometheus counters for digest verification outcomes.
//!
//! Each [`SecurityMetrics`] owns its registry, so several codecs (or tests) in
//! one process never share counters unless they share the instance.

use crate::TelemetryError;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use psk_auth::ValidationStats;

/// Validated/unvalidated envelope counters.
pub struct SecurityMetrics {
    registry: Registry,
    validated: IntCounter,
    unvalidated: IntCounter,
}

impl SecurityMetrics {
    /// Create and register both counters in a fresh registry.
    pub fn new() -> Result<Self, TelemetryError> {
        let registry = Registry::new();

        let validated = IntCounter::new(
            "psk_messages_validated_total",
            "Envelopes whose digest matched the shared secret",
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        let unvalidated = IntCounter::new(
            "psk_messages_unvalidated_total",
            "Envelopes whose digest did not match the shared secret",
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        registry
            .register(Box::new(validated.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        registry
            .register(Box::new(unvalidated.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        Ok(Self {
            registry,
            validated,
            unvalidated,
        })
    }

    pub fn validated(&self) -> u64 {
        self.validated.get()
    }

    pub fn unvalidated(&self) -> u64 {
        self.unvalidated.get()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode the registry in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

impl ValidationStats for SecurityMetrics {
    fn record_validated(&self) {
        self.validated.inc();
    }

    fn record_unvalidated(&self) {
        self.unvalidated.inc();
    }
}

impl std::fmt::Debug for SecurityMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityMetrics")
            .field("validated", &self.validated())
            .field("unvalidated", &self.unvalidated())
            .finish()
    }
}
