//! # Validation Counters
//!
//! Lock-free pair of counters implementing [`ValidationStats`].
//!
//! ## Usage
//!
//! ```ignore
//! let stats = Arc::new(AtomicValidationStats::new());
//! let codec = EnvelopeCodec::new(SecurityContext::new(config).with_stats(stats.clone()))?;
//!
//! codec.decode::<Command>(&bytes)?;
//! assert_eq!(stats.snapshot().validated, 1);
//! ```

use crate::ports::outbound::ValidationStats;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe validated/unvalidated counters.
#[derive(Debug, Default)]
pub struct AtomicValidationStats {
    /// Digests that matched
    pub validated: AtomicU64,
    /// Digests that did not match
    pub unvalidated: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub validated: u64,
    pub unvalidated: u64,
}

impl StatsSnapshot {
    /// Total verification outcomes recorded.
    pub fn total(&self) -> u64 {
        self.validated + self.unvalidated
    }
}

impl AtomicValidationStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current counters snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            validated: self.validated.load(Ordering::Relaxed),
            unvalidated: self.unvalidated.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.validated.store(0, Ordering::Relaxed);
        self.unvalidated.store(0, Ordering::Relaxed);
    }
}

impl ValidationStats for AtomicValidationStats {
    fn record_validated(&self) {
        self.validated.fetch_add(1, Ordering::Relaxed);
    }

    fn record_unvalidated(&self) {
        self.unvalidated.fetch_add(1, Ordering::Relaxed);
    }
}
