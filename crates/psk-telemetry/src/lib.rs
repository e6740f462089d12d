//! # PSK Telemetry
//!
//! Observability for the envelope authentication layer.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an env filter, plain or JSON output
//! - **Metrics**: Prometheus counters for validated/unvalidated envelopes,
//!   usable directly as the codec's `ValidationStats` sink
//!
//! ## Usage
//!
//! ```rust,ignore
//! use psk_telemetry::{init_logging, SecurityMetrics, TelemetryConfig};
//!
//! init_logging(&TelemetryConfig::from_env())?;
//!
//! let metrics = Arc::new(SecurityMetrics::new()?);
//! let context = SecurityContext::new(config).with_stats(metrics.clone());
//! // ...
//! println!("{}", metrics.render()?);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PSK_SERVICE_NAME` | `psk-auth` | Service name in log lines |
//! | `PSK_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `PSK_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `PSK_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::SecurityMetrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
