//! # Adapters Layer
//!
//! In-process implementations of the outbound ports.

pub mod config;
pub mod env;
#[cfg(unix)]
pub mod os_identity;
pub mod stats;
