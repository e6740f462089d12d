//! # Domain Layer
//!
//! Pure authentication logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod digest;
pub mod errors;
pub mod identity;
pub mod secret;
pub mod serializer;
