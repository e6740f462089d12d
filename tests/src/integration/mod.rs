//! Cross-crate flows: two codecs standing in for two peers that share (or do
//! not share) a secret.

pub mod fixtures;

mod round_trip;
mod tampering;
