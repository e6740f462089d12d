//! Fuzz target for envelope decoding.
//!
//! Feeds adversarial bytes through `decode` in both serialization modes.
//! Decoding must never panic and must never accept an envelope whose digest
//! was not produced with the configured secret.
//!
//! ## Running
//!
//! ```bash
//! cd crates/psk-auth
//! cargo +nightly fuzz run fuzz_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use psk_auth::{
    EnvelopeCodec, EnvelopeSecurityApi, NoOverride, PluginConfig, SecurityContext,
    SecurityError, PSK_KEY, SERIALIZER_KEY,
};

/// Fuzz input structure for decoding.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Decode with YAML instead of binary
    yaml: bool,
    /// Raw envelope bytes
    bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let serializer = if input.yaml { "yaml" } else { "marshal" };
    let config = PluginConfig::from_pairs([(PSK_KEY, "fuzz-secret"), (SERIALIZER_KEY, serializer)]);

    let context = SecurityContext::new(config).with_secret_override(NoOverride);
    let Ok(codec) = EnvelopeCodec::new(context) else {
        return;
    };

    // Arbitrary bytes are overwhelmingly unreadable or unauthentic; either is
    // fine, a panic is not.
    match codec.decode::<String>(&input.bytes) {
        Ok(envelope) => {
            // Only possible if the fuzzer reconstructed a valid tag
            assert_eq!(envelope.digest.len(), 32);
        }
        Err(SecurityError::Deserialization { .. })
        | Err(SecurityError::AuthenticationFailure { .. }) => {}
        Err(other) => panic!("unexpected error class: {other}"),
    }
});
