//! # Digest Authenticator
//!
//! Computes and checks the tag that proves possession of the shared secret.
//!
//! ## Schemes
//!
//! | Scheme | Construction | Tag |
//! |--------|--------------|-----|
//! | `Md5Concat` | `md5(serialized_body ++ secret)` | 32 lowercase hex chars |
//! | `HmacSha256` | `HMAC-SHA256(secret, serialized_body)` | 64 lowercase hex chars |
//!
//! `Md5Concat` is the wire format spoken by existing peers. The concatenation
//! order and hash function must not change. It is not a proper MAC; use
//! `HmacSha256` only where every peer has been switched together.
//!
//! ## Security
//!
//! Tags are compared in constant time with `subtle`. Neither the contents nor
//! the length of the received tag leak through timing.

use crate::domain::secret::SharedSecret;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;
use shared_types::DigestScheme;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the lowercase hex tag over `serialized` keyed by `secret`.
pub fn compute_tag(scheme: DigestScheme, serialized: &[u8], secret: &SharedSecret) -> String {
    match scheme {
        DigestScheme::Md5Concat => {
            let mut hasher = Md5::new();
            hasher.update(serialized);
            hasher.update(secret.expose());
            hex::encode(hasher.finalize())
        }
        DigestScheme::HmacSha256 => {
            // HMAC hashes or pads the key to the block size, so no key length
            // is rejected.
            let mut mac = HmacSha256::new_from_slice(secret.expose())
                .expect("HMAC can take key of any size");
            mac.update(serialized);
            hex::encode(mac.finalize().into_bytes())
        }
    }
}

/// Recomputes the tag over `serialized` and compares it with `expected`.
///
/// Returns `true` only on an exact, byte-for-byte match.
pub fn verify_tag(
    scheme: DigestScheme,
    serialized: &[u8],
    secret: &SharedSecret,
    expected: &str,
) -> bool {
    let computed = compute_tag(scheme, serialized, secret);
    constant_time_eq(computed.as_bytes(), expected.as_bytes())
}

/// Constant-time byte comparison over padded buffers.
///
/// Buffers are padded with different bytes so that a length mismatch never
/// compares equal.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let max_len = a.len().max(b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a);
    b_padded[..b.len()].copy_from_slice(b);

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
