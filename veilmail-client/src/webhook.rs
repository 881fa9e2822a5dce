// veilmail-client/src/webhook.rs
//! Verification of inbound webhook callbacks.
//!
//! Each callback carries a lowercase hex HMAC-SHA256 of the raw request body
//! in the `X-Signature-Hash` header, keyed with the endpoint's signing secret.
//! Read the body unparsed, verify it, and reject the request (e.g. with 401)
//! when verification fails.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature
pub const SIGNATURE_HEADER: &str = "X-Signature-Hash";

/// Lowercase hex HMAC-SHA256 of `body` keyed with `secret`
pub fn sign(body: &[u8], secret: &str) -> String {
    // HMAC accepts keys of any length
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check `signature` against the HMAC of `body`.
///
/// The comparison touches every byte regardless of where the first
/// difference is. Empty or malformed signatures simply fail.
pub fn verify_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    let expected = sign(body, secret);
    !expected.is_empty() && constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
