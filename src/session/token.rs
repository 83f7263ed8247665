//! Advisory bearer-token payload decoding.
//!
//! ERROR HANDLING
//! ==============
//! Decoding fails closed: any structural problem (wrong segment count, bad
//! base64, non-UTF-8, non-JSON) yields `None` so callers treat the token as
//! "no usable claims" instead of crashing. The signature is never verified;
//! the issuing backend is the trust boundary.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Claims carried in a token payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier.
    pub id: String,
    /// Role label as issued; coerced into the closed role enum downstream.
    pub role: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Decode the payload segment of a three-part dot-delimited token.
///
/// The middle segment is base64url-decoded and parsed as JSON claims.
pub fn decode_token(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };
    if payload.is_empty() {
        return None;
    }

    // Tolerate padded emitters; the engine itself expects unpadded input.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&text).ok()
}
