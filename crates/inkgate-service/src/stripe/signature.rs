//! Stripe webhook signature verification.
//!
//! The `stripe-signature` header has the form `t=<unix_ts>,v1=<hex>[,v1=…]`.
//! The signed payload is `{t}.{raw_body}`, so verification must run over the
//! exact request bytes before any JSON parsing.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::crypto::{constant_time_eq, hmac_sha256_hex};

/// Maximum accepted age of a signed payload, matching the provider's default.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Errors from webhook signature verification.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The signature header is absent.
    #[error("missing stripe-signature header")]
    MissingHeader,

    /// The header carries no timestamp element.
    #[error("no timestamp in signature header")]
    MissingTimestamp,

    /// The timestamp element is not a unix timestamp.
    #[error("invalid timestamp in signature header")]
    InvalidTimestamp,

    /// The header carries no `v1` signature elements.
    #[error("no v1 signatures in signature header")]
    NoSignatures,

    /// The timestamp is older than the accepted tolerance.
    #[error("timestamp outside tolerance")]
    StaleTimestamp,

    /// No `v1` signature matches the payload.
    #[error("signature mismatch")]
    Mismatch,
}

/// Verify a `stripe-signature` header against the raw payload bytes.
///
/// # Errors
///
/// Returns a [`SignatureError`] describing the first check that failed.
pub fn verify(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<&str> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in header.split(',') {
        let mut kv = part.splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(ts)) => timestamp = Some(ts),
            (Some("v1"), Some(sig)) => signatures.push(sig),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
    let timestamp_secs: u64 = timestamp
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp)?;

    if signatures.is_empty() {
        return Err(SignatureError::NoSignatures);
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    if now.saturating_sub(timestamp_secs) > tolerance.as_secs() {
        return Err(SignatureError::StaleTimestamp);
    }

    // Signed payload is "{t}.{body}" over the exact body bytes.
    let mut signed_payload = Vec::with_capacity(timestamp.len() + 1 + payload.len());
    signed_payload.extend_from_slice(timestamp.as_bytes());
    signed_payload.push(b'.');
    signed_payload.extend_from_slice(payload);

    let expected = hmac_sha256_hex(secret, &signed_payload);

    if signatures.iter().any(|sig| constant_time_eq(&expected, sig)) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn sign(payload: &[u8], timestamp: u64) -> String {
        let mut signed = Vec::new();
        signed.extend_from_slice(timestamp.to_string().as_bytes());
        signed.push(b'.');
        signed.extend_from_slice(payload);
        format!("t={timestamp},v1={}", hmac_sha256_hex(SECRET, &signed))
    }

    #[test]
    fn valid_signature_verifies() {
        let payload = br#"{"id":"evt_1","type":"checkout.session.completed"}"#;
        let header = sign(payload, now_secs());

        assert!(verify(payload, &header, SECRET, DEFAULT_TOLERANCE).is_ok());
    }

    #[test]
    fn tampered_payload_fails() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = sign(payload, now_secs());

        let result = verify(br#"{"id":"evt_2"}"#, &header, SECRET, DEFAULT_TOLERANCE);
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn wrong_secret_fails() {
        let payload = b"body";
        let header = sign(payload, now_secs());

        let result = verify(payload, &header, "whsec_other", DEFAULT_TOLERANCE);
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn stale_timestamp_fails() {
        let payload = b"body";
        let header = sign(payload, now_secs() - 600);

        let result = verify(payload, &header, SECRET, DEFAULT_TOLERANCE);
        assert!(matches!(result, Err(SignatureError::StaleTimestamp)));
    }

    #[test]
    fn header_without_timestamp_fails() {
        let result = verify(b"body", "v1=abc", SECRET, DEFAULT_TOLERANCE);
        assert!(matches!(result, Err(SignatureError::MissingTimestamp)));
    }

    #[test]
    fn header_without_signatures_fails() {
        let header = format!("t={}", now_secs());
        let result = verify(b"body", &header, SECRET, DEFAULT_TOLERANCE);
        assert!(matches!(result, Err(SignatureError::NoSignatures)));
    }

    #[test]
    fn one_matching_signature_among_many_is_enough() {
        let payload = b"body";
        let ts = now_secs();
        let good = sign(payload, ts);
        // Prepend a bogus v1; header order must not matter.
        let header = format!("t={ts},v1=deadbeef,{}", &good[good.find("v1=").unwrap()..]);

        assert!(verify(payload, &header, SECRET, DEFAULT_TOLERANCE).is_ok());
    }
}
