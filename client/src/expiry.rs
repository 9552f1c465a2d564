//! Unverified expiry peeking
//!
//! Decodes the payload segment of a token without checking its signature.
//! This is strictly a scheduling hint for "should I refresh soon"; trust
//! decisions always go through server-side verification.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Reads the `exp` claim out of a token without verifying it
///
/// Returns `None` for anything that does not look like a token with a
/// numeric expiry; callers treat that the same as "expired".
pub fn decoded_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("exp")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user-1","exp":{}}}"#, exp).as_bytes());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_reads_expiry_claim() {
        let token = make_token(1_900_000_000);
        assert_eq!(decoded_expiry(&token), Some(1_900_000_000));
    }

    #[test]
    fn test_garbage_yields_none() {
        assert_eq!(decoded_expiry("not-a-token"), None);
        assert_eq!(decoded_expiry("a.b.c"), None);
        assert_eq!(decoded_expiry(""), None);
    }

    #[test]
    fn test_payload_without_exp_yields_none() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-1"}"#);
        let token = format!("{}.{}.sig", header, payload);
        assert_eq!(decoded_expiry(&token), None);
    }
}
