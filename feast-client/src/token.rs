//! Local token inspection
//!
//! The client never verifies signatures; it only reads `exp` from the
//! payload to avoid sending tokens the server will refuse anyway.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Deserialize)]
struct Payload {
    exp: i64,
}

/// Expiry (unix seconds) from the token payload, `None` if malformed
pub fn expires_at(token: &str) -> Option<i64> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_sig), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice::<Payload>(&bytes).ok().map(|p| p.exp)
}

/// Malformed tokens count as expired
pub fn is_expired_at(token: &str, now_secs: i64) -> bool {
    expires_at(token).is_none_or(|exp| exp <= now_secs)
}

pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, chrono::Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.sig",
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn reads_expiry_from_payload() {
        let token = token_with(r#"{"sub":"1","exp":2000}"#);
        assert_eq!(expires_at(&token), Some(2000));
        assert!(!is_expired_at(&token, 1999));
        assert!(is_expired_at(&token, 2000));
    }

    #[test]
    fn malformed_tokens_are_expired() {
        for token in ["", "abc", "a.b", "a.!!!.c", &token_with(r#"{"sub":"1"}"#)] {
            assert!(is_expired_at(token, 0), "{token}");
        }
    }
}
