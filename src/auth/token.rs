//! Signed credential verification. Tokens are `base64(payload).base64(tag)`
//! where the payload is `user_id:expiry_unix` and the tag is an
//! HMAC-SHA256 over the payload. Issuance is a consumed interface for
//! session plumbing and tests; only verification is part of the core.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

fn tag(secret: &str, payload: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Issue a signed token for `user_id` valid for `ttl`.
pub fn issue(secret: &str, user_id: &str, ttl: Duration) -> String {
    let expires = (Utc::now() + ttl).timestamp();
    let payload = format!("{}:{}", user_id, expires);
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(&payload),
        URL_SAFE_NO_PAD.encode(tag(secret, &payload))
    )
}

/// Verify a token's signature and expiry, returning the embedded user id.
pub fn verify(secret: &str, token: &str) -> Result<String, AuthError> {
    let malformed = || AuthError::InvalidCredential("malformed token".to_string());

    let (payload_b64, tag_b64) = token.split_once('.').ok_or_else(malformed)?;
    let payload_bytes = URL_SAFE_NO_PAD.decode(payload_b64).map_err(|_| malformed())?;
    let payload = String::from_utf8(payload_bytes).map_err(|_| malformed())?;
    let presented_tag = URL_SAFE_NO_PAD.decode(tag_b64).map_err(|_| malformed())?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&presented_tag)
        .map_err(|_| AuthError::InvalidCredential("signature mismatch".to_string()))?;

    let (user_id, expires) = payload.rsplit_once(':').ok_or_else(malformed)?;
    let expires: i64 = expires.parse().map_err(|_| malformed())?;
    if Utc::now().timestamp() >= expires {
        return Err(AuthError::InvalidCredential("expired token".to_string()));
    }

    Ok(user_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_verifies_to_its_user() {
        let token = issue(SECRET, "user_1", Duration::minutes(5));
        assert_eq!(verify(SECRET, &token), Ok("user_1".to_string()));
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let token = issue(SECRET, "user_1", Duration::minutes(5));
        assert_eq!(
            verify("other-secret", &token),
            Err(AuthError::InvalidCredential("signature mismatch".into()))
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue(SECRET, "user_1", Duration::minutes(-1));
        assert_eq!(
            verify(SECRET, &token),
            Err(AuthError::InvalidCredential("expired token".into()))
        );
    }

    #[test]
    fn garbage_is_malformed() {
        for token in ["", "no-dot", "a.b", "!!!.???"] {
            assert_eq!(
                verify(SECRET, token),
                Err(AuthError::InvalidCredential("malformed token".into())),
                "token {:?} should be malformed",
                token
            );
        }
    }

    #[test]
    fn tampered_payload_fails() {
        let token = issue(SECRET, "user_1", Duration::minutes(5));
        let (_, tag) = token.split_once('.').unwrap();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(format!("user_2:{}", (Utc::now().timestamp()) + 300));
        let forged = format!("{}.{}", forged_payload, tag);
        assert_eq!(
            verify(SECRET, &forged),
            Err(AuthError::InvalidCredential("signature mismatch".into()))
        );
    }

    #[test]
    fn user_ids_containing_colons_survive_the_round_trip() {
        let token = issue(SECRET, "tenant:42", Duration::minutes(5));
        assert_eq!(verify(SECRET, &token), Ok("tenant:42".to_string()));
    }
}
