//! Access token payload peeking
//!
//! Decodes the middle segment of a JWT for display purposes only, the way
//! the web UI shows the signed-in username. The signature is never checked
//! here; the backend remains the sole authority on token validity.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

/// Claims the registry embeds in its access tokens.
///
/// Every field is optional so tokens from older backends still decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Decode a token's payload without verifying it.
///
/// Returns `None` for anything that is not a well-formed JWT.
pub fn peek_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_token(payload: serde_json::Value) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("hdr.{}.sig", encoded)
    }

    #[test]
    fn test_peek_reads_username() {
        let token = fake_token(serde_json::json!({
            "username": "ravi",
            "user_id": 12,
            "exp": 1750000000,
            "token_type": "access"
        }));
        let claims = peek_claims(&token).unwrap();
        assert_eq!(claims.username.as_deref(), Some("ravi"));
        assert_eq!(claims.user_id, Some(12));
    }

    #[test]
    fn test_peek_tolerates_missing_fields() {
        let token = fake_token(serde_json::json!({ "exp": 1750000000 }));
        let claims = peek_claims(&token).unwrap();
        assert!(claims.username.is_none());
        assert_eq!(claims.exp, Some(1750000000));
    }

    #[test]
    fn test_peek_rejects_garbage() {
        assert!(peek_claims("not a token").is_none());
        assert!(peek_claims("hdr.%%%.sig").is_none());
        assert!(peek_claims("").is_none());
    }
}
