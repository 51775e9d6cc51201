//! Bearer Tokens
//!
//! Stateless, self-contained tokens:
//! `base64url(claims JSON) "." base64url(HMAC-SHA256(secret, first part))`.
//! Validity depends only on the signature and `expMs`; there is no
//! server-side record, so a token cannot be revoked before it expires.

use chrono::Utc;
use kernel::id::UserId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::access::Principal;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub sub: UserId,
    pub role: UserRole,
    pub iat_ms: i64,
    pub exp_ms: i64,
}

impl TokenClaims {
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            role: self.role,
        }
    }
}

/// Issued token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at_ms: i64,
}

/// Sign a token for `principal` valid from `now_ms` for the configured TTL
pub fn issue_token(
    config: &AuthConfig,
    principal: Principal,
    now_ms: i64,
) -> AuthResult<IssuedToken> {
    let claims = TokenClaims {
        sub: principal.user_id,
        role: principal.role,
        iat_ms: now_ms,
        exp_ms: now_ms.saturating_add(config.token_ttl_ms()),
    };

    let payload = serde_json::to_vec(&claims)
        .map_err(|e| AuthError::Internal(format!("Failed to encode token claims: {e}")))?;
    let payload_b64 = to_base64url(&payload);
    let signature = hmac_sha256(&config.token_secret, payload_b64.as_bytes());

    Ok(IssuedToken {
        token: format!("{payload_b64}.{}", to_base64url(&signature)),
        expires_at_ms: claims.exp_ms,
    })
}

/// Verify signature and expiry
///
/// ## Errors
/// - `TokenInvalid`: malformed, bad signature or undecodable claims
/// - `TokenExpired`: `now_ms` is at or past `expMs`
pub fn verify_token(config: &AuthConfig, token: &str, now_ms: i64) -> AuthResult<TokenClaims> {
    let (payload_b64, signature_b64) = token.split_once('.').ok_or(AuthError::TokenInvalid)?;
    if payload_b64.is_empty() || signature_b64.contains('.') {
        return Err(AuthError::TokenInvalid);
    }

    let signature = from_base64url(signature_b64).map_err(|_| AuthError::TokenInvalid)?;
    if !verify_hmac_sha256(&config.token_secret, payload_b64.as_bytes(), &signature) {
        return Err(AuthError::TokenInvalid);
    }

    let payload = from_base64url(payload_b64).map_err(|_| AuthError::TokenInvalid)?;
    let claims: TokenClaims =
        serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

    if now_ms >= claims.exp_ms {
        return Err(AuthError::TokenExpired);
    }

    Ok(claims)
}

/// Current time in epoch milliseconds
pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal {
            user_id: UserId::new(),
            role: UserRole::Admin,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let config = AuthConfig::development();
        let p = principal();
        let issued = issue_token(&config, p, 1_000).unwrap();

        assert_eq!(issued.expires_at_ms, 1_000 + config.token_ttl_ms());

        let claims = verify_token(&config, &issued.token, 2_000).unwrap();
        assert_eq!(claims.principal(), p);
        assert_eq!(claims.iat_ms, 1_000);
    }

    #[test]
    fn test_expired_token() {
        let config = AuthConfig::development();
        let issued = issue_token(&config, principal(), 0).unwrap();

        let result = verify_token(&config, &issued.token, issued.expires_at_ms);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = issue_token(&AuthConfig::development(), principal(), 0).unwrap();
        let result = verify_token(&AuthConfig::development(), &issued.token, 1);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let config = AuthConfig::development();
        let issued = issue_token(&config, principal(), 0).unwrap();
        let (_, signature) = issued.token.split_once('.').unwrap();

        let forged_claims = TokenClaims {
            sub: UserId::new(),
            role: UserRole::Admin,
            iat_ms: 0,
            exp_ms: i64::MAX,
        };
        let forged_payload = to_base64url(&serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{forged_payload}.{signature}");

        assert!(matches!(
            verify_token(&config, &forged, 1),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let config = AuthConfig::development();
        for token in ["", "abc", ".", "a.b.c", "!!!.???"] {
            assert!(
                matches!(verify_token(&config, token, 0), Err(AuthError::TokenInvalid)),
                "token {token:?} should be invalid"
            );
        }
    }
}
