//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::CheckTokenUseCase;
use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct TokenState {
    pub config: Arc<AuthConfig>,
}

impl TokenState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }
}

/// Middleware that requires a valid bearer token
///
/// On success the caller's `Principal` is stored in the request
/// extensions for the `Principal` and `Admin` extractors.
pub async fn require_bearer(
    State(state): State<TokenState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers())?;

    let principal = CheckTokenUseCase::new(state.config.clone()).execute(token)?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::TokenInvalid)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::TokenInvalid)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::TokenInvalid);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(extract_bearer(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_extract_bearer_errors() {
        assert!(matches!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            extract_bearer(&headers("Basic dXNlcjpwdw==")),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(
            extract_bearer(&headers("Bearer")),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(
            extract_bearer(&headers("Bearer  ")),
            Err(AuthError::MissingToken)
        ));
    }
}
