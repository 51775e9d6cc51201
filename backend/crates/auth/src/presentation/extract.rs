//! Request Extractors
//!
//! Wrappers over axum's `Json` and `Path` whose rejections become
//! `AuthError::Validation` (400 with the usual error body), plus the
//! identity extractors fed by the bearer middleware.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use crate::domain::access::{Principal, authorize};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;

/// JSON body; malformed or mistyped input is a 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; an unparsable id is a 400
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AuthError))]
pub struct PathParam<T>(pub T);

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AuthError::MissingToken)
    }
}

/// Caller holding the admin role
///
/// Place before any body extractor so a non-admin gets 403 even when the
/// body is malformed.
#[derive(Debug, Clone, Copy)]
pub struct Admin(pub Principal);

impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        authorize(principal.role, UserRole::Admin)?;
        Ok(Admin(principal))
    }
}
