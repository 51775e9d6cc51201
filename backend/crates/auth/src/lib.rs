//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, role guard
//! - `application/` - Use cases and token signing
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, extractors, router
//!
//! ## Features
//! - Registration and login with username + password
//! - Stateless HMAC-signed bearer tokens (no revocation before expiry)
//! - Roles `user` and `admin`; admin-only user management
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Password hashing is an explicit use-case step, never a storage hook
//! - Tokens carry user id, role and expiry; the signature covers all three

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::access::{Principal, authorize};
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::extract::{Admin, JsonBody, PathParam};
pub use presentation::middleware::{TokenState, require_bearer};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
