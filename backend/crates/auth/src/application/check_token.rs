//! Check Token Use Case
//!
//! Turns a presented bearer token into the caller's identity.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{now_ms, verify_token};
use crate::domain::access::Principal;
use crate::error::AuthResult;

/// Check token use case
pub struct CheckTokenUseCase {
    config: Arc<AuthConfig>,
}

impl CheckTokenUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Verify signature and expiry and return the embedded identity
    pub fn execute(&self, token: &str) -> AuthResult<Principal> {
        verify_token(&self.config, token, now_ms()).map(|claims| claims.principal())
    }
}
