//! User Password Value Object
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: validated user input, zeroized on drop
//! - [`UserPassword`]: Argon2id hash, the only form that is ever persisted

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate raw input
    ///
    /// ## Errors
    /// `AuthError::Validation` when the input is empty, too long, or has
    /// control characters.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => {
                AuthError::Validation("Password is required".to_string())
            }
            other => AuthError::Validation(other.to_string()),
        })?;
        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Rebuild from the PHC string stored in the database
    pub fn from_db(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `false` on mismatch; never an error
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_is_validation_error() {
        let err = RawPassword::new(String::new()).unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg == "Password is required"));
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let err = RawPassword::new("pw\u{0}1".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        assert!(RawPassword::new("pw\t1".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert_ne!(hashed.as_str(), "pw1");
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("pw2".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_from_db_roundtrip() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_db(hashed.as_str()).unwrap();
        assert!(restored.verify(&raw, None));

        assert!(UserPassword::from_db("plaintext").is_err());
    }
}
