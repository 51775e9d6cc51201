//! User Name Value Object
//!
//! The login handle. Input is NFKC-normalized and trimmed; the original
//! casing is kept for display while uniqueness is checked on the
//! lowercase canonical form.
//!
//! ## Invariants
//! - 1 to [`USER_NAME_MAX_LENGTH`] characters after normalization
//! - No whitespace or control characters

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooLong { length: usize, max: usize },
    ContainsWhitespace,
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::ContainsWhitespace => write!(f, "User name cannot contain whitespace"),
            Self::InvalidCharacter { char, position } => write!(
                f,
                "Invalid character {:?} at position {position}",
                char
            ),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    /// Trimmed, NFKC-normalized input (preserves case)
    original: String,
    /// Lowercase form for uniqueness
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from a stored value (already validated on the way in)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (position, ch) in name.chars().enumerate() {
            if ch.is_whitespace() {
                return Err(UserNameError::ContainsWhitespace);
            }
            if ch.is_control() {
                return Err(UserNameError::InvalidCharacter { char: ch, position });
            }
        }

        Ok(())
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.original
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.original).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        let name = UserName::new("alice").unwrap();
        assert_eq!(name.original(), "alice");
        assert_eq!(name.canonical(), "alice");

        // "admin" is a legitimate account name here
        assert!(UserName::new("admin").is_ok());
        assert!(UserName::new("a").is_ok());
    }

    #[test]
    fn test_trim_and_case() {
        let name = UserName::new("  Alice  ").unwrap();
        assert_eq!(name.original(), "Alice");
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters fold to ASCII
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
        assert_eq!(
            UserName::new("al ice").unwrap_err(),
            UserNameError::ContainsWhitespace
        );
        assert!(matches!(
            UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(matches!(
            UserName::new("al\u{7}ice"),
            Err(UserNameError::InvalidCharacter { position: 2, .. })
        ));
    }

    #[test]
    fn test_serde_validates() {
        let name: UserName = serde_json::from_str("\"Bob\"").unwrap();
        assert_eq!(name.original(), "Bob");
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Bob\"");
    }
}
