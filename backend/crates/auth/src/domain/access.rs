//! Access Control
//!
//! The authenticated caller and the pure role guard used by every
//! admin-only route.

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Identity carried by a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Allow when `role` satisfies `required`, otherwise `Forbidden`
pub fn authorize(role: UserRole, required: UserRole) -> AuthResult<()> {
    if role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize() {
        assert!(authorize(UserRole::Admin, UserRole::Admin).is_ok());
        assert!(authorize(UserRole::Admin, UserRole::User).is_ok());
        assert!(authorize(UserRole::User, UserRole::User).is_ok());
        assert!(matches!(
            authorize(UserRole::User, UserRole::Admin),
            Err(AuthError::Forbidden)
        ));
    }
}
