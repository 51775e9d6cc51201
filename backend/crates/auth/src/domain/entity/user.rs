//! User Entity
//!
//! Account record: login name, Argon2id password hash and role.
//! Deleting a user only sets `deleted_at`.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique among live users (case-insensitive)
    pub user_name: UserName,
    /// Never the plaintext
    pub password_hash: UserPassword,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with an already hashed password
    pub fn new(user_name: UserName, password_hash: UserPassword, user_role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            user_role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Mark as deleted
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn sample_user() -> User {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        User::new(
            UserName::new("alice").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            UserRole::User,
        )
    }

    #[test]
    fn test_new_user_is_live() {
        let user = sample_user();
        assert!(!user.is_deleted());
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.user_role, UserRole::User);
    }

    #[test]
    fn test_soft_delete_sets_marker() {
        let mut user = sample_user();
        user.soft_delete();
        assert!(user.is_deleted());
        assert_eq!(user.deleted_at, Some(user.updated_at));
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut user = sample_user();
        let before = user.updated_at;
        user.set_role(UserRole::Admin);
        assert!(user.user_role.is_admin());
        assert!(user.updated_at >= before);
    }
}
