//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    pub expires_at_ms: i64,
    pub user: UserResponse,
}

// ============================================================================
// Users
// ============================================================================

/// Public view of a user; the password hash is never part of it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name.original().to_string(),
            role: user.user_role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Admin create-user request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    /// Defaults to `user`
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Admin update-user request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub role: UserRole,
    /// Empty or absent keeps the current password
    #[serde(default)]
    pub password: Option<String>,
}

// ============================================================================
// Common
// ============================================================================

/// Confirmation body for deletes
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_has_no_password() {
        let json = serde_json::to_value(UserResponse {
            id: UserId::new(),
            username: "alice".into(),
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .unwrap();

        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("createdAt"));
        assert_eq!(obj["role"], "user");
        assert!(!obj.keys().any(|k| k.to_lowercase().contains("password")));
    }

    #[test]
    fn test_create_user_request_role_optional() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"bob","password":"pw"}"#).unwrap();
        assert!(req.role.is_none());

        let err = serde_json::from_str::<CreateUserRequest>(
            r#"{"username":"bob","password":"pw","role":"root"}"#,
        );
        assert!(err.is_err());
    }
}
