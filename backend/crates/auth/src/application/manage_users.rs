//! Manage Users Use Case
//!
//! Admin-side user CRUD. Role gating happens in the presentation layer
//! before any of these run.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Full replacement of the editable user fields
pub struct UpdateUserInput {
    pub user_name: String,
    pub role: UserRole,
    /// Re-hashed only when present and non-empty
    pub password: Option<String>,
}

/// Manage users use case
pub struct ManageUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ManageUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list().await
    }

    pub async fn get(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn create(&self, input: SignUpInput) -> AuthResult<User> {
        SignUpUseCase::new(self.user_repo.clone(), self.config.clone())
            .execute(input)
            .await
    }

    pub async fn update(&self, user_id: &UserId, input: UpdateUserInput) -> AuthResult<User> {
        let mut user = self.get(user_id).await?;

        let user_name = UserName::new(input.user_name)?;
        let new_password = match input.password {
            Some(password) if !password.is_empty() => Some(RawPassword::new(password)?),
            _ => None,
        };

        if user_name.canonical() != user.user_name.canonical() {
            if let Some(other) = self.user_repo.find_by_user_name(&user_name).await? {
                if other.user_id != user.user_id {
                    return Err(AuthError::UserNameTaken);
                }
            }
        }

        user.set_user_name(user_name);
        user.set_role(input.role);
        if let Some(raw) = new_password {
            user.set_password(UserPassword::from_raw(&raw, self.config.pepper())?);
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, role = %user.user_role, "User updated");

        Ok(user)
    }

    /// Soft delete
    pub async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let mut user = self.get(user_id).await?;
        user.soft_delete();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User deleted");

        Ok(())
    }

    /// Create `user_name` as admin unless a live user already has it
    ///
    /// Returns `true` when a user was created.
    pub async fn ensure_admin(&self, user_name: &str, password: &str) -> AuthResult<bool> {
        let name = UserName::new(user_name)?;
        if self.user_repo.exists_by_user_name(&name).await? {
            return Ok(false);
        }

        self.create(SignUpInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
            role: UserRole::Admin,
        })
        .await?;

        Ok(true)
    }
}
