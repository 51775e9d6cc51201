//! In-Memory Repository
//!
//! Keeps users in a `RwLock<HashMap>`. Test double for the PostgreSQL
//! repository.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user regardless of `deleted_at`
    pub fn find_any(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.read()?.get(user_id).cloned())
    }

    fn read(&self) -> AuthResult<std::sync::RwLockReadGuard<'_, HashMap<UserId, User>>> {
        self.users
            .read()
            .map_err(|_| AuthError::Internal("user store lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, HashMap<UserId, User>>> {
        self.users
            .write()
            .map_err(|_| AuthError::Internal("user store lock poisoned".to_string()))
    }

    fn name_taken_by_other(
        users: &HashMap<UserId, User>,
        user_name: &UserName,
        except: &UserId,
    ) -> bool {
        users.values().any(|u| {
            !u.is_deleted()
                && u.user_id != *except
                && u.user_name.canonical() == user_name.canonical()
        })
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.write()?;
        if Self::name_taken_by_other(&users, &user.user_name, &user.user_id) {
            return Err(AuthError::UserNameTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .read()?
            .get(user_id)
            .filter(|u| !u.is_deleted())
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .read()?
            .values()
            .find(|u| !u.is_deleted() && u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.find_by_user_name(user_name).await?.is_some())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self
            .read()?
            .values()
            .filter(|u| !u.is_deleted())
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.write()?;
        if !users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if !user.is_deleted() && Self::name_taken_by_other(&users, &user.user_name, &user.user_id)
        {
            return Err(AuthError::UserNameTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }
}
