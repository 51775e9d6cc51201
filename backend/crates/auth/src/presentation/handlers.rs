//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::{
    ManageUsersUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, UpdateUserInput,
};
use crate::domain::access::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    UpdateUserRequest, UserResponse,
};
use crate::presentation::extract::{Admin, JsonBody, PathParam};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: only the `Arc`s are cloned, `R` itself need not be `Clone`.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn manage_users(&self) -> ManageUsersUseCase<R> {
        ManageUsersUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(SignUpInput {
            user_name: req.username,
            password: req.password,
            role: UserRole::User,
        })
        .await?;

    Ok(Json(user.into()))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token.token,
        token_type: "Bearer",
        expires_at_ms: output.token.expires_at_ms,
        user: output.user.into(),
    }))
}

/// GET /api/auth/me
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state
        .repo
        .find_by_id(&principal.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(user.into()))
}

// ============================================================================
// User Management (admin)
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Admin(_): Admin,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = state.manage_users().list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Admin(_): Admin,
    PathParam(user_id): PathParam<UserId>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state.manage_users().get(&user_id).await?;
    Ok(Json(user.into()))
}

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    Admin(_): Admin,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state
        .manage_users()
        .create(SignUpInput {
            user_name: req.username,
            password: req.password,
            role: req.role.unwrap_or_default(),
        })
        .await?;

    Ok(Json(user.into()))
}

/// PUT /api/users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Admin(_): Admin,
    PathParam(user_id): PathParam<UserId>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state
        .manage_users()
        .update(
            &user_id,
            UpdateUserInput {
                user_name: req.username,
                role: req.role,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Admin(_): Admin,
    PathParam(user_id): PathParam<UserId>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    state.manage_users().delete(&user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
