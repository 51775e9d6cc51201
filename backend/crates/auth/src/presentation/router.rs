//! Auth Router
//!
//! `/api/auth/*` and the admin `/api/users` routes. Collection routes
//! answer with and without a trailing slash.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{TokenState, require_bearer};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let token_state = TokenState::new(config.clone());
    let state = AuthAppState { repo, config };

    let users = get(handlers::list_users::<R>).post(handlers::create_user::<R>);

    let protected = Router::new()
        .route("/api/auth/me", get(handlers::current_user::<R>))
        .route("/api/users", users.clone())
        .route("/api/users/", users)
        .route(
            "/api/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(middleware::from_fn_with_state(token_state, require_bearer));

    Router::new()
        .route("/api/auth/register", post(handlers::register::<R>))
        .route("/api/auth/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
