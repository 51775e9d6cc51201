//! Reporting Router
//!
//! `/api/incidents` and `/api/tasks`. Every route needs a bearer token;
//! mutations other than reporting an incident need the admin role.
//! Collection routes answer with and without a trailing slash.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
};
use std::sync::Arc;

use auth::{AuthConfig, TokenState, require_bearer};

use crate::application::config::ReportingConfig;
use crate::domain::repository::{IncidentRepository, MediaStore, TaskRepository, UserDirectory};
use crate::infra::{media::FsMediaStore, postgres::PgReportingRepository};
use crate::presentation::handlers::{self, ReportingAppState};

/// Create the reporting router with PostgreSQL and the filesystem store
pub fn reporting_router(
    repo: PgReportingRepository,
    config: Arc<ReportingConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router {
    let media = FsMediaStore::new(&config.upload_dir, config.public_url_prefix.clone());
    reporting_router_generic(Arc::new(repo), Arc::new(media), config, auth_config)
}

/// Create a generic reporting router for any repository and media store
pub fn reporting_router_generic<R, M>(
    repo: Arc<R>,
    media: Arc<M>,
    config: Arc<ReportingConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    R: IncidentRepository + TaskRepository + UserDirectory + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
{
    let state = ReportingAppState { repo, media };

    let incidents = get(handlers::list_incidents::<R, M>)
        .post(handlers::create_incident::<R, M>)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));
    let tasks = get(handlers::list_tasks::<R, M>).post(handlers::create_task::<R, M>);

    Router::new()
        .route("/api/incidents", incidents.clone())
        .route("/api/incidents/", incidents)
        .route(
            "/api/incidents/{id}",
            get(handlers::get_incident::<R, M>)
                .put(handlers::update_incident::<R, M>)
                .delete(handlers::delete_incident::<R, M>),
        )
        .route("/api/tasks", tasks.clone())
        .route("/api/tasks/", tasks)
        .route(
            "/api/tasks/{id}",
            get(handlers::get_task::<R, M>)
                .put(handlers::update_task::<R, M>)
                .delete(handlers::delete_task::<R, M>),
        )
        .route_layer(middleware::from_fn_with_state(
            TokenState::new(auth_config),
            require_bearer,
        ))
        .with_state(state)
}
