//! Router Composition

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use auth::{PgAuthRepository, auth_router};
use reporting::{PgReportingRepository, ReportingConfig, reporting_router};

use crate::config::ApiConfig;

/// Full application backed by PostgreSQL and the upload directory
pub fn postgres_app(pool: PgPool, config: &ApiConfig) -> Router {
    let auth_config = Arc::new(config.auth.clone());
    let reporting_config = Arc::new(config.reporting.clone());

    let auth = auth_router(PgAuthRepository::new(pool.clone()), auth_config.clone());
    let reporting = reporting_router(
        PgReportingRepository::new(pool),
        reporting_config.clone(),
        auth_config,
    );

    build_app(auth, reporting, &reporting_config, &config.frontend_origins)
}

/// Merge the feature routers, serve uploads and apply the outer layers
pub fn build_app(
    auth: Router,
    reporting: Router,
    reporting_config: &ReportingConfig,
    frontend_origins: &[String],
) -> Router {
    Router::new()
        .merge(auth)
        .merge(reporting)
        .nest_service(
            &reporting_config.public_url_prefix,
            ServeDir::new(&reporting_config.upload_dir),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors(frontend_origins))
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
