//! Incident Reporting API
//!
//! Router composition and process configuration for the `api` binary.
//! Split out of `main.rs` so the composed router can be driven in tests.

pub mod app;
pub mod config;

pub use app::{build_app, postgres_app};
pub use config::{AdminBootstrap, ApiConfig};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
