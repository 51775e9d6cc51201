//! Presentation Layer
//!
//! HTTP handlers, DTOs, the multipart form reader, and the router.

pub mod dto;
pub mod form;
pub mod handlers;
pub mod router;

pub use handlers::ReportingAppState;
pub use router::{reporting_router, reporting_router_generic};
