//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::{Admin, JsonBody, PathParam};
pub use handlers::AuthAppState;
pub use middleware::{TokenState, require_bearer};
pub use router::{auth_router, auth_router_generic};
