//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed entity identifiers ([`id::UserId`], [`id::IncidentId`], [`id::TaskId`])
//!
//! Only things with one meaning across the whole service belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
