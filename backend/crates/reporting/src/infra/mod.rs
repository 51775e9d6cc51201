//! Infrastructure Layer
//!
//! Database implementations, an in-memory stand-in, and the filesystem
//! media store.

pub mod media;
pub mod memory;
pub mod postgres;

pub use media::FsMediaStore;
pub use memory::MemoryReportingRepository;
pub use postgres::PgReportingRepository;
