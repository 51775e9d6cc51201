//! Infrastructure Layer
//!
//! Database implementations and an in-memory stand-in.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
