//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Password hashing and verification (Argon2id)
//! - HMAC-SHA256 signing, base64url, random keys
//! - Filesystem helpers for atomic writes

pub mod crypto;
pub mod fs;
pub mod password;
