//! Application Layer
//!
//! Use cases and application services.

pub mod check_token;
pub mod config;
pub mod manage_users;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use check_token::CheckTokenUseCase;
pub use config::AuthConfig;
pub use manage_users::{ManageUsersUseCase, UpdateUserInput};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token::{IssuedToken, TokenClaims, issue_token, verify_token};
