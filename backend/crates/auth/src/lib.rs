//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Credential store implementations
//! - `presentation/` - HTTP handlers, DTOs, router, token gate
//!
//! ## Features
//! - Registration with name, email and password
//! - Login with email and password
//! - Stateless HS256 bearer tokens with a fixed lifetime
//! - Profile lookup for the token's identity
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or returned in plaintext
//! - Unknown email and wrong password are indistinguishable to the client
//! - Tokens cannot be revoked; they lapse at `exp`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryIdentityRepository, postgres::PgIdentityRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
