//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with tunable work factor)
//! - Bearer token issuing and verification (HS256 JWT)
//! - Token extraction from request headers
//! - Secure random bytes

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
