//! Bearer Token Transport
//!
//! Locates the bearer token on an inbound request. A dedicated header
//! (e.g. `x-auth-token`) wins over `Authorization: Bearer <token>`.

use http::{HeaderMap, header};

/// Default header carrying the raw token
pub const DEFAULT_TOKEN_HEADER: &str = "x-auth-token";

/// Extract the token from `header_name`, falling back to the Authorization header
///
/// Empty values are treated as absent.
pub fn extract_token(headers: &HeaderMap, header_name: &str) -> Option<String> {
    let direct = headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = direct {
        return Some(token.to_string());
    }

    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .trim()
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
