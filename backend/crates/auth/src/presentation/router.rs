//! Auth Router

use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::post,
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::IdentityRepository;
use crate::infra::postgres::PgIdentityRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_token;

/// Create the Auth router with PostgreSQL repository
///
/// Paths are relative; the binary nests this under `/api`.
pub fn auth_router(repo: PgIdentityRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let current_identity = handlers::current_identity::<R>.layer(
        middleware::from_fn_with_state(state.clone(), require_token::<R>),
    );

    Router::new()
        .route("/users", post(handlers::register::<R>))
        .route(
            "/auth",
            post(handlers::login::<R>).get(current_identity),
        )
        .with_state(state)
}
