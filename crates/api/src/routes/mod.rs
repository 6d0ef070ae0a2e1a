//! API route definitions.

use axum::http::{header::USER_AGENT, HeaderMap};
use axum::{middleware, Router};
use uuid::Uuid;

use staffly_db::repositories::AuditContext;

use crate::{middleware::auth::auth_middleware, AppState};

pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(employees::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Builds an audit context from the request headers and the acting user.
pub(crate) fn audit_context(headers: &HeaderMap, actor_id: Uuid) -> AuditContext {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    AuditContext {
        actor_id: Some(actor_id),
        ip_address,
        user_agent,
    }
}
