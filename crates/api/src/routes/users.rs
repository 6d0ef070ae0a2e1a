//! User management routes (administrative).

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use staffly_core::policy::{authorize, PolicyError};
use staffly_db::repositories::{UserError, UserRepository};
use staffly_shared::types::{PageRequest, PageResponse, ADMIN_ROLES};

use crate::middleware::auth::AuthUser;
use crate::routes::audit_context;
use crate::AppState;

/// Creates the user management router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}/toggle-status", post(toggle_status))
}

/// Maps a policy failure onto its response. Only `Forbidden` can occur here
/// since the auth middleware already rejected anonymous callers.
pub(crate) fn policy_response(e: PolicyError) -> axum::response::Response {
    match e {
        PolicyError::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unauthorized",
                "message": "Authentication required"
            })),
        )
            .into_response(),
        PolicyError::Forbidden(role) => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": format!("Role '{role}' may not perform this operation")
            })),
        )
            .into_response(),
    }
}

/// GET /users - List user accounts (admins only).
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(e) = authorize(Some(&principal), ADMIN_ROLES) {
        return policy_response(e);
    }

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.list(page).await {
        Ok((users, total)) => Json(PageResponse::new(users, page.clamped(), total)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "Failed to list users"
                })),
            )
                .into_response()
        }
    }
}

/// POST /users/{id}/toggle-status - Flip a user between active and inactive.
///
/// The linked employee record, if any, flips with it.
async fn toggle_status(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(e) = authorize(Some(&principal), ADMIN_ROLES) {
        return policy_response(e);
    }

    let ctx = audit_context(&headers, auth.user_id());
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.toggle_status(id, &ctx).await {
        Ok((user, status)) => {
            info!(user_id = %id, status = %status.as_str(), "User status toggled");
            // The employee directory may now show stale status.
            state.employee_cache.invalidate_all();
            Json(json!({ "user": user, "status": status.as_str() })).into_response()
        }
        Err(UserError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, user_id = %id, "Failed to toggle user status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "Failed to toggle user status"
                })),
            )
                .into_response()
        }
    }
}
