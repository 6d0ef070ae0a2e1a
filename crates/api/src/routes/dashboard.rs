//! Dashboard endpoint: headcount summary plus the quote of the day.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tracing::error;

use staffly_db::repositories::EmployeeRepository;

use crate::middleware::auth::AuthUser;
use crate::AppState;

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// GET /dashboard - Headcount summary and quote of the day.
///
/// Available to any authenticated user; the quote is best effort and never
/// fails the request.
async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(rejection) = auth.principal() {
        return rejection.into_response();
    }

    let repo = EmployeeRepository::new((*state.db).clone());
    let (active, inactive) = match repo.count_by_status().await {
        Ok(counts) => counts,
        Err(e) => {
            error!(error = %e, "Failed to load dashboard counts");
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "Failed to load dashboard"
                })),
            )
                .into_response();
        }
    };

    let quote = state.quotes.quote_of_the_day().await;

    Json(json!({
        "date": chrono::Utc::now().date_naive(),
        "total_employees": active + inactive,
        "active_employees": active,
        "inactive_employees": inactive,
        "quote": quote
    }))
    .into_response()
}
