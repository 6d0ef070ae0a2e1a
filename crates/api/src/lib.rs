//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Quote-of-the-day client
//! - Response types

pub mod middleware;
pub mod quotes;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use staffly_core::upload::UploadStore;
use staffly_shared::JwtService;

use crate::quotes::QuoteClient;

/// How long a cached employee directory page stays fresh.
const EMPLOYEE_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Storage service for ID-proof uploads.
    pub uploads: Arc<UploadStore>,
    /// Quote-of-the-day client for the dashboard.
    pub quotes: QuoteClient,
    /// Cached employee directory pages, keyed by (page, per_page).
    pub employee_cache: Cache<(u32, u32), serde_json::Value>,
    /// Where upload policy violations redirect to.
    pub upload_redirect: String,
}

impl AppState {
    /// Builds the employee directory cache with the standard TTL.
    #[must_use]
    pub fn build_employee_cache() -> Cache<(u32, u32), serde_json::Value> {
        Cache::builder()
            .max_capacity(256)
            .time_to_live(EMPLOYEE_CACHE_TTL)
            .build()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
