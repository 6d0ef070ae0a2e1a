//! Authentication routes for login, register, and token refresh.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use staffly_core::auth::{hash_password, verify_password};
use staffly_db::repositories::{UserError, UserRepository};
use staffly_shared::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo};
use staffly_shared::types::{Role, Status};

use crate::AppState;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    // Deactivated accounts cannot sign in; the answer is indistinguishable
    // from a bad password so account state leaks nothing.
    if Status::parse(&user.status) != Some(Status::Active) {
        info!(user_id = %user.id, "Login attempt on deactivated account");
        return invalid_credentials();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    }

    let access_token = match state.jwt_service.generate_access_token(user.id, &user.role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during login");
        }
    };
    let refresh_token = match state.jwt_service.generate_refresh_token(user.id, &user.role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error("An error occurred during login");
        }
    };

    info!(user_id = %user.id, "User logged in");

    Json(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
    .into_response()
}

/// POST /auth/register - Create a new account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_failed",
                "message": e.to_string()
            })),
        )
            .into_response();
    }

    let Some(role) = Role::parse(&payload.role) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_role",
                "message": "Role must be one of: Super Admin, Admin, Employee"
            })),
        )
            .into_response();
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed during registration");
            return internal_error("An error occurred during registration");
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo
        .create(&payload.full_name, &payload.email, &password_hash, role)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, role = %user.role, "User registered");
            (
                StatusCode::CREATED,
                Json(json!({
                    "user": UserInfo {
                        id: user.id,
                        email: user.email,
                        full_name: user.full_name,
                        role: user.role,
                    }
                })),
            )
                .into_response()
        }
        Err(UserError::DuplicateEmail(email)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "email_taken",
                "message": format!("Email '{email}' is already registered")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create user");
            internal_error("An error occurred during registration")
        }
    }
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Refresh token is invalid or expired"
                })),
            )
                .into_response();
        }
    };

    // The account may have been deactivated since the token was issued.
    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.find_by_id(claims.user_id()).await {
        Ok(Some(user)) if Status::parse(&user.status) == Some(Status::Active) => {}
        Ok(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Refresh token is invalid or expired"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error("An error occurred during token refresh");
        }
    }

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), &claims.role)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during token refresh");
        }
    };
    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(claims.user_id(), &claims.role)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error("An error occurred during token refresh");
        }
    };

    Json(json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "expires_in": state.jwt_service.access_token_expires_in()
    }))
    .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}
