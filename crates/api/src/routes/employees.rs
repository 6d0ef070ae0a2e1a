//! Employee management routes.
//!
//! Admins manage the full directory; an Employee-role caller can only read
//! their own record and download their own salary slip.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use staffly_core::payroll::breakup_salary;
use staffly_core::policy::{authorize, Principal};
use staffly_core::slip::{render_salary_slip, SlipData};
use staffly_core::upload::UploadError;
use staffly_db::repositories::{
    CreateEmployeeInput, EmployeeError, EmployeeRepository, EmployeeWithUser, UpdateEmployeeInput,
};
use staffly_shared::types::{PageRequest, PageResponse, ADMIN_ROLES};

use crate::middleware::auth::AuthUser;
use crate::routes::{audit_context, users::policy_response};
use crate::AppState;

/// Body limit for the ID-proof route; generous so the stream-side size
/// check is the one that decides, not the framework default.
const UPLOAD_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Creates the employee router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/{id}", get(get_employee).put(update_employee))
        .route("/employees/{id}/toggle-status", post(toggle_status))
        .route("/employees/{id}/salary-slip", get(salary_slip))
        .route(
            "/employees/{id}/id-proof",
            post(upload_id_proof).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

/// Employee record joined with its account, as returned by the API.
#[derive(Debug, Serialize)]
struct EmployeeView {
    id: Uuid,
    user_id: Uuid,
    full_name: String,
    email: String,
    role: String,
    phone: String,
    department: String,
    designation: String,
    salary: Option<Decimal>,
    hire_date: NaiveDate,
    dob: NaiveDate,
    status: String,
    id_proof: Option<String>,
}

impl From<EmployeeWithUser> for EmployeeView {
    fn from(row: EmployeeWithUser) -> Self {
        Self {
            id: row.employee.id,
            user_id: row.user.id,
            full_name: row.user.full_name,
            email: row.user.email,
            role: row.user.role,
            phone: row.employee.phone,
            department: row.employee.department,
            designation: row.employee.designation,
            salary: row.employee.salary,
            hire_date: row.employee.hire_date,
            dob: row.employee.dob,
            status: row.employee.status,
            id_proof: row.employee.id_proof,
        }
    }
}

/// Payload for creating an employee.
#[derive(Debug, Deserialize, Validate)]
struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 120))]
    full_name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 5, max = 20))]
    phone: String,
    #[validate(length(min = 1, max = 80))]
    department: String,
    #[validate(length(min = 1, max = 80))]
    designation: String,
    salary: Option<Decimal>,
    hire_date: NaiveDate,
    dob: NaiveDate,
}

/// Payload for updating an employee. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 120))]
    full_name: Option<String>,
    #[validate(length(min = 5, max = 20))]
    phone: Option<String>,
    #[validate(length(min = 1, max = 80))]
    department: Option<String>,
    #[validate(length(min = 1, max = 80))]
    designation: Option<String>,
    salary: Option<Decimal>,
    hire_date: Option<NaiveDate>,
    dob: Option<NaiveDate>,
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Employee not found"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}

/// Whether the caller may read this particular employee record.
fn may_read(principal: &Principal, row: &EmployeeWithUser) -> bool {
    principal.role.is_admin() || row.user.id == principal.id.into_inner()
}

/// Salary values below zero never reach the repository; the schema also
/// rejects them, but that would surface as a 500 instead of a 400.
fn salary_is_negative(salary: Option<Decimal>) -> bool {
    salary.is_some_and(|s| s.is_sign_negative())
}

fn negative_salary_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "validation_failed",
            "message": "Salary must not be negative"
        })),
    )
        .into_response()
}

/// Single-record page for an Employee-role caller; at most their own record,
/// with pagination meta echoing the caller's request.
fn self_view_page(view: Option<EmployeeView>, request: PageRequest) -> PageResponse<EmployeeView> {
    let data: Vec<EmployeeView> = view.into_iter().collect();
    let total = data.len() as u64;
    PageResponse::new(data, request, total)
}

/// GET /employees - List the employee directory.
///
/// Admins get the full paginated directory; an Employee-role caller gets a
/// single-element page holding only their own record. Directory pages are
/// served from a short-lived cache; every mutation below clears it.
async fn list_employees(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };

    let page = page.clamped();

    if !principal.role.is_admin() {
        let repo = EmployeeRepository::new((*state.db).clone());
        return match repo.find_by_user_id(principal.id.into_inner()).await {
            Ok(row) => Json(self_view_page(row.map(EmployeeView::from), page)).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to load own employee record");
                internal_error("Failed to list employees")
            }
        };
    }

    let cache_key = (page.page, page.per_page);
    if let Some(cached) = state.employee_cache.get(&cache_key).await {
        return Json(cached).into_response();
    }

    let repo = EmployeeRepository::new((*state.db).clone());
    match repo.list(page).await {
        Ok((rows, total)) => {
            let views: Vec<EmployeeView> = rows.into_iter().map(EmployeeView::from).collect();
            let body = match serde_json::to_value(PageResponse::new(views, page, total)) {
                Ok(v) => v,
                Err(e) => {
                    error!(error = %e, "Failed to serialize employee page");
                    return internal_error("Failed to list employees");
                }
            };
            state.employee_cache.insert(cache_key, body.clone()).await;
            Json(body).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list employees");
            internal_error("Failed to list employees")
        }
    }
}

/// GET /employees/{id} - Fetch one employee.
///
/// Admins may fetch anyone; an Employee-role caller only their own record.
async fn get_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };

    let repo = EmployeeRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(Some(row)) => {
            if !may_read(&principal, &row) {
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "forbidden",
                        "message": "You may only view your own record"
                    })),
                )
                    .into_response();
            }
            Json(EmployeeView::from(row)).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, employee_id = %id, "Failed to fetch employee");
            internal_error("Failed to fetch employee")
        }
    }
}

/// POST /employees - Create an employee with its user account (admins only).
async fn create_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Json(payload): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(e) = authorize(Some(&principal), ADMIN_ROLES) {
        return policy_response(e);
    }

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

    if salary_is_negative(payload.salary) {
        return negative_salary_response();
    }

    let ctx = audit_context(&headers, auth.user_id());
    let repo = EmployeeRepository::new((*state.db).clone());
    let input = CreateEmployeeInput {
        full_name: payload.full_name,
        email: payload.email,
        phone: payload.phone,
        department: payload.department,
        designation: payload.designation,
        salary: payload.salary,
        hire_date: payload.hire_date,
        dob: payload.dob,
    };

    match repo.create(input, &ctx).await {
        Ok(row) => {
            info!(employee_id = %row.employee.id, "Employee created");
            state.employee_cache.invalidate_all();
            (StatusCode::CREATED, Json(EmployeeView::from(row))).into_response()
        }
        Err(EmployeeError::DuplicateEmail(email)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "email_taken",
                "message": format!("Email '{email}' is already registered")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create employee");
            internal_error("Failed to create employee")
        }
    }
}

/// PUT /employees/{id} - Update an employee (admins only).
async fn update_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(e) = authorize(Some(&principal), ADMIN_ROLES) {
        return policy_response(e);
    }

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

    if salary_is_negative(payload.salary) {
        return negative_salary_response();
    }

    let ctx = audit_context(&headers, auth.user_id());
    let repo = EmployeeRepository::new((*state.db).clone());
    let input = UpdateEmployeeInput {
        full_name: payload.full_name,
        phone: payload.phone,
        department: payload.department,
        designation: payload.designation,
        salary: payload.salary.map(Some),
        hire_date: payload.hire_date,
        dob: payload.dob,
    };

    match repo.update(id, input, &ctx).await {
        Ok(row) => {
            info!(employee_id = %id, "Employee updated");
            state.employee_cache.invalidate_all();
            Json(EmployeeView::from(row)).into_response()
        }
        Err(EmployeeError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, employee_id = %id, "Failed to update employee");
            internal_error("Failed to update employee")
        }
    }
}

/// POST /employees/{id}/toggle-status - Flip an employee between active and
/// inactive, together with its user account (admins only).
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
    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.toggle_status(id, &ctx).await {
        Ok((row, status)) => {
            info!(employee_id = %id, status = %status.as_str(), "Employee status toggled");
            state.employee_cache.invalidate_all();
            Json(json!({
                "employee": EmployeeView::from(row),
                "status": status.as_str()
            }))
            .into_response()
        }
        Err(EmployeeError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, employee_id = %id, "Failed to toggle employee status");
            internal_error("Failed to toggle employee status")
        }
    }
}

/// GET /employees/{id}/salary-slip - Download the salary slip PDF.
///
/// Admins may download anyone's slip; an Employee-role caller only their own.
/// Responds 400 when no salary is on record.
async fn salary_slip(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };

    let repo = EmployeeRepository::new((*state.db).clone());
    let row = match repo.find_by_id(id).await {
        Ok(Some(row)) => row,
        Ok(None) => return not_found(),
        Err(e) => {
            error!(error = %e, employee_id = %id, "Failed to fetch employee for slip");
            return internal_error("Failed to generate salary slip");
        }
    };

    if !may_read(&principal, &row) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "You may only download your own salary slip"
            })),
        )
            .into_response();
    }

    let Some(gross) = row.employee.salary else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "salary_not_set",
                "message": "No salary is on record for this employee"
            })),
        )
            .into_response();
    };

    let breakup = breakup_salary(gross);
    let pdf = render_salary_slip(
        &SlipData {
            full_name: &row.user.full_name,
            department: &row.employee.department,
            designation: &row.employee.designation,
            gross,
        },
        &breakup,
    );

    let filename = format!("salary_slip_{}.pdf", sanitize_filename(&row.user.full_name));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    )
        .into_response()
}

/// POST /employees/{id}/id-proof - Upload an ID proof document (admins only).
///
/// The file streams to disk chunk by chunk. Policy violations redirect back
/// to the upload page with the reason in the query string; nothing partial
/// stays on disk.
async fn upload_id_proof(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let principal = match auth.principal() {
        Ok(p) => p,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(e) = authorize(Some(&principal), ADMIN_ROLES) {
        return policy_response(e);
    }

    let repo = EmployeeRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => {
            error!(error = %e, employee_id = %id, "Failed to fetch employee for upload");
            return internal_error("Upload failed");
        }
    }

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "missing_file",
                    "message": "Request contains no file"
                })),
            )
                .into_response();
        }
        Err(e) => {
            warn!(error = %e, "Malformed multipart request");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "bad_request",
                    "message": "Malformed multipart request"
                })),
            )
                .into_response();
        }
    };

    let content_type = field.content_type().unwrap_or_default().to_string();
    let mut upload = match state.uploads.begin(&content_type).await {
        Ok(u) => u,
        Err(e @ UploadError::DisallowedType(_)) => {
            info!(employee_id = %id, content_type = %content_type, "Upload rejected");
            return violation_redirect(&state, &e);
        }
        Err(e) => {
            error!(error = %e, "Failed to start upload");
            return internal_error("Upload failed");
        }
    };

    let mut field = field;
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = upload.write(&chunk).await {
                    return match e {
                        UploadError::FileTooLarge { .. } => {
                            info!(employee_id = %id, "Upload rejected, over size limit");
                            violation_redirect(&state, &e)
                        }
                        _ => {
                            error!(error = %e, "Upload write failed");
                            internal_error("Upload failed")
                        }
                    };
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Upload stream interrupted");
                upload.discard().await;
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "bad_request",
                        "message": "Upload stream interrupted"
                    })),
                )
                    .into_response();
            }
        }
    }

    let stored = match upload.finish().await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to finish upload");
            return internal_error("Upload failed");
        }
    };

    let ctx = audit_context(&headers, auth.user_id());
    match repo.set_id_proof(id, &stored.stored_name, &ctx).await {
        Ok(employee) => {
            info!(employee_id = %id, file = %stored.stored_name, size = stored.size, "ID proof stored");
            state.employee_cache.invalidate_all();
            Json(json!({
                "id_proof": employee.id_proof,
                "size": stored.size
            }))
            .into_response()
        }
        Err(e) => {
            // The record update failed; do not leave an orphaned file behind.
            error!(error = %e, employee_id = %id, "Failed to record ID proof");
            if let Err(del) = state.uploads.delete(&stored.stored_name).await {
                warn!(error = %del, file = %stored.stored_name, "Orphaned upload not deleted");
            }
            internal_error("Upload failed")
        }
    }
}

/// Redirects back to the upload page with the violation reason.
fn violation_redirect(state: &AppState, e: &UploadError) -> Response {
    let message = urlencoding::encode(&e.user_message()).into_owned();
    Redirect::to(&format!("{}?error={message}", state.upload_redirect)).into_response()
}

/// Keeps header-safe characters; everything else becomes an underscore.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_view() -> EmployeeView {
        EmployeeView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: "Asha Verma".to_string(),
            email: "asha.verma@staffly.dev".to_string(),
            role: "Employee".to_string(),
            phone: "9876543210".to_string(),
            department: "Engineering".to_string(),
            designation: "Developer".to_string(),
            salary: Some(dec!(50000)),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            dob: NaiveDate::from_ymd_opt(1995, 6, 15).unwrap(),
            status: "active".to_string(),
            id_proof: None,
        }
    }

    #[test]
    fn test_sanitize_filename_keeps_names_readable() {
        assert_eq!(sanitize_filename("Asha Verma"), "Asha Verma");
        assert_eq!(sanitize_filename("O\"Brien\r\n"), "O_Brien__");
    }

    #[test]
    fn test_negative_salary_is_rejected_on_create_and_update() {
        assert!(salary_is_negative(Some(dec!(-1))));
        assert!(salary_is_negative(Some(dec!(-0.01))));
        assert!(!salary_is_negative(Some(dec!(0))));
        assert!(!salary_is_negative(Some(dec!(50000))));
        assert!(!salary_is_negative(None));
    }

    #[test]
    fn test_self_view_page_echoes_requested_page() {
        let request = PageRequest {
            page: 3,
            per_page: 7,
        }
        .clamped();
        let page = self_view_page(Some(sample_view()), request);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.page, 3);
        assert_eq!(page.meta.per_page, 7);
        assert_eq!(page.meta.total, 1);
    }

    #[test]
    fn test_self_view_page_without_record_is_empty() {
        let page = self_view_page(None, PageRequest::default());
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.total_pages, 1);
    }
}
