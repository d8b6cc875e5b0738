use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use utoipa::ToSchema;

use crate::api::extract::{BoundPath, BoundQuery, ValidatedJson};
use crate::errors::{AppError, BusinessError, ConstraintViolationError, InvalidArgumentError};
use crate::models::user::{CreateUserRequest, PageParams, TransferRequest, User, UserDirectory};
use crate::response::{ApiResponse, ResultCode};

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub directory: UserDirectory,
    pub instance_id: String,
}

/// Paginated listing wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Results for the current page
    pub data: Vec<T>,
    /// Total number of results across all pages
    pub total: usize,
    /// Current page number
    pub page: usize,
    /// Number of results per page
    pub page_size: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Whether there are more pages available
    pub has_more: bool,
}

// Concrete response types for OpenAPI generation
/// User response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Application-level result code
    pub code: u16,
    /// Human-readable message
    pub message: Option<String>,
    /// Payload, present on success
    pub data: Option<User>,
    /// Envelope creation time, epoch millis
    pub timestamp: i64,
}

/// Paginated user list envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Application-level result code
    pub code: u16,
    /// Human-readable message
    pub message: Option<String>,
    /// Payload, present on success
    pub data: Option<PaginatedUserData>,
    /// Envelope creation time, epoch millis
    pub timestamp: i64,
}

/// Paginated user data
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUserData {
    /// Results for the current page
    pub data: Vec<User>,
    /// Total number of results across all pages
    pub total: usize,
    /// Current page number
    pub page: usize,
    /// Number of results per page
    pub page_size: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Whether there are more pages available
    pub has_more: bool,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "user-service",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Uniform envelope; code 200 with the created user, 400 on validation failure", body = UserResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<ApiResponse<User>, AppError> {
    info!("Create user request: name='{}'", payload.name);

    let user = state.directory.insert(payload);
    info!("Created user {}", user.id);
    Ok(ApiResponse::success(user))
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(PageParams),
    responses(
        (status = 200, description = "Uniform envelope; code 200 with a page of users, 400 on malformed parameters", body = UserListResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    BoundQuery(params): BoundQuery<PageParams>,
) -> Result<ApiResponse<PaginatedResponse<User>>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(20).clamp(1, 100);

    info!("List users request: page={}, page_size={}", page, page_size);

    let (users, total) = state.directory.list(page, page_size);
    let total_pages = (total + page_size - 1) / page_size;
    let has_more = page < total_pages;

    Ok(ApiResponse::success(PaginatedResponse {
        data: users,
        total,
        page,
        page_size,
        total_pages,
        has_more,
    }))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Uniform envelope; code 200 with the user, 404 when unknown", body = UserResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    BoundPath(id): BoundPath<u64>,
) -> Result<ApiResponse<User>, AppError> {
    info!("Get user request: id={}", id);

    let user = state.directory.get(id).ok_or_else(|| {
        BusinessError::from_code_message(ResultCode::NotFound, format!("user {id} not found"))
    })?;
    Ok(ApiResponse::success(user))
}

/// Transfer balance between two users
#[utoipa::path(
    post,
    path = "/users/{id}/transfer",
    tag = "users",
    params(
        ("id" = u64, Path, description = "Source user id")
    ),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Uniform envelope; code 200 with the updated source user, 400 on bad arguments, 600 on business rejection", body = UserResponse)
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    BoundPath(id): BoundPath<u64>,
    ValidatedJson(payload): ValidatedJson<TransferRequest>,
) -> Result<ApiResponse<User>, AppError> {
    info!(
        "Transfer request: from={}, to={}, amount={}",
        id, payload.to, payload.amount
    );

    if payload.amount <= 0 {
        return Err(ConstraintViolationError::single("amount must be positive").into());
    }
    if payload.to == id {
        return Err(InvalidArgumentError::new("cannot transfer to self").into());
    }

    let updated = state.directory.transfer(id, payload.to, payload.amount)?;
    info!("Transfer completed: from={}, to={}", id, payload.to);
    Ok(ApiResponse::success(updated))
}
