use utoipa::OpenApi;

use crate::api::handlers::{PaginatedUserData, UserListResponse, UserResponse};
use crate::models::user::{CreateUserRequest, PageParams, TransferRequest, User};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        version = "0.1.0",
        description = "A user microservice built on a uniform response envelope: every endpoint returns { code, message, data, timestamp }, with application-level result codes banded into success, client faults, server faults and business rejections.",
        contact(
            name = "User Service API",
        )
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::create_user,
        crate::api::handlers::list_users,
        crate::api::handlers::get_user,
        crate::api::handlers::transfer,
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            TransferRequest,
            PageParams,
            UserResponse,
            UserListResponse,
            PaginatedUserData,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management and transfer endpoints"),
    )
)]
pub struct ApiDoc;
