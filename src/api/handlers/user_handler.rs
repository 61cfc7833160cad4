//! User management handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{UuidPath, ValidatedJson};
use crate::api::AppState;
use crate::domain::validation::{validate_email, validate_name};
use crate::domain::{NewUser, UserChanges, UserResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginatedUsers, PaginationQuery};

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name, 2 to 100 characters after trimming
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Ada Lovelace", min_length = 2, max_length = 100)]
    pub name: String,
    /// Email address, unique among active users
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Ada King")]
    pub name: Option<String>,
    /// New email address
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "ada.king@example.com")]
    pub email: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok(Created(UserResponse::from(user), "User created successfully"))
}

/// List active users with pagination
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = PaginatedUsers)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let page = state.user_service.list_users(query.into()).await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User retrieved successfully",
    )))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed user ID or validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.update_user(id, payload.into()).await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User updated successfully",
    )))
}

/// Soft delete user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_absent_from_empty() {
        let absent: UpdateUserRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(absent.name.is_none());

        let empty: UpdateUserRequest = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert_eq!(empty.name.as_deref(), Some(""));
        assert!(empty.validate().is_err());
    }

    #[test]
    fn create_request_rejects_bad_email() {
        let req = CreateUserRequest {
            name: "Ada".into(),
            email: "ada.example.com".into(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn empty_update_request_is_valid() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }
}
