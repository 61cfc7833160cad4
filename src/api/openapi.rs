//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::UserResponse;
use crate::types::{PaginatedUsers, PaginationMeta};

/// OpenAPI documentation for the User API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        version = "0.1.0",
        description = "User management REST API with soft delete and pagination"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        health_handler::health_check,
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserResponse,
            PaginatedUsers,
            PaginationMeta,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            health_handler::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_user_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/api/v1/users".to_string()));
        assert!(paths.contains(&"/api/v1/users/{id}".to_string()));
        assert!(paths.contains(&"/health".to_string()));
    }
}
