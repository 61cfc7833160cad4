//! Shared types for list and envelope responses.

mod pagination;
mod response;

pub use pagination::{
    total_pages, Paginated, PaginatedUsers, PaginationMeta, PaginationParams, PaginationQuery,
};
pub use response::{ApiResponse, Created};
