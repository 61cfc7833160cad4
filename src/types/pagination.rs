//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::UserResponse;

/// Raw pagination query string.
///
/// Values are kept as text so that malformed input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, 1-indexed (default 1)
    pub page: Option<String>,
    /// Items per page, 1-100 (default 10)
    pub per_page: Option<String>,
}

const MAX_SQL_ROW_COUNT: u64 = i64::MAX as u64;

/// Normalized pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub per_page: u64,
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Replace zero page / page size with the defaults.
    pub fn normalized(self) -> Self {
        Self {
            page: if self.page < 1 { DEFAULT_PAGE_NUMBER } else { self.page },
            per_page: if self.per_page < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                self.per_page
            },
        }
    }

    /// Calculate offset for database query.
    ///
    /// Capped at `i64::MAX`, the largest value SQL backends accept.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.per_page)
            .min(MAX_SQL_ROW_COUNT)
    }

    /// Number of rows to fetch
    pub fn limit(&self) -> u64 {
        self.per_page.min(MAX_SQL_ROW_COUNT)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<PaginationQuery> for PaginationParams {
    /// Unparsable, zero, or out-of-range values take the default
    /// (`per_page` above the maximum is not clamped).
    fn from(query: PaginationQuery) -> Self {
        let page = query
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(DEFAULT_PAGE_NUMBER);

        let per_page = query
            .per_page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|pp| (1..=MAX_PAGE_SIZE).contains(pp))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { page, per_page }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(PaginatedUsers = Paginated<UserResponse>)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                total,
                page,
                per_page,
                total_pages: total_pages(total, per_page),
            },
        }
    }

    /// Convert the items while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Integer ceiling division; a zero page size is treated as the default.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    let per_page = if per_page == 0 { DEFAULT_PAGE_SIZE } else { per_page };
    total.div_ceil(per_page)
}
