//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// Each variant maps to exactly one HTTP status and one error code.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request body or field values
    #[error("{0}")]
    Validation(String),

    /// Identifier does not parse as a UUID
    #[error("Invalid user ID format: {0}")]
    InvalidId(String),

    /// No matching non-deleted row
    #[error("User not found")]
    NotFound,

    /// Email uniqueness would be violated
    #[error("User with this email already exists")]
    AlreadyExists,

    /// Any underlying persistence failure, tagged with the failed operation
    #[error("failed to {operation}")]
    Store {
        operation: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("Internal server error")]
    Internal(String),
}

/// Message prefix for unique violations detected outside the database.
const UNIQUE_VIOLATION: &str = "unique constraint violated";

/// Unique violation raised by a store that enforces uniqueness itself.
pub fn unique_violation(detail: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("{}: {}", UNIQUE_VIOLATION, detail))
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::NotFound => "NOT_FOUND",
            AppError::AlreadyExists => "ALREADY_EXISTS",
            AppError::Store { .. } => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::Store { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message and optional details payload
    fn user_message(&self) -> (String, Option<String>) {
        match self {
            AppError::Validation(msg) => ("Invalid request data".to_string(), Some(msg.clone())),
            AppError::InvalidId(raw) => ("Invalid user ID format".to_string(), Some(raw.clone())),
            AppError::Store { operation, source } => {
                tracing::error!(operation, error = %source, "Store error");
                (self.to_string(), Some(source.to_string()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("An internal error occurred".to_string(), None)
            }
            AppError::NotFound | AppError::AlreadyExists => (self.to_string(), None),
        }
    }

    /// Whether this is a store error raised by a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Store { source, .. } => {
                matches!(source.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
                    || matches!(source, DbErr::Custom(msg) if msg.starts_with(UNIQUE_VIOLATION))
            }
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, details) = self.user_message();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Attach the failed operation to a raw ORM error.
pub trait StoreContext<T> {
    fn store_context(self, operation: &'static str) -> AppResult<T>;
}

impl<T> StoreContext<T> for Result<T, DbErr> {
    fn store_context(self, operation: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::store(operation, source))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid_id(raw: impl Into<String>) -> Self {
        AppError::InvalidId(raw.into())
    }

    pub fn store(operation: &'static str, source: DbErr) -> Self {
        AppError::Store { operation, source }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_distinct_code() {
        let errors = [
            AppError::validation("name is invalid"),
            AppError::invalid_id("abc"),
            AppError::NotFound,
            AppError::AlreadyExists,
            AppError::store("insert user", DbErr::Custom("boom".into())),
            AppError::internal("oops"),
        ];

        let mut codes: Vec<_> = errors.iter().map(AppError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::invalid_id("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::AlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::store("update user", DbErr::Custom("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_names_the_operation() {
        let err: AppResult<()> = Err(DbErr::Custom("connection reset".into())).store_context("count users");
        let err = err.unwrap_err();
        assert_eq!(err.to_string(), "failed to count users");
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn store_side_unique_violation_is_recognized() {
        let err = AppError::store("insert user", unique_violation("email ada@x.com"));
        assert!(err.is_unique_violation());
        assert!(!AppError::store("insert user", DbErr::Custom("unique".into())).is_unique_violation());
        assert!(!AppError::AlreadyExists.is_unique_violation());
    }

    #[test]
    fn option_ext_maps_none_to_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}
