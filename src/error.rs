//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Stable error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchData = 5,
    BadValue = 18,
    StorageUnavailable = 22,
}

pub const LANGUAGE_EXISTS_MESSAGE: &str = "Language already exists (case-insensitive match)";
const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation on {field}: {message}")]
    ConstraintViolation { field: String, message: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ConstraintViolation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Prefix the field of a constraint violation with its inline row,
    /// e.g. `books[2].title`. Other errors pass through.
    pub fn in_inline_row(self, collection: &str, index: usize) -> Self {
        match self {
            AppError::ConstraintViolation { field, message } => AppError::ConstraintViolation {
                field: format!("{}[{}].{}", collection, index, field),
                message,
            },
            other => other,
        }
    }
}

/// Translate a violated schema constraint into the field it guards.
pub fn constraint_violation(constraint: &str) -> Option<AppError> {
    let (field, message) = match constraint {
        "language_name_case_insensitive_unique" => ("name", LANGUAGE_EXISTS_MESSAGE),
        "book_instances_pkey" => ("id", "Book instance with this Id already exists."),
        "book_instances_status_check" => ("status", INVALID_CHOICE_MESSAGE),
        "books_author_id_fkey" => ("author", INVALID_CHOICE_MESSAGE),
        "books_language_id_fkey" => ("language", INVALID_CHOICE_MESSAGE),
        "book_genres_genre_id_fkey" => ("genres", INVALID_CHOICE_MESSAGE),
        "book_instances_book_id_fkey" => ("book", INVALID_CHOICE_MESSAGE),
        "book_instances_borrower_id_fkey" => ("borrower", INVALID_CHOICE_MESSAGE),
        _ => return None,
    };
    Some(AppError::constraint(field, message))
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                if let Some(mapped) = db.constraint().and_then(constraint_violation) {
                    return mapped;
                }
                if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() {
                    return AppError::constraint(
                        db.constraint().unwrap_or("__all__"),
                        db.message().to_string(),
                    );
                }
                AppError::Database(err)
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::StorageUnavailable(err.to_string()),
            _ => AppError::Database(err),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the first failing field, in field-name order for stable output.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                AppError::constraint(field.to_string(), message)
            }
            None => AppError::constraint("__all__", errors.to_string()),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Offending field for constraint violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut field = None;
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg),
            AppError::ConstraintViolation { field: f, message } => {
                field = Some(f);
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, message)
            }
            AppError::StorageUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StorageUnavailable,
                    "Storage unavailable".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            field,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_language_index_maps_to_name_field() {
        match constraint_violation("language_name_case_insensitive_unique") {
            Some(AppError::ConstraintViolation { field, message }) => {
                assert_eq!(field, "name");
                assert_eq!(message, "Language already exists (case-insensitive match)");
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_keys_map_to_their_fields() {
        let cases = [
            ("books_author_id_fkey", "author"),
            ("books_language_id_fkey", "language"),
            ("book_genres_genre_id_fkey", "genres"),
            ("book_instances_book_id_fkey", "book"),
            ("book_instances_borrower_id_fkey", "borrower"),
        ];
        for (constraint, expected) in cases {
            match constraint_violation(constraint) {
                Some(AppError::ConstraintViolation { field, .. }) => assert_eq!(field, expected),
                other => panic!("{} mapped to {:?}", constraint, other),
            }
        }
    }

    #[test]
    fn test_unknown_constraint_is_not_mapped() {
        assert!(constraint_violation("some_other_index").is_none());
    }

    #[test]
    fn test_pool_timeout_is_storage_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3, message = "too long"))]
        name: String,
    }

    #[test]
    fn test_validation_errors_carry_field_and_message() {
        let sample = Sample { name: "abcd".to_string() };
        let err: AppError = sample.validate().unwrap_err().into();
        match err {
            AppError::ConstraintViolation { field, message } => {
                assert_eq!(field, "name");
                assert_eq!(message, "too long");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_inline_row_prefixes_field() {
        let err = AppError::constraint("title", "too long").in_inline_row("books", 2);
        match err {
            AppError::ConstraintViolation { field, message } => {
                assert_eq!(field, "books[2].title");
                assert_eq!(message, "too long");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_inline_row_maps_storage_constraint() {
        let err = constraint_violation("books_language_id_fkey")
            .map(|e| e.in_inline_row("books", 0));
        match err {
            Some(AppError::ConstraintViolation { field, .. }) => assert_eq!(field, "books[0].language"),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_inline_row_keeps_other_errors() {
        let err = AppError::NotFound("gone".into()).in_inline_row("instances", 0);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_not_found_response_status() {
        let response = AppError::NotFound("Book 1 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_constraint_violation_response_status() {
        let response = AppError::constraint("name", LANGUAGE_EXISTS_MESSAGE).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
