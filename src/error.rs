use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::db::DatabaseError;
use crate::matching::{MatchError, SlotError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::UserNotFound(id) => AppError::NotFound(format!("User {}", id)),
        }
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Bodies that parse but hold invalid values (an inverted slot, a weekday out
/// of range) are validation failures. Anything else about the body is a bad
/// request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::Validation(err.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DatabaseError::Sqlx(err))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(err) => match err {
                DatabaseError::Duplicate => StatusCode::CONFLICT,
                DatabaseError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Resource not found",
            AppError::Database(DatabaseError::Duplicate) => "Resource already exists",
            AppError::Database(DatabaseError::InvalidInput(_)) => "Invalid input data",
            AppError::Validation(_) => "Validation error",
            AppError::BadRequest(_) => "Bad request",
            AppError::Database(_) | AppError::InternalServerError(_) => "An internal server error occurred",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        // Internal details stay in the logs.
        let details = if status.is_server_error() {
            None
        } else {
            Some(self.to_string())
        };

        let body = Json(json!({
            "error": {
                "message": self.public_message(),
                "details": details,
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("user".into()), StatusCode::NOT_FOUND),
            (AppError::Database(DatabaseError::Duplicate), StatusCode::CONFLICT),
            (AppError::Database(DatabaseError::InvalidInput("x".into())), StatusCode::BAD_REQUEST),
            (AppError::Database(DatabaseError::Sqlx(sqlx::Error::RowNotFound)), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::InternalServerError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_unknown_user_maps_to_not_found() {
        let id = Uuid::from_u128(7);
        let err = AppError::from(MatchError::UserNotFound(id));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_slot_errors_are_validation_failures() {
        let err = AppError::from(SlotError::InvalidDayOfWeek(9));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
