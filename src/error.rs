use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not Found")]
    NotFound,

    #[error("Pet is already reserved")]
    AlreadyReserved,

    #[error("Reservation is held by another user")]
    NotOwner,

    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Invalid value `{value}` for `{field}`")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("`{0}` must be a non-negative number")]
    InvalidNumericField(&'static str),

    #[error("Invalid date `{0}`")]
    InvalidDate(String),

    #[error("Invalid filter field `{0}`")]
    InvalidFilterField(String),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Conflict {0}")]
    Conflict(String),

    #[error("Database error")]
    Orm(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The store could not be reached; the caller may retry.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Orm(err) => is_unreachable(err),
            _ => false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::NotOwner => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyReserved | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::MissingField(_)
            | AppError::InvalidEnumValue { .. }
            | AppError::InvalidNumericField(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidFilterField(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Orm(_) if self.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Orm(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when the store rejected a write because of a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_unreachable(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => {
            matches!(
                e,
                sea_orm::sqlx::Error::Io(_)
                    | sea_orm::sqlx::Error::PoolTimedOut
                    | sea_orm::sqlx::Error::PoolClosed
            )
        }
        _ => false,
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
