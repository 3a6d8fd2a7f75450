use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    domain::DomainError,
    response::{ApiResponse, Meta},
    storage::StorageError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Upload failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Machine-readable kind, stable across message wording changes.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound => "NotFound",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Domain(err) => match err {
                DomainError::InvalidTransition { .. } => "InvalidTransition",
                DomainError::FolioClosed { .. } => "FolioClosed",
                DomainError::DuplicatePayment { .. } => "DuplicatePayment",
                DomainError::AlreadyClosed { .. } => "AlreadyClosed",
                DomainError::Validation(_) => "ValidationError",
            },
            AppError::Storage(_) => "StorageError",
            AppError::DbError(_) | AppError::OrmError(_) => "DatabaseError",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Domain(_) => StatusCode::CONFLICT,
            AppError::Storage(StorageError::Empty | StorageError::InvalidPath(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Storage(_)
            | AppError::DbError(_)
            | AppError::OrmError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    kind: &'static str,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData {
                kind: self.kind(),
                error: message,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
