use std::fmt;

use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::error;

use crate::models::ApiResponse;

/// Course fields that callers supply as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    StartDate,
    EndDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::StartDate => write!(f, "start_date"),
            Field::EndDate => write!(f, "end_date"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    InvalidDate,
    DateRangeInvalid,
    NotFound,
    InvalidRequest,
    Persistence,
    Config,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("invalid {field}: '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { field: Field, value: String },

    #[error("start date {start} is after end date {end}")]
    DateRangeInvalid { start: NaiveDate, end: NaiveDate },

    #[error("course '{id}' doesn't exist")]
    NotFound { id: String },

    #[error("invalid request format: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(id: impl Into<String>) -> Self {
        AppError::NotFound { id: id.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingField(_) => ErrorKind::MissingField,
            AppError::InvalidDate { .. } => ErrorKind::InvalidDate,
            AppError::DateRangeInvalid { .. } => ErrorKind::DateRangeInvalid,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            AppError::Persistence(_) | AppError::Migration(_) => ErrorKind::Persistence,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MissingField
            | ErrorKind::InvalidDate
            | ErrorKind::DateRangeInvalid
            | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Persistence | ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Persistence(e) => {
                error!("database error: {}", e);
                "Database error occurred".to_string()
            }
            AppError::Migration(e) => {
                error!("migration error: {}", e);
                "Database error occurred".to_string()
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ApiResponse::<()>::error(status, message));

        (status, body).into_response()
    }
}
