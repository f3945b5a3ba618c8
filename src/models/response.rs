use axum::http::StatusCode;
use serde::Serialize;

use crate::pagination::PageMeta;

/// JSON envelope shared by every course endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, Some(data), None)
    }

    pub fn created(data: T) -> Self {
        Self::success(StatusCode::CREATED, Some(data), None)
    }

    pub fn page(data: T, meta: PageMeta) -> Self {
        Self::success(StatusCode::OK, Some(data), Some(meta))
    }

    pub fn empty() -> Self {
        Self::success(StatusCode::OK, None, None)
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
            meta: None,
        }
    }

    fn success(status: StatusCode, data: Option<T>, meta: Option<PageMeta>) -> Self {
        Self {
            status: status.as_u16(),
            message: "success".to_string(),
            data,
            meta,
        }
    }
}
