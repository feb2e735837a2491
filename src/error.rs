use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::models::ParseMonthError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("malformed query string: {0}")]
    BadQuery(String),

    #[error("missing required query parameter `month`")]
    MissingMonth,

    #[error(transparent)]
    InvalidMonth(#[from] ParseMonthError),

    #[error("invalid page {0:?}: expected a positive integer")]
    InvalidPage(String),

    #[error("database already initialized with {0} records")]
    AlreadyInitialized(u64),

    #[error("seed feed error: {0}")]
    SeedFeed(String),

    #[error("storage error: {0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("{0} timed out")]
    Timeout(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadQuery(_)
            | AppError::MissingMonth
            | AppError::InvalidMonth(_)
            | AppError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyInitialized(_) => StatusCode::CONFLICT,
            AppError::SeedFeed(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadQuery(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let month_error = "2024-13".parse::<crate::models::MonthFilter>().unwrap_err();
        assert_eq!(AppError::from(month_error).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingMonth.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidPage("0".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_and_guard_errors_have_distinct_statuses() {
        assert_eq!(AppError::AlreadyInitialized(60).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::SeedFeed("boom".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Timeout("storage query").status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
