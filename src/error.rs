//! API Error Taxonomy
//!
//! Every client-visible failure carries a stable, machine-readable code so the
//! frontend can branch on it without parsing messages. The code-to-status
//! table lives here and nowhere else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A request that failed validation or referenced something that does not
    /// exist. `code` drives the HTTP status; `field` is set for row-level CSV
    /// errors.
    #[error("{message}")]
    Rejected {
        code: &'static str,
        field: Option<&'static str>,
        message: String,
    },

    #[error("this action requires admin privileges")]
    AccessDenied,

    #[error("authorization header is missing or invalid")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn rejected(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            code,
            field: None,
            message: message.into(),
        }
    }

    pub fn rejected_field(
        code: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        ApiError::Rejected {
            code,
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Rejected { code, .. } => code,
            ApiError::AccessDenied => "ACCESS_DENIED",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::Rejected { field, .. } => *field,
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected { code, .. } => status_for_code(code),
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn status_for_code(code: &str) -> StatusCode {
    match code {
        "HEADER_MISMATCH" | "INVALID_CSV_FORMAT" | "EMPTY_FILE" => StatusCode::BAD_REQUEST,
        "USER_NOT_FOUND" => StatusCode::UNAUTHORIZED,
        "COMPANY_NOT_FOUND" | "CATEGORY_NOT_FOUND" | "QUESTION_NOT_FOUND" => StatusCode::NOT_FOUND,
        "DUPLICATE_QUESTION" => StatusCode::CONFLICT,
        "FILE_SIZE_EXCEEDED" | "TOO_MANY_ROWS" => StatusCode::PAYLOAD_TOO_LARGE,
        "INVALID_CONTENT_TYPE" => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "INVALID_SORT" | "INVALID_TYPE" | "INVALID_DIFFICULTY" | "INVALID_DIFFICULTY_LABEL"
        | "INVALID_PAGE" | "INVALID_SIZE" | "INVALID_QUERY" | "INVALID_YEAR"
        | "INVALID_YEAR_FORMAT" | "INVALID_CATEGORY_ID" | "INVALID_COMPANY_ID"
        | "INVALID_INTERVIEW_TYPE" | "REQUIRED_FIELD_MISSING" | "FIELD_TOO_LONG" => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!("unexpected error: {:#}", err);
        }
        let status = self.status();
        let body = ErrorBody {
            status: status.as_u16(),
            message: self.to_string(),
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
