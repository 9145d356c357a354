use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::{ErrorCode, GatewayError};
use crate::trace_ctx;

/// JSON body of every non-200 response.
///
/// `error` is the human-readable message clients display; `received` is only
/// present for unrecognized payloads and lists the top-level keys we saw.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Vec<String>>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest {
        code: ErrorCode,
        detail: String,
        received: Option<Vec<String>>,
    },
    #[error("Unprocessable: {detail}")]
    Unprocessable { code: ErrorCode, detail: String },
    #[error("Rate limited: {detail}")]
    RateLimited { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { code, .. } => *code,
            AppError::Unprocessable { code, .. } => *code,
            AppError::RateLimited { .. } => ErrorCode::RateLimited,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Unprocessable { detail, .. } => detail.clone(),
            AppError::RateLimited { detail } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn received(&self) -> Option<Vec<String>> {
        match self {
            AppError::BadRequest { received, .. } => received.clone(),
            _ => None,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest {
            code,
            detail,
            received: None,
        }
    }

    pub fn unrecognized(received: Vec<String>) -> Self {
        Self::BadRequest {
            code: ErrorCode::UnrecognizedRequest,
            detail: "Unrecognized request format".to_string(),
            received: Some(received),
        }
    }

    pub fn unprocessable(code: ErrorCode, detail: String) -> Self {
        Self::Unprocessable { code, detail }
    }

    pub fn rate_limited(detail: impl Into<String>) -> Self {
        Self::RateLimited {
            detail: detail.into(),
        }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unrecognized { received } => AppError::unrecognized(received),
            GatewayError::InvalidRequest(detail) => {
                AppError::bad_request(ErrorCode::InvalidRequest, detail)
            }
            GatewayError::NoLegalMoves(detail) => {
                AppError::unprocessable(ErrorCode::NoLegalMoves, detail)
            }
            GatewayError::ChatUnavailable(detail) => AppError::Internal {
                code: ErrorCode::ChatUnavailable,
                detail,
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        let body = ErrorBody {
            error: self.detail(),
            code: self.code().to_string(),
            status: status.as_u16(),
            trace_id: trace_id.clone(),
            received: self.received(),
        };

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}
