use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::db::StoreError;
use crate::services::{
    attendance::SubmissionError, registration::RegistrationError, settings::UpsertError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    Conflict(String),
    /// The write would not change anything.
    NoChanges(String),
    BadRequest(String),
    /// Rejected by the per-IP limiter; retry after this many seconds.
    TooManyRequests { retry_after: u64 },
    ServiceUnavailable(String),
    InternalServerError(anyhow::Error),
    Validation(Vec<String>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retry_after = match &self {
            AppError::TooManyRequests { retry_after } => Some(*retry_after),
            _ => None,
        };
        let (status, error_message, code, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND".to_string(), None),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                msg,
                "UNAUTHORIZED".to_string(),
                None,
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT".to_string(), None),
            AppError::NoChanges(msg) => {
                (StatusCode::CONFLICT, msg, "NO_CHANGES".to_string(), None)
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg,
                "BAD_REQUEST".to_string(),
                None,
            ),
            AppError::TooManyRequests { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.".to_string(),
                "RATE_LIMITED".to_string(),
                Some(serde_json::json!({ "retry_after": retry_after })),
            ),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Document store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The attendance database is temporarily unavailable. Please try again."
                        .to_string(),
                    "SERVICE_UNAVAILABLE".to_string(),
                    None,
                )
            }
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_SERVER_ERROR".to_string(),
                    None,
                )
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Validation failed".to_string()),
                "VALIDATION_ERROR".to_string(),
                Some(serde_json::json!({ "errors": errors })),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code,
            details,
        });

        let mut response = (status, body).into_response();
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            StoreError::Rejected { status, message } if status >= 500 => {
                AppError::ServiceUnavailable(message)
            }
            other => AppError::InternalServerError(other.into()),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::CapacityExhausted | RegistrationError::TooManyAttempts => {
                AppError::Conflict(err.to_string())
            }
            RegistrationError::Store(store) => store.into(),
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::NotRegistered => AppError::NotFound(err.to_string()),
            SubmissionError::Store(store) => store.into(),
        }
    }
}

impl From<UpsertError> for AppError {
    fn from(err: UpsertError) -> Self {
        match err {
            UpsertError::Invalid(message) => AppError::Validation(vec![message]),
            UpsertError::NoChanges(message) => AppError::NoChanges(message.to_string()),
            UpsertError::Store(store) => store.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        AppError::Validation(messages)
    }
}
