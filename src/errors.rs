use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::intake::IntakeError;

/// JSON body shared by every booking endpoint response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            booking_id: None,
            errors: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("time slot is full")]
    SlotFull,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("bad request: {message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("storage error while {action}: {source:#}")]
    Storage {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Adapter for `map_err` on storage results; `action` completes the sentence
    /// "An error occurred while ...".
    pub fn storage<E>(action: &'static str) -> impl FnOnce(E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        move |e| AppError::Storage {
            action,
            source: e.into(),
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::Validation(errors) => AppError::Validation(errors),
            IntakeError::SlotFull => AppError::SlotFull,
            IntakeError::Storage(source) => AppError::Storage {
                action: "saving your booking",
                source,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse {
                    errors: Some(errors),
                    ..ApiResponse::failure("Validation failed")
                },
            ),
            AppError::SlotFull => (
                StatusCode::CONFLICT,
                ApiResponse::failure("This time slot is already full. Please choose another one."),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiResponse::failure("Method Not Allowed: Only POST method is allowed"),
            ),
            AppError::BadRequest { status, message } => (status, ApiResponse::failure(message)),
            AppError::Storage { action, source } => {
                // Full detail stays in the server log.
                tracing::error!(error = %format!("{source:#}"), "storage failure while {action}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(format!("An error occurred while {action}.")),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
