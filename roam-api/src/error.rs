use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use roam_booking::ConfirmError;
use roam_core::repository::StoreError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        code: &'static str,
        message: String,
    },
    PaymentRequired {
        code: &'static str,
        message: String,
    },
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: "validation_failed",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest { code, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": code, "message": message})),
            )
                .into_response(),
            ApiError::PaymentRequired { code, message } => (
                StatusCode::PAYMENT_REQUIRED,
                Json(json!({"error": "payment_failed", "code": code, "message": message})),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "not_found", "message": message})),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!("internal server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An unexpected error occurred. Please try again.",
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ConfirmError> for ApiError {
    fn from(err: ConfirmError) -> Self {
        let message = err.to_string();
        match err {
            ConfirmError::NotFound(_) => ApiError::NotFound(message),
            ConfirmError::PaymentFailed { code, .. } => ApiError::PaymentRequired {
                code: code.code(),
                message,
            },
            ConfirmError::Store(store_err) => ApiError::from(store_err),
            other => ApiError::BadRequest {
                code: other.code(),
                message,
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::PlanNotFound(_) | StoreError::BookingNotFound(_) => {
                ApiError::NotFound(message)
            }
            StoreError::PlanStatusConflict { .. } => ApiError::BadRequest {
                code: "status_conflict",
                message,
            },
            StoreError::BookingAlreadyCancelled(_) => ApiError::BadRequest {
                code: "already_cancelled",
                message,
            },
            StoreError::Unavailable(_) => ApiError::Internal(message),
        }
    }
}
