//! Every endpoint answers failures with the same `{"error", "details"?}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let body = error_to_body(&self);
        (status, Json(body)).into_response()
    }
}

/// 404 for a missing product, 500 for internal failures, 400 for the rest.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::DuplicateId { .. }
        | AppError::InvalidPrice
        | AppError::InvalidQuantity
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_to_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::DuplicateId { .. } => ErrorResponse::new("Product ID already exists"),
        AppError::InvalidPrice => ErrorResponse::new("Price must be non-negative"),
        AppError::InvalidQuantity => ErrorResponse::new("Quantity must be non-negative"),
        AppError::ValidationErrors { errors } => {
            let details = serde_json::to_value(errors).unwrap_or(Value::Null);
            ErrorResponse::new("Invalid product data").with_details(details)
        }
        AppError::NotFound { .. } => ErrorResponse::new("Product not found"),
        AppError::BadRequest { message } => {
            ErrorResponse::new("Invalid request").with_details(message.as_str())
        }
        AppError::Internal { source } => {
            ErrorResponse::new("An unexpected error occurred").with_details(source.to_string())
        }
    }
}
