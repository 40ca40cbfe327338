use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Every way a product operation can fail.
///
/// Business-rule variants carry just enough context for the HTTP layer to
/// build the client-facing body; `Internal` wraps the unexpected failures
/// that get written to the error log.
#[derive(Error, Debug)]
pub enum AppError {
    /// A product with the caller-supplied ID already exists
    #[error("Duplicate entry: product with ProductID={id} already exists")]
    DuplicateId { id: i32 },

    /// Price below zero
    #[error("Price must be non-negative")]
    InvalidPrice,

    /// Quantity below zero
    #[error("Quantity must be non-negative")]
    InvalidQuantity,

    /// Field-level validation failures, sorted by field name
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// No product under the requested ID
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Request could not be decoded (bad JSON, bad query string)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Anything the client could not have caused, such as a poisoned store lock
    #[error("Internal error: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for a missing product.
    pub fn product_not_found(id: i32) -> Self {
        AppError::NotFound {
            entity: "product".to_string(),
            field: "ProductID".to_string(),
            value: id.to_string(),
        }
    }

    /// Whether this error is an unexpected failure rather than a client mistake.
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Internal { .. })
    }
}

/// A single violated field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationFieldError {
    /// Wire name of the field, e.g. `Name`
    pub field: String,
    /// Human readable description of the violation
    pub message: String,
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut collected = Vec::new();
        for (field, kind) in errors.errors() {
            let ValidationErrorsKind::Field(field_errors) = kind else {
                continue;
            };
            let field = wire_field_name(field);
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(&field, &error.code));
                collected.push(ValidationFieldError {
                    field: field.clone(),
                    message,
                });
            }
        }
        collected.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        AppError::ValidationErrors { errors: collected }
    }
}

/// Maps a Rust field name to the PascalCase name clients send.
fn wire_field_name(field: &str) -> String {
    if field == "product_id" {
        return "ProductID".to_string();
    }
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn default_message(field: &str, code: &str) -> String {
    match code {
        "required" => format!("The {field} field is required."),
        "range" => format!("The field {field} must not be negative."),
        _ => format!("The {field} field is invalid."),
    }
}

pub type AppResult<T> = Result<T, AppError>;
