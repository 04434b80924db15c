//! Unified error types for the api-bank API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence errors raised behind the domain ports
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - raised by adapters behind the ports
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),
}

/// A single rejected field of a request, with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<FieldViolation>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, violations) = match self {
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                None,
                violations,
            ),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg), Vec::new())
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            violations,
        });

        (status, body).into_response()
    }
}
