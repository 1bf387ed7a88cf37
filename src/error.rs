//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler returns `Result<_, AppError>`, and every failure a client can observe
//! is one of its variants.
//!
//! `AppError` implements `actix_web::error::ResponseError` so errors become HTTP
//! responses with a `{"error": "<message>"}` body. Server-side failures are logged
//! with their real cause and answered with a constant message; nothing from a query,
//! a driver, or a hashing library ever reaches the client.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// The body sent for every 500 response.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid input (HTTP 400).
    Validation(String),
    /// The request conflicts with existing data, e.g. a duplicate email (HTTP 400).
    Conflict(String),
    /// Missing, malformed, invalid or expired token (HTTP 401).
    Unauthorized(String),
    /// The resource is absent or is not owned by the caller (HTTP 404).
    /// The two cases are deliberately reported with the same message.
    NotFound(String),
    /// Unexpected store or infrastructure failure (HTTP 500).
    /// The payload is the internal cause and is only written to the log.
    Server(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Server(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    /// The message a client is allowed to see.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg) => msg,
            AppError::Server(_) => SERVER_ERROR_MESSAGE,
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Server(cause) = self {
            log::error!("request failed: {}", cause);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.client_message()
        }))
    }
}

/// Converts store failures into `AppError`.
///
/// A duplicate email is the only store error a client learns about; everything
/// else is a generic server error.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::EmailTaken => AppError::Conflict("Email already in use".into()),
            StoreError::Database(msg) => AppError::Server(msg),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// keeping the first field message.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid input".to_string());
        AppError::Validation(message)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Server(format!("bcrypt: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::Server(format!("blocking task failed: {}", error))
    }
}
