//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type handlers and services return.
//! The authentication and ownership variants mirror the rejection classes callers can
//! observe; the remaining variants cover request decoding, validation and internal faults.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so every variant turns into a
//! JSON body of the form `{ "error": <message>, "code": <kind> }` with a matching status.
//! `From` implementations for `validator::ValidationErrors`, `jsonwebtoken::errors::Error`,
//! `bcrypt::BcryptError` and `RegistryError` keep `?` usable at every layer.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::registry::RegistryError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// No `Authorization` header (or an empty one) on a protected operation (HTTP 401).
    MissingCredential,
    /// The `Authorization` header is present but carries no usable bearer token (HTTP 401).
    MalformedCredential,
    /// Signature mismatch, expired or undecodable token, or a wrong password (HTTP 401).
    InvalidCredential,
    /// The task does not exist or belongs to someone else (HTTP 404).
    /// The two cases are deliberately indistinguishable.
    NotFoundOrForbidden,
    /// Signup with an email that is already registered (HTTP 409).
    DuplicateIdentity,
    /// The persistence layer failed (HTTP 500). Detail is logged, never returned.
    UpstreamFailure,
    /// The request body could not be decoded (HTTP 400).
    BadRequest(String),
    /// Input failed validation rules (HTTP 422).
    ValidationError(String),
    /// Unexpected server-side fault such as a signing or hashing failure (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// Stable machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "missing_credential",
            AppError::MalformedCredential => "malformed_credential",
            AppError::InvalidCredential => "invalid_credential",
            AppError::NotFoundOrForbidden => "not_found",
            AppError::DuplicateIdentity => "duplicate_identity",
            AppError::UpstreamFailure => "upstream_failure",
            AppError::BadRequest(_) => "bad_request",
            AppError::ValidationError(_) => "validation_error",
            AppError::InternalServerError(_) => "internal_error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::MissingCredential => write!(f, "Auth token not supplied"),
            AppError::MalformedCredential => write!(f, "Malformed authorization header"),
            AppError::InvalidCredential => write!(f, "Invalid credentials"),
            AppError::NotFoundOrForbidden => write!(f, "Task not found"),
            AppError::DuplicateIdentity => {
                write!(f, "Email already exists, please use a different email")
            }
            AppError::UpstreamFailure => write!(f, "Could not process request"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            // Internal detail goes to the log, not to the client.
            AppError::InternalServerError(_) => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredential
            | AppError::MalformedCredential
            | AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            AppError::DuplicateIdentity => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamFailure | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::InternalServerError(detail) = self {
            log::error!("internal error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any failure to decode or check a JWT is an invalid credential.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("token rejected: {}", error);
        AppError::InvalidCredential
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("password hashing failed: {}", error))
    }
}

impl From<RegistryError> for AppError {
    fn from(error: RegistryError) -> AppError {
        match error {
            RegistryError::Duplicate => AppError::DuplicateIdentity,
            RegistryError::Unavailable(detail) => {
                log::error!("registry failure: {}", detail);
                AppError::UpstreamFailure
            }
        }
    }
}
