//! Response types for the Staff Policy Engine API.
//!
//! This module defines the success bodies, the error response structure,
//! and the mapping from [`PolicyError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::models::{CarryoverResult, User, YearLedgerEntry};

use crate::error::PolicyError;

/// Response body for `POST /access/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
    /// Whether the permission is granted.
    pub granted: bool,
    /// Whether the grant came from a god-mode role.
    pub god_mode: bool,
}

/// Response body for `POST /access/require`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUserResponse {
    /// The session user.
    pub user: User,
    /// The user's effective permission keys, sorted.
    pub permissions: Vec<String>,
}

/// Response body for `POST /vacation/carryover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarryoverResponse {
    /// The carryover result.
    #[serde(flatten)]
    pub result: CarryoverResult,
    /// Folded years, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<YearLedgerEntry>>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PolicyError> for ApiErrorResponse {
    fn from(error: PolicyError) -> Self {
        match error {
            PolicyError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            PolicyError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            PolicyError::InvalidPermissionKey { key, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERMISSION_KEY",
                    format!("Invalid permission key '{}'", key),
                    message,
                ),
            },
            PolicyError::UnknownRole { role } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("UNKNOWN_ROLE", format!("Unknown role: {}", role)),
            },
            PolicyError::Unauthenticated => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::with_details(
                    "UNAUTHENTICATED",
                    "Not authenticated",
                    "Sign in to continue",
                ),
            },
            PolicyError::PermissionDenied { permission, .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "PERMISSION_DENIED",
                    "Permission denied",
                    format!("Missing permission '{}'", permission),
                ),
            },
            PolicyError::InvalidVacationRequest {
                request_id,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_VACATION_REQUEST",
                    format!("Invalid vacation request '{}'", request_id),
                    message,
                ),
            },
        }
    }
}
