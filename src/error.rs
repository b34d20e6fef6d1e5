//! Error types for the Staff Policy Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for configuration loading, access control, and vacation request handling.
//! The permission evaluator and the carryover calculator themselves never fail.

use thiserror::Error;

/// The main error type for the Staff Policy Engine.
///
/// # Example
///
/// ```
/// use staff_policy_engine::error::PolicyError;
///
/// let error = PolicyError::PermissionDenied {
///     user_id: "usr_001".to_string(),
///     permission: "users:create".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Permission denied: user 'usr_001' lacks 'users:create'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A permission key did not have the `module:action` shape, or is unknown.
    #[error("Invalid permission key '{key}': {message}")]
    InvalidPermissionKey {
        /// The offending key.
        key: String,
        /// Why the key was rejected.
        message: String,
    },

    /// A role tag did not match any known role.
    #[error("Unknown role: {role}")]
    UnknownRole {
        /// The role string that was not recognised.
        role: String,
    },

    /// No session, or the session did not resolve to a user.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The user is authenticated but lacks the required permission.
    #[error("Permission denied: user '{user_id}' lacks '{permission}'")]
    PermissionDenied {
        /// The authenticated user.
        user_id: String,
        /// The permission that was required.
        permission: String,
    },

    /// A vacation request was malformed.
    #[error("Invalid vacation request '{request_id}': {message}")]
    InvalidVacationRequest {
        /// The ID of the invalid request.
        request_id: String,
        /// A description of what made the request invalid.
        message: String,
    },
}

/// A type alias for Results that return PolicyError.
pub type PolicyResult<T> = Result<T, PolicyError>;
