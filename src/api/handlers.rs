//! HTTP request handlers for the Staff Policy Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PolicyError;
use crate::models::User;
use crate::vacation::{calculate_balance, calculate_carryover, carryover_breakdown};

use super::request::{
    BalanceRequest, CarryoverRequest, PermissionCheckRequest, RequireAnyPermissionRequest,
    RequirePermissionRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AuthorizedUserResponse, CarryoverResponse,
    PermissionCheckResponse,
};
use super::state::AppState;

/// Header carrying the session token when no bearer token is sent.
pub const SESSION_HEADER: &str = "x-session-token";

/// Largest span of folded years returned in a carryover breakdown.
pub const MAX_BREAKDOWN_YEARS: i64 = 200;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/access/check", post(check_permission_handler))
        .route("/access/require", post(require_permission_handler))
        .route("/access/require-any", post(require_any_permission_handler))
        .route("/permissions", get(permission_catalog_handler))
        .route("/vacation/carryover", post(carryover_handler))
        .route("/vacation/balance", post(balance_handler))
        .with_state(state)
}

/// Reads the session token from `Authorization: Bearer` or the session header.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
    })
}

/// Converts a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Converts a policy error into its HTTP response.
fn error_response(error: PolicyError) -> Response {
    ApiErrorResponse::from(error).into_response()
}

/// Handler for POST /access/check.
///
/// Evaluates a role and permission set against a required key.
async fn check_permission_handler(
    State(state): State<AppState>,
    payload: Result<Json<PermissionCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let evaluator = state.guard().evaluator();
    let god_mode = evaluator.is_god_mode(request.role);
    let granted = evaluator.is_granted(request.role, &request.permissions, &request.required);

    info!(
        correlation_id = %correlation_id,
        role = %request.role,
        permission = %request.required,
        granted,
        "Permission evaluated"
    );

    (
        StatusCode::OK,
        Json(PermissionCheckResponse { granted, god_mode }),
    )
        .into_response()
}

/// Handler for POST /access/require.
///
/// Resolves the session and requires a permission of its user. Responds 401
/// without a live session and 403 when the permission is missing.
async fn require_permission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RequirePermissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let guard = state.guard();
    match guard.require_permission(session_token(&headers), &request.permission) {
        Ok(user) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %user.id,
                permission = %request.permission,
                "Permission granted"
            );
            authorized_response(&state, user)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Access check failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /access/require-any.
///
/// Like `/access/require`, but any one of the listed permissions suffices.
async fn require_any_permission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RequireAnyPermissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let required: Vec<&str> = request.permissions.iter().map(String::as_str).collect();
    match state
        .guard()
        .require_any_permission(session_token(&headers), &required)
    {
        Ok(user) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %user.id,
                permissions = ?required,
                "Permission granted"
            );
            authorized_response(&state, user)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Access check failed"
            );
            error_response(err)
        }
    }
}

/// The authorized user and their effective permissions, sorted.
fn authorized_response(state: &AppState, user: User) -> Response {
    let permissions = state
        .guard()
        .effective_permissions(&user)
        .sorted()
        .into_iter()
        .map(str::to_string)
        .collect();
    (
        StatusCode::OK,
        Json(AuthorizedUserResponse { user, permissions }),
    )
        .into_response()
}

/// Handler for GET /permissions.
///
/// Returns the permission catalog to any signed-in user.
async fn permission_catalog_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(err) = state.guard().require_user(session_token(&headers)) {
        return error_response(err);
    }

    (StatusCode::OK, Json(state.config().config().catalog().clone())).into_response()
}

/// Handler for POST /vacation/carryover.
///
/// Any target year is accepted. The per-year breakdown is only built when
/// asked for, and only for spans up to [`MAX_BREAKDOWN_YEARS`].
async fn carryover_handler(
    State(state): State<AppState>,
    payload: Result<Json<CarryoverRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing carryover request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let first_year = config.first_year();

    let span = i64::from(request.target_year) - i64::from(first_year);
    if request.include_breakdown && span > MAX_BREAKDOWN_YEARS {
        warn!(
            correlation_id = %correlation_id,
            target_year = request.target_year,
            first_year,
            "Breakdown span too large"
        );
        let error = ApiError::validation_error(format!(
            "Breakdown is limited to {} years; target_year {} is {} years after {}",
            MAX_BREAKDOWN_YEARS, request.target_year, span, first_year
        ));
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let ledger = request.ledger(config.default_allowance());

    let start_time = Instant::now();
    let response = if request.include_breakdown {
        let breakdown = carryover_breakdown(&ledger, first_year, request.target_year);
        CarryoverResponse {
            result: breakdown.result,
            years: Some(breakdown.years),
        }
    } else {
        CarryoverResponse {
            result: calculate_carryover(&ledger, first_year, request.target_year),
            years: None,
        }
    };
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        target_year = request.target_year,
        total = %response.result.total,
        duration_us = duration.as_micros(),
        "Carryover calculated"
    );

    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /vacation/balance.
///
/// Derives usage from approved requests and returns the year's balance.
async fn balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Some(err) = request.requests.iter().find_map(|r| r.validate().err()) {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Invalid vacation request"
        );
        return error_response(err);
    }

    let config = state.config();
    let ledger = request.ledger(config.default_allowance());
    let balance = calculate_balance(&ledger, config.first_year(), request.year);

    info!(
        correlation_id = %correlation_id,
        year = request.year,
        remaining = %balance.remaining,
        "Balance calculated"
    );

    (StatusCode::OK, Json(balance)).into_response()
}
