//! HTTP API module for the Staff Policy Engine.
//!
//! This module exposes the permission evaluator, the access guard, the
//! permission catalog and the vacation calculations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_BREAKDOWN_YEARS, SESSION_HEADER, create_router};
pub use request::{BalanceRequest, CarryoverRequest, PermissionCheckRequest};
pub use response::{ApiError, CarryoverResponse};
pub use state::AppState;
