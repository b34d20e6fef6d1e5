//! Configuration loading and management for the Staff Policy Engine.
//!
//! This module loads the god-mode role set, per-role default permissions,
//! the permission catalog and the vacation policy from YAML files. These
//! values are injected into the evaluator and calculator rather than held
//! as process-wide constants.
//!
//! # Example
//!
//! ```no_run
//! use staff_policy_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("First tracked year: {}", config.first_year());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AccessConfig, PolicyConfig, VacationConfig};
