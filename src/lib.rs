//! Staff Policy Engine
//!
//! This crate provides the permission evaluation and vacation carryover logic
//! behind a multi-tenant restaurant staff management application, together
//! with the configuration, access guard and HTTP surface that call into them.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod vacation;
