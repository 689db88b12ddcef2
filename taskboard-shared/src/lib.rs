//! # Taskboard Shared Library
//!
//! Types and data access shared by the Taskboard API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database rows and their queries (users, tasks)
//! - `auth`: Token issuing/validation and ownership checks
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
