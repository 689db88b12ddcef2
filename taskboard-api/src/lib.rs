//! # Taskboard API Server Library
//!
//! Users, tasks and bearer-token authentication over a small REST API.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and auth middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: JSON body extractors with validation
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
