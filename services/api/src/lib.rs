//! Movies API service library
//!
//! Exposes the router, application state, and supporting modules so the
//! binary and the integration tests can drive the service in-process.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
