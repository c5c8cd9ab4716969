//! Common library for the movie-bookmarking backend
//!
//! This crate provides shared infrastructure used by the API service:
//! PostgreSQL connection pooling and database error handling.

pub mod database;
pub mod error;
