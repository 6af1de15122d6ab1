//! nodegate-api: REST gateway over the nodegate graph store.
//!
//! Parses and validates request payloads, enforces the bearer token on
//! the segment routes, and maps store results onto HTTP responses.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{router, AppState};
