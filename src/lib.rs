//! Political candidates HTTP API.
//!
//! A small CRUD service over an in-memory collection of candidate records,
//! with pagination, substring search, party filtering and aggregate counts.
//!
//! ```text
//! GET    /api/candidates?skip=0&limit=100&search=green
//! GET    /api/candidates/{id}
//! POST   /api/candidates
//! PUT    /api/candidates/{id}
//! PATCH  /api/candidates/{id}
//! DELETE /api/candidates/{id}
//! GET    /api/candidates/party/{party}
//! GET    /api/candidates/search?query=green
//! GET    /api/stats
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Candidate records and the in-memory collection
//! - [`api`]: HTTP routes, handlers and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, Result};
pub use store::CandidateStore;
