//! Shared infrastructure for the roadnet HTTP service.
//!
//! This crate provides the HTTP glue used by the service binary:
//!
//! - [`AppState`]: the graph loaded once at startup, shared read-only
//! - [`health`]: liveness/readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request correlation and metrics middleware
//! - Request types with validation for the query endpoints
//!
//! # Architecture
//!
//! Handlers stay thin: all graph and routing logic lives in `roadnet-lib`;
//! this crate only parses requests, calls library APIs, and shapes
//! responses.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixture state for handler testing.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_path_computed, record_path_failed, record_path_hops,
    MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, RequestSpanLayer};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_MISSING_GEOMETRY, PROBLEM_NO_PATH, PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_NODE,
};
pub use request::{PathQuery, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
