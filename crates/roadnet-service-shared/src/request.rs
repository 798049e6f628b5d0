//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input. Returns a boxed `ProblemDetails` to avoid large
/// `Result::Err` variants.
pub trait Validate {
    /// Validate the request; the `request_id` populates the `instance` field
    /// of any returned problem.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query parameters shared by the path endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathQuery {
    /// Source node identifier.
    pub source: String,

    /// Target node identifier.
    pub target: String,

    /// Request weighted search. Silently degrades to hop-count search when
    /// not every edge in the graph carries a weight; the response's
    /// `weighted_used` reports what actually ran.
    #[serde(default)]
    pub use_weight: bool,
}

impl Validate for PathQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.source.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'source' parameter is required and cannot be empty",
                request_id,
            )));
        }

        if self.target.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'target' parameter is required and cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}
