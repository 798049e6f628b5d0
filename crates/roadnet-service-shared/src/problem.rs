//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details
//! standard. The problem `type` URI distinguishes the four query-time error
//! kinds, so clients can tell "no such node" from "no route" from "route
//! found but not drawable".
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use roadnet_lib::Error as LibError;

/// Problem type URI for unknown node identifiers.
pub const PROBLEM_UNKNOWN_NODE: &str = "/problems/unknown-node";

/// Problem type URI for node pairs with no connecting path.
pub const PROBLEM_NO_PATH: &str = "/problems/no-path";

/// Problem type URI for paths crossing a node without coordinates.
pub const PROBLEM_MISSING_GEOMETRY: &str = "/problems/missing-geometry";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., graph not loaded).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for unknown node identifiers.
    pub fn unknown_node(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_UNKNOWN_NODE, "Unknown Node", StatusCode::NOT_FOUND)
            .with_detail(format!("Node '{}' is not in the graph", id))
            .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for unreachable node pairs.
    pub fn no_path(source: &str, target: &str, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_NO_PATH, "No Path", StatusCode::NOT_FOUND)
            .with_detail(format!(
                "No path exists between '{}' and '{}'",
                source, target
            ))
            .with_request_id(request_id)
    }

    /// Create a 422 problem for a routable path that cannot be drawn.
    ///
    /// Deliberately not a 404: the route was found, the dataset just lacks
    /// coordinates for a node on it.
    pub fn missing_geometry(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_MISSING_GEOMETRY,
            "Missing Geometry",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(format!("Node '{}' on the path has no coordinates", id))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

/// Return ProblemDetails as an HTTP response with problem+json content type.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't
/// carry one.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownNode { id } => ProblemDetails::unknown_node(id, request_id),
        LibError::NoPath { origin, target } => {
            ProblemDetails::no_path(origin, target, request_id)
        }
        LibError::MissingGeometry { id } => ProblemDetails::missing_geometry(id, request_id),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem =
            ProblemDetails::new(PROBLEM_UNKNOWN_NODE, "Unknown Node", StatusCode::NOT_FOUND);
        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_NODE);
        assert_eq!(problem.title, "Unknown Node");
        assert_eq!(problem.status, 404);
    }

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("Missing 'source' parameter", "req-123");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_missing_geometry_is_not_a_404() {
        let problem = ProblemDetails::missing_geometry("258757010", "req-456");
        assert_eq!(problem.status, 422);
        assert_eq!(problem.type_uri, PROBLEM_MISSING_GEOMETRY);
        assert!(problem.detail.as_deref().unwrap().contains("258757010"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_unknown_node() {
        let error = LibError::UnknownNode {
            id: "999".to_string(),
        };
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_NODE);
        assert_eq!(problem.status, 404);
        assert!(problem.detail.as_deref().unwrap().contains("999"));
    }

    #[test]
    fn test_from_lib_error_no_path() {
        let error = LibError::NoPath {
            origin: "A".to_string(),
            target: "X".to_string(),
        };
        let problem = from_lib_error(&error, "req-route");

        assert_eq!(problem.type_uri, PROBLEM_NO_PATH);
        assert!(problem.detail.as_deref().unwrap().contains("A"));
        assert!(problem.detail.as_deref().unwrap().contains("X"));
    }

    #[test]
    fn test_from_lib_error_missing_geometry_is_distinct_from_no_path() {
        let missing = from_lib_error(
            &LibError::MissingGeometry {
                id: "B".to_string(),
            },
            "req-1",
        );
        let no_path = from_lib_error(
            &LibError::NoPath {
                origin: "A".to_string(),
                target: "B".to_string(),
            },
            "req-2",
        );

        assert_ne!(missing.type_uri, no_path.type_uri);
        assert_ne!(missing.status, no_path.status);
    }

    #[test]
    fn test_from_lib_error_fallback_is_internal() {
        let error = LibError::DataIntegrity {
            message: "bad table".to_string(),
        };
        let problem = from_lib_error(&error, "req-x");
        assert_eq!(problem.status, 500);
    }
}
