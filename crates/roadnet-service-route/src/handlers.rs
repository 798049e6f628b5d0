//! Request handlers for the query surface.
//!
//! Every handler is stateless over the shared read-only [`AppState`]; none
//! mutates the graph, so arbitrarily many requests may run concurrently
//! without synchronization.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use roadnet_lib::{
    graph_geometry, graph_stats, path_geometry, shortest_path, Error as LibError, GraphGeometry,
    GraphStats, PathGeometry, PathSegment,
};
use roadnet_service_shared::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, metrics_handler,
    record_path_computed, record_path_failed, record_path_hops, AppState, PathQuery,
    ProblemDetails, RequestSpanLayer, ServiceResponse, Validate,
};

type ApiResult<T> = Result<ServiceResponse<T>, ProblemDetails>;

/// Assemble the service router over the given state.
///
/// CORS is permissive: the map front end is served from a different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/stats", get(stats))
        .route("/api/v1/shortest-path", get(shortest_path_basic))
        .route("/api/v1/shortest-path/detail", get(shortest_path_detail))
        .route("/api/v1/path-geometry", get(path_geometry_export))
        .route("/api/v1/graph-geometry", get(graph_geometry_export))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(RequestSpanLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Node-id sequence response for the basic path endpoint.
#[derive(Debug, Serialize)]
struct PathResponse {
    /// Ordered node identifiers from source to target.
    path: Vec<String>,
    /// Whether weighted search was actually used.
    weighted_used: bool,
}

/// Detailed path response with per-segment attributes.
#[derive(Debug, Serialize)]
struct PathDetailResponse {
    segments: Vec<PathSegment>,
    total_hops: usize,
    /// Null when any traversed segment lacks a weight.
    total_weight: Option<f64>,
    weighted_used: bool,
    /// Raw node ids, kept alongside the segments for convenience.
    path_nodes: Vec<String>,
}

/// Handle `GET /api/v1/stats`.
async fn stats(State(state): State<AppState>) -> ApiResult<GraphStats> {
    Ok(ServiceResponse::new(graph_stats(state.graph())))
}

/// Handle `GET /api/v1/shortest-path`.
async fn shortest_path_basic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PathQuery>,
) -> ApiResult<PathResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    validated(&query, request_id.as_str(), "shortest_path")?;

    info!(
        request_id = %request_id,
        source = %query.source,
        target = %query.target,
        use_weight = query.use_weight,
        "handling shortest-path request",
    );

    match shortest_path(state.graph(), &query.source, &query.target, query.use_weight) {
        Ok(result) => {
            record_path_computed("shortest_path", result.weighted_used);
            record_path_hops(result.total_hops);
            Ok(ServiceResponse::new(PathResponse {
                path: result.nodes,
                weighted_used: result.weighted_used,
            }))
        }
        Err(e) => Err(path_failure("shortest_path", &e, request_id.as_str())),
    }
}

/// Handle `GET /api/v1/shortest-path/detail`.
async fn shortest_path_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PathQuery>,
) -> ApiResult<PathDetailResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    validated(&query, request_id.as_str(), "shortest_path_detail")?;

    info!(
        request_id = %request_id,
        source = %query.source,
        target = %query.target,
        use_weight = query.use_weight,
        "handling shortest-path detail request",
    );

    match shortest_path(state.graph(), &query.source, &query.target, query.use_weight) {
        Ok(result) => {
            record_path_computed("shortest_path_detail", result.weighted_used);
            record_path_hops(result.total_hops);
            Ok(ServiceResponse::new(PathDetailResponse {
                segments: result.segments,
                total_hops: result.total_hops,
                total_weight: result.total_weight,
                weighted_used: result.weighted_used,
                path_nodes: result.nodes,
            }))
        }
        Err(e) => Err(path_failure("shortest_path_detail", &e, request_id.as_str())),
    }
}

/// Handle `GET /api/v1/path-geometry`.
async fn path_geometry_export(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PathQuery>,
) -> ApiResult<PathGeometry> {
    let request_id = extract_or_generate_request_id(&headers);
    validated(&query, request_id.as_str(), "path_geometry")?;

    info!(
        request_id = %request_id,
        source = %query.source,
        target = %query.target,
        use_weight = query.use_weight,
        "handling path-geometry request",
    );

    match path_geometry(state.graph(), &query.source, &query.target, query.use_weight) {
        Ok(geometry) => {
            record_path_computed("path_geometry", geometry.weighted_used);
            Ok(ServiceResponse::new(geometry))
        }
        Err(e) => Err(path_failure("path_geometry", &e, request_id.as_str())),
    }
}

/// Handle `GET /api/v1/graph-geometry`.
async fn graph_geometry_export(State(state): State<AppState>) -> ApiResult<GraphGeometry> {
    Ok(ServiceResponse::new(graph_geometry(state.graph())))
}

fn validated(
    query: &PathQuery,
    request_id: &str,
    endpoint: &'static str,
) -> Result<(), ProblemDetails> {
    query.validate(request_id).map_err(|problem| {
        record_path_failed(endpoint, "validation_error");
        *problem
    })
}

fn path_failure(endpoint: &'static str, error: &LibError, request_id: &str) -> ProblemDetails {
    error!(request_id = %request_id, error = %error, "path query failed");
    record_path_failed(endpoint, failure_reason(error));
    from_lib_error(error, request_id)
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownNode { .. } => "unknown_node",
        LibError::NoPath { .. } => "no_path",
        LibError::MissingGeometry { .. } => "missing_geometry",
        _ => "internal_error",
    }
}
