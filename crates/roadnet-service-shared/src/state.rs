//! Application state for the HTTP service.
//!
//! The graph is loaded once at startup and shared read-only by every
//! handler; no handler mutates it, so requests need no synchronization.

use std::path::Path;
use std::sync::Arc;

use roadnet_lib::{Error as LibError, GraphStore, LoadReport};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The graph tables could not be loaded or were structurally unusable.
    GraphLoad(LibError),

    /// Node table file not found.
    NodesTableNotFound(String),

    /// Edge table file not found.
    EdgesTableNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphLoad(e) => write!(f, "failed to load graph: {}", e),
            Self::NodesTableNotFound(path) => write!(f, "node table not found: {}", path),
            Self::EdgesTableNotFound(path) => write!(f, "edge table not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::GraphLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::GraphLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    graph: GraphStore,
    report: LoadReport,
}

impl AppState {
    /// Load application state from the node and edge CSV tables.
    pub fn load(
        nodes_path: impl AsRef<Path>,
        edges_path: impl AsRef<Path>,
    ) -> Result<Self, AppStateError> {
        let nodes_path = nodes_path.as_ref();
        let edges_path = edges_path.as_ref();

        if !nodes_path.exists() {
            return Err(AppStateError::NodesTableNotFound(
                nodes_path.display().to_string(),
            ));
        }
        if !edges_path.exists() {
            return Err(AppStateError::EdgesTableNotFound(
                edges_path.display().to_string(),
            ));
        }

        tracing::info!(
            nodes = %nodes_path.display(),
            edges = %edges_path.display(),
            "loading graph tables",
        );
        let (graph, report) = GraphStore::load_from_csv(nodes_path, edges_path)?;
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped_rows = report.dropped_rows(),
            "graph loaded",
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { graph, report }),
        })
    }

    /// Create application state from an already-built graph. Useful for
    /// testing or embedding.
    pub fn from_graph(graph: GraphStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                graph,
                report: LoadReport::default(),
            }),
        }
    }

    /// Access the loaded graph.
    pub fn graph(&self) -> &GraphStore {
        &self.inner.graph
    }

    /// Counters recorded while loading the graph.
    pub fn load_report(&self) -> &LoadReport {
        &self.inner.report
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.graph.node_count())
            .field("edge_count", &self.inner.graph.edge_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadnet_lib::{EdgeRecord, NodeRecord};

    fn minimal_graph() -> GraphStore {
        let nodes = vec![
            NodeRecord {
                id: "A".to_string(),
                lon: Some(0.0),
                lat: Some(0.0),
                ..Default::default()
            },
            NodeRecord {
                id: "B".to_string(),
                lon: Some(1.0),
                lat: Some(1.0),
                ..Default::default()
            },
        ];
        let edges = vec![EdgeRecord {
            u: "A".to_string(),
            v: "B".to_string(),
            weight: Some(1.0),
            ..Default::default()
        }];
        let (graph, _) = GraphStore::build(nodes, edges).expect("builds");
        graph
    }

    #[test]
    fn test_app_state_from_graph() {
        let state = AppState::from_graph(minimal_graph());
        assert_eq!(state.graph().node_count(), 2);
        assert_eq!(state.load_report().dropped_rows(), 0);
    }

    #[test]
    fn test_app_state_clone_shares_graph() {
        let state1 = AppState::from_graph(minimal_graph());
        let state2 = state1.clone();
        assert_eq!(state1.graph().node_count(), state2.graph().node_count());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_graph(minimal_graph());
        let debug = format!("{:?}", state);
        assert!(debug.contains("AppState"));
        assert!(debug.contains("node_count"));
    }

    #[test]
    fn test_app_state_load_missing_tables() {
        let result = AppState::load("/nonexistent/nodes.csv", "/nonexistent/edges.csv");
        match result.unwrap_err() {
            AppStateError::NodesTableNotFound(path) => assert!(path.contains("nonexistent")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
