//! Test utilities for handler testing.
//!
//! Provides a shared [`AppState`] loaded from the checked-in CSV fixtures.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::state::AppState;

/// Path to the test fixture node table.
pub const FIXTURE_NODES_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures/nodes.csv");

/// Path to the test fixture edge table.
pub const FIXTURE_EDGES_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures/edges.csv");

/// Lazily-initialized test state built from the fixture tables.
static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Get a shared test AppState loaded from the fixture tables. The state is
/// cached after the first load.
///
/// # Panics
///
/// Panics if the fixtures cannot be loaded; that is a test configuration
/// issue.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            AppState::load(FIXTURE_NODES_PATH, FIXTURE_EDGES_PATH)
                .unwrap_or_else(|e| panic!("failed to load test fixtures: {}", e))
        })
        .clone()
}

/// Known node identifiers in the test fixture for use in tests.
pub mod fixture_nodes {
    /// Market & 9th intersection, western end of the fixture's main chain.
    pub const MARKET_WEST: &str = "65281033";

    /// Market St intersection one block east of [`MARKET_WEST`].
    pub const MARKET_EAST: &str = "65312874";

    /// Valencia St intersection, reachable from Market in two hops.
    pub const VALENCIA: &str = "65319522";

    /// Mission St intersection, linked to Market by a synthetic edge.
    pub const MISSION: &str = "65331744";

    /// Castro St intersection in the disconnected second component.
    pub const CASTRO: &str = "65352336";

    /// Hyde St intersection without coordinates, neighbour of [`CASTRO`].
    pub const HYDE_NO_COORDS: &str = "258757010";
}

/// Absolute paths to the fixture node and edge tables.
pub fn fixture_paths() -> (PathBuf, PathBuf) {
    (
        PathBuf::from(FIXTURE_NODES_PATH),
        PathBuf::from(FIXTURE_EDGES_PATH),
    )
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-{}", timestamp)
}
