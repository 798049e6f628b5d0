use thiserror::Error;

/// Convenient result alias for the roadnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Input tables were structurally unusable (e.g. no identifier column).
    /// Row-level quality problems never produce this; they are counted in the
    /// [`crate::graph::LoadReport`] instead.
    #[error("data integrity failure: {message}")]
    DataIntegrity { message: String },

    /// A query referenced a node identifier absent from the graph.
    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    /// Source and target are in different connected components.
    #[error("no path between {origin} and {target}")]
    NoPath { origin: String, target: String },

    /// A node on an otherwise valid path has no coordinates, so the path
    /// cannot be rendered. Distinct from [`Error::NoPath`]: the route exists.
    #[error("node {id} has no coordinates")]
    MissingGeometry { id: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
