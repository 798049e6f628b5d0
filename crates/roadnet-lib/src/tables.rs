//! Raw node/edge table records produced by the offline ETL step.
//!
//! The loader is deliberately tolerant: the source dataset is known to be
//! imperfect, so malformed rows are counted and skipped rather than aborting
//! the load. Only a structurally unusable table (no identifier columns at
//! all) is a hard failure.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Header names accepted as the node identifier column.
const NODE_ID_COLUMNS: &[&str] = &["id", "osmid", "cnn"];

/// Row of the node table.
///
/// Coordinates may arrive as explicit `x`/`y` columns (longitude/latitude) or
/// as a raw `geom` string decoded later by [`crate::geometry::decode_point`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeRecord {
    #[serde(alias = "osmid", alias = "cnn", default)]
    pub id: String,
    #[serde(alias = "x", default)]
    pub lon: Option<f64>,
    #[serde(alias = "y", default)]
    pub lat: Option<f64>,
    #[serde(alias = "the_geom", default)]
    pub geom: Option<String>,
    #[serde(alias = "st_name", default)]
    pub street: Option<String>,
    #[serde(alias = "st_type", default)]
    pub street_type: Option<String>,
}

/// Row of the edge table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdgeRecord {
    #[serde(default)]
    pub u: String,
    #[serde(default)]
    pub v: String,
    #[serde(alias = "length", default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub real: Option<String>,
}

impl EdgeRecord {
    /// Interpret the lenient string boolean used by the source table.
    ///
    /// `"1"`, `"true"`, and `"yes"` (case-insensitive) mark a real segment;
    /// any other value marks a synthetic one. An absent flag defaults to real.
    pub fn is_real(&self) -> bool {
        match &self.real {
            None => true,
            Some(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ),
        }
    }
}

/// Load node records from a CSV table.
///
/// Fails with [`Error::DataIntegrity`] when the table has no identifier
/// column; individual undeserializable rows are counted and skipped.
pub fn load_node_records(path: &Path) -> Result<Vec<NodeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if !headers
        .iter()
        .any(|header| NODE_ID_COLUMNS.contains(&header.trim()))
    {
        return Err(Error::DataIntegrity {
            message: format!("node table {} has no identifier column", path.display()),
        });
    }

    let mut records = Vec::new();
    let mut malformed = 0usize;
    for row in reader.deserialize() {
        match row {
            Ok(record) => records.push(record),
            Err(error) => {
                malformed += 1;
                warn!(%error, "skipping malformed node row");
            }
        }
    }

    if malformed > 0 {
        warn!(malformed, path = %path.display(), "dropped malformed node rows");
    }

    Ok(records)
}

/// Load edge records from a CSV table.
///
/// Fails with [`Error::DataIntegrity`] when the table lacks the `u`/`v`
/// endpoint columns; individual undeserializable rows are counted and skipped.
pub fn load_edge_records(path: &Path) -> Result<Vec<EdgeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let has_column = |name: &str| headers.iter().any(|header| header.trim() == name);
    if !has_column("u") || !has_column("v") {
        return Err(Error::DataIntegrity {
            message: format!("edge table {} has no endpoint columns", path.display()),
        });
    }

    let mut records = Vec::new();
    let mut malformed = 0usize;
    for row in reader.deserialize() {
        match row {
            Ok(record) => records.push(record),
            Err(error) => {
                malformed += 1;
                warn!(%error, "skipping malformed edge row");
            }
        }
    }

    if malformed > 0 {
        warn!(malformed, path = %path.display(), "dropped malformed edge rows");
    }

    Ok(records)
}
