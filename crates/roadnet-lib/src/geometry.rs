//! Single-point geometry decoding.
//!
//! The source dataset encodes intersection locations as WKT-style strings of
//! the form `POINT (lon lat)`. The encoding stores longitude first; the
//! decoder returns `(lat, lon)` and must never transpose the two.

/// Decode a `POINT (lon lat)` string into `(latitude, longitude)`.
///
/// Returns `None` for anything that does not match the single-point pattern,
/// so callers can drop or flag the record. Never panics on malformed input.
pub fn decode_point(raw: &str) -> Option<(f64, f64)> {
    let rest = raw.trim().strip_prefix("POINT")?.trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;

    let mut parts = inner.split_whitespace();
    let lon: f64 = parts.next()?.parse().ok()?;
    let lat: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    if !lon.is_finite() || !lat.is_finite() {
        return None;
    }

    Some((lat, lon))
}
