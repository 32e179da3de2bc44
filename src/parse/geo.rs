// src/parse/geo.rs

use anyhow::{bail, Result};

const TRACT_MARKER: &str = "Census Tract ";
const COUNTY_SUFFIX: &str = " County";

/// Parsed pieces of a geographic area label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoKey {
    /// Tract identifier as printed, split suffix included, e.g. "1542.01".
    pub tract_id: String,
    /// Bare county name; empty when the label carries no county segment.
    pub county: String,
    /// State segment when present. Parsed for completeness, unused
    /// downstream.
    pub state: Option<String>,
}

/// Parse a label like `"Census Tract 1542.01, Sonoma County, California"`.
///
/// Both comma and semicolon delimiters occur across vintages. A missing
/// county or state is fine; a first segment that does not name a census
/// tract is not a tract row at all and is rejected.
pub fn parse_label(label: &str) -> Result<GeoKey> {
    let mut segments = label.split([',', ';']).map(str::trim);

    let first = match segments.next() {
        Some(s) if !s.is_empty() => s,
        _ => bail!("empty geographic label"),
    };
    let Some(tract_id) = first.strip_prefix(TRACT_MARKER) else {
        bail!("label does not name a census tract: {first:?}");
    };
    let tract_id = tract_id.trim();
    if tract_id.is_empty() {
        bail!("label names a census tract with no identifier: {label:?}");
    }

    let county = segments
        .next()
        .map(|s| s.strip_suffix(COUNTY_SUFFIX).unwrap_or(s).trim().to_string())
        .unwrap_or_default();
    let state = segments
        .next()
        .map(str::to_string)
        .filter(|s| !s.is_empty());

    Ok(GeoKey {
        tract_id: tract_id.to_string(),
        county,
        state,
    })
}

/// Tract identifier with any split suffix removed: "1542.01" becomes
/// "1542", an undotted identifier passes through.
pub fn parent_tract_id(tract_id: &str) -> &str {
    match tract_id.split_once('.') {
        Some((parent, _)) => parent,
        None => tract_id,
    }
}
