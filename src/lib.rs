//! Normalize yearly ACS tract-level CSV extracts into per-statistic tables
//! and assemble them into one combined dataset keyed by (tract, county,
//! year). Split census tracts collapse into their parent tract; header
//! vocabulary drift between survey vintages resolves against a static
//! statistic catalog.

pub mod discover;
pub mod parse;
pub mod process;
pub mod report;
pub mod resolve;
pub mod spec;
pub mod table;
