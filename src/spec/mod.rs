// src/spec/mod.rs

pub mod catalog;
pub mod types;

pub use catalog::{default_specs, find_spec, spec_names, CATALOG, CATALOG_YEARS};
pub use types::{
    AggregateRule, ColumnSpec, HeaderRow, Resolution, ResolutionEntry, StatisticSpec, YearRange,
};
