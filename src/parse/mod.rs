// src/parse/mod.rs

pub mod geo;
pub mod value;

pub use geo::{parent_tract_id, parse_label, GeoKey};
pub use value::coerce;
