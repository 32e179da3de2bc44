// src/process/mod.rs

pub mod aggregate;
pub mod assemble;
pub mod series;

pub use aggregate::{aggregate, KeyedRow, Reduction};
pub use assemble::assemble;
pub use series::{build_series, SeriesOutcome};
