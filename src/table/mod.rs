// src/table/mod.rs

pub mod read;
pub mod write;

pub use read::{read_table, RawTable};
pub use write::{write_combined, write_normalized};

/// Aggregated, year-stamped rows for one statistic. Serialized as
/// `Tract ID, County, <columns>, Year`.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub statistic: String,
    /// Canonical value columns, in catalog order.
    pub columns: Vec<String>,
    /// Assembly fills year gaps in these columns when set.
    pub interpolate: bool,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub tract_id: String,
    pub county: String,
    pub year: u16,
    /// One value per column, in table order.
    pub values: Vec<f64>,
}

/// Full outer join over every built statistic. Serialized as
/// `Tract ID, County, Year, <columns>`.
#[derive(Debug, Clone)]
pub struct CombinedTable {
    /// Statistic columns in lexicographic order; the three key columns
    /// precede them in serialized form.
    pub columns: Vec<String>,
    pub rows: Vec<CombinedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    pub tract_id: String,
    pub county: String,
    pub year: u16,
    /// One cell per combined column; `None` where the owning statistic has
    /// no value for this key.
    pub cells: Vec<Option<f64>>,
}
