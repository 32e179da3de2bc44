// src/spec/types.rs

use std::fmt;

/// Inclusive range of survey vintage years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: u16,
    pub end: u16,
}

impl YearRange {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: u16) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Which physical row of an extract carries the column names.
///
/// Detailed-table downloads put machine codes on row 0 and the descriptive
/// labels on row 1; subject tables bind against the code row itself because
/// their descriptive labels repeat across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRow {
    /// Row 0 is the header.
    First,
    /// Row 0 is skipped, row 1 is the header.
    Second,
}

/// How a canonical column is located in one year's raw header row.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// End-anchored regex candidates tried in order; the first header
    /// matched by any candidate wins.
    Suffix(Vec<String>),
    /// Exact raw column name.
    Exact(String),
    /// Derived value `100 * numerator / denominator`, both exact names.
    /// A zero denominator yields 0.
    Share {
        numerator: String,
        denominator: String,
    },
}

/// One (year range, resolution) pairing for a column.
#[derive(Debug, Clone)]
pub struct ResolutionEntry {
    pub years: YearRange,
    pub how: Resolution,
}

/// A canonical output column and how to find it, per vintage.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    /// Tried in order; the first entry whose range contains the requested
    /// year applies.
    pub entries: Vec<ResolutionEntry>,
}

impl ColumnSpec {
    pub fn entry_for(&self, year: u16) -> Option<&ResolutionEntry> {
        self.entries.iter().find(|e| e.years.contains(year))
    }
}

/// How rows sharing a parent tract collapse into one.
#[derive(Debug, Clone)]
pub enum AggregateRule {
    /// Arithmetic sum; counts partition cleanly across a tract split.
    Sum,
    /// Unweighted mean. Medians of sub-tracts cannot be recombined exactly,
    /// so the simple average stands in for them.
    Mean,
    /// Percentages recombined through an accompanying total: each row's
    /// percentage converts back to a count using `weight`, counts and
    /// weights sum per group, and the percentage is recomputed. A group
    /// whose weights sum to zero yields 0.
    WeightedMean { weight: ColumnSpec },
}

/// Static description of one processed statistic.
#[derive(Debug, Clone)]
pub struct StatisticSpec {
    /// Short name; doubles as the output file stem.
    pub name: String,
    /// Source census table, for diagnostics.
    pub table: String,
    /// Source filename with a `{year}` placeholder.
    pub file_pattern: String,
    pub header_row: HeaderRow,
    /// Canonical value columns, in output order.
    pub columns: Vec<ColumnSpec>,
    pub rule: AggregateRule,
    /// Fill year gaps in this statistic's columns during assembly.
    pub interpolate: bool,
}

impl StatisticSpec {
    pub fn source_file(&self, year: u16) -> String {
        self.file_pattern.replace("{year}", &year.to_string())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}
