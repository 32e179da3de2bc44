// src/report.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Bookkeeping for one statistic's build, serialized into the run report.
#[derive(Debug, Serialize)]
pub struct StatisticReport {
    pub statistic: String,
    pub years_processed: Vec<u16>,
    pub years_skipped: Vec<u16>,
    /// Aggregated rows written to the statistic's output file.
    pub rows_emitted: usize,
    /// Source rows dropped for unusable geographic labels.
    pub rows_dropped: usize,
    /// Canonical columns that zero-filled for want of a raw header.
    pub missing_columns: Vec<MissingColumn>,
    /// Set when the whole build failed; no output file exists for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MissingColumn {
    pub year: u16,
    pub column: String,
}

impl StatisticReport {
    pub fn new(statistic: &str) -> Self {
        Self {
            statistic: statistic.to_string(),
            years_processed: Vec::new(),
            years_skipped: Vec::new(),
            rows_emitted: 0,
            rows_dropped: 0,
            missing_columns: Vec::new(),
            error: None,
        }
    }

    pub fn failed(statistic: &str, error: &anyhow::Error) -> Self {
        let mut report = Self::new(statistic);
        report.error = Some(format!("{error:#}"));
        report
    }

    pub fn note_missing_column(&mut self, year: u16, column: &str) {
        self.missing_columns.push(MissingColumn {
            year,
            column: column.to_string(),
        });
    }
}

/// Everything one pipeline run did, written alongside the outputs.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub statistics: Vec<StatisticReport>,
}

pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, report)
        .with_context(|| format!("serializing run report to {}", path.display()))?;
    file.write_all(b"\n")?;
    Ok(())
}
