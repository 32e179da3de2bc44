// src/table/read.rs

use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

use crate::spec::HeaderRow;

/// One source file's content: the header row named by the statistic plus
/// every data row after it, padded to header width.
#[derive(Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of the geographic label column. Descriptive headers call it
    /// "Geographic Area Name", code headers "NAME".
    pub fn label_column(&self) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h == "Geographic Area Name" || h == "NAME")
    }
}

/// Read `path` taking the header from the given physical row. Rows shorter
/// than the header pad with empty cells; longer rows keep their tail, which
/// nothing binds to.
pub fn read_table(path: &Path, header_row: HeaderRow) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let skip = match header_row {
        HeaderRow::First => 0,
        HeaderRow::Second => 1,
    };

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record =
            record.with_context(|| format!("reading {} record {}", path.display(), idx))?;
        if idx < skip {
            continue;
        }
        match &headers {
            None => {
                headers = Some(record.iter().map(|s| s.trim().to_string()).collect());
            }
            Some(h) => {
                let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                if row.len() < h.len() {
                    row.resize(h.len(), String::new());
                }
                rows.push(row);
            }
        }
    }

    match headers {
        Some(headers) => Ok(RawTable { headers, rows }),
        None => bail!("{} has no header row", path.display()),
    }
}
