// src/table/write.rs

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::table::{CombinedTable, NormalizedTable};

/// Write one statistic's table as `Tract ID, County, <columns>, Year`.
pub fn write_normalized(table: &NormalizedTable, path: &Path) -> Result<()> {
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Tract ID".to_string(), "County".to_string()];
    header.extend(table.columns.iter().cloned());
    header.push("Year".to_string());
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.tract_id.clone(), row.county.clone()];
        record.extend(row.values.iter().map(|v| format_cell(*v)));
        record.push(row.year.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write the combined dataset as `Tract ID, County, Year, <columns>`. Keys
/// a statistic never covered serialize as empty cells.
pub fn write_combined(table: &CombinedTable, path: &Path) -> Result<()> {
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![
        "Tract ID".to_string(),
        "County".to_string(),
        "Year".to_string(),
    ];
    header.extend(table.columns.iter().cloned());
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.tract_id.clone(), row.county.clone(), row.year.to_string()];
        record.extend(row.cells.iter().map(|cell| match cell {
            Some(v) => format_cell(*v),
            None => String::new(),
        }));
        wtr.write_record(&record)?;
    }

    wtr.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Whole numbers print without a fractional part.
fn format_cell(v: f64) -> String {
    format!("{v}")
}
