// src/process/assemble.rs
//! Joins the per-statistic tables into one combined dataset. A full outer
//! join on (tract, county, year) keeps every key any statistic produced;
//! statistics flagged for interpolation have their year gaps filled per
//! tract afterwards, so sparsely published variables still line up with the
//! dense ones.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use crate::table::{CombinedRow, CombinedTable, NormalizedTable};

/// Outer-join `tables` on (tract, county, year). Combined column order is
/// lexicographic, so the result is independent of the order tables arrive
/// in.
pub fn assemble(tables: &[NormalizedTable]) -> CombinedTable {
    let mut names: BTreeSet<String> = BTreeSet::new();
    for table in tables {
        for col in &table.columns {
            if !names.insert(col.clone()) {
                warn!(
                    statistic = %table.statistic,
                    column = %col,
                    "column supplied by more than one statistic, later values win"
                );
            }
        }
    }
    let columns: Vec<String> = names.into_iter().collect();
    let index: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut joined: BTreeMap<(String, String, u16), Vec<Option<f64>>> = BTreeMap::new();
    for table in tables {
        let slots: Vec<usize> = table.columns.iter().map(|c| index[c.as_str()]).collect();
        for row in &table.rows {
            let cells = joined
                .entry((row.tract_id.clone(), row.county.clone(), row.year))
                .or_insert_with(|| vec![None; columns.len()]);
            for (slot, value) in slots.iter().zip(&row.values) {
                cells[*slot] = Some(*value);
            }
        }
    }

    let mut rows: Vec<CombinedRow> = joined
        .into_iter()
        .map(|((tract_id, county, year), cells)| CombinedRow {
            tract_id,
            county,
            year,
            cells,
        })
        .collect();

    let fill: Vec<usize> = tables
        .iter()
        .filter(|t| t.interpolate)
        .flat_map(|t| t.columns.iter().map(|c| index[c.as_str()]))
        .collect();
    if !fill.is_empty() {
        interpolate_columns(&mut rows, &fill);
    }

    CombinedTable { columns, rows }
}

/// Fill empty cells of the given columns within each (tract, county) run.
/// Rows arrive sorted by (tract, county, year), so a run is contiguous and
/// its years strictly ascend.
fn interpolate_columns(rows: &mut [CombinedRow], columns: &[usize]) {
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len()
            && rows[end].tract_id == rows[start].tract_id
            && rows[end].county == rows[start].county
        {
            end += 1;
        }
        for &col in columns {
            fill_column(&mut rows[start..end], col);
        }
        start = end;
    }
}

fn fill_column(group: &mut [CombinedRow], col: usize) {
    let known: Vec<(usize, u16, f64)> = group
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.cells[col].map(|v| (i, row.year, v)))
        .collect();
    // Nothing to anchor on; the cells stay empty.
    let (Some(&(first_idx, _, first_val)), Some(&(last_idx, _, last_val))) =
        (known.first(), known.last())
    else {
        return;
    };

    // Runs outside the known span clamp to the nearest endpoint.
    for row in &mut group[..first_idx] {
        row.cells[col] = Some(first_val);
    }
    for row in &mut group[last_idx + 1..] {
        row.cells[col] = Some(last_val);
    }

    // Gaps between known points fill linearly in the year coordinate.
    for pair in known.windows(2) {
        let (a_idx, a_year, a_val) = pair[0];
        let (b_idx, b_year, b_val) = pair[1];
        if b_idx - a_idx <= 1 {
            continue;
        }
        let span = f64::from(b_year - a_year);
        for row in &mut group[a_idx + 1..b_idx] {
            let t = f64::from(row.year - a_year) / span;
            row.cells[col] = Some(a_val + (b_val - a_val) * t);
        }
    }
}
