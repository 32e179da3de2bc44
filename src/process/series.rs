// src/process/series.rs
//! Drives one statistic across its year range: locate each year's extract,
//! resolve headers, key and coerce the rows, aggregate, and stack the
//! year-stamped results into one table. Individual years fail soft; the
//! build fails only when no year produced anything.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::{debug, error, info, warn};

use crate::discover::SourceDir;
use crate::parse::{geo, value};
use crate::process::aggregate::{aggregate, KeyedRow, Reduction};
use crate::report::StatisticReport;
use crate::resolve::{resolve, Binding};
use crate::spec::{AggregateRule, StatisticSpec, YearRange};
use crate::table::{read_table, NormalizedTable, TableRow};

/// A built statistic plus the bookkeeping the run report wants.
#[derive(Debug)]
pub struct SeriesOutcome {
    pub table: NormalizedTable,
    pub report: StatisticReport,
}

/// Build `spec` over `years` from the extracts under `src`.
pub fn build_series(spec: &StatisticSpec, years: YearRange, src: &SourceDir) -> Result<SeriesOutcome> {
    let mut report = StatisticReport::new(&spec.name);
    let mut rows = Vec::new();

    for year in years.iter() {
        let Some(path) = src.locate(spec, year) else {
            warn!(statistic = %spec.name, year, "source file missing, skipping year");
            report.years_skipped.push(year);
            continue;
        };
        match build_year(spec, year, &path, &mut report) {
            Ok(mut year_rows) => {
                info!(
                    statistic = %spec.name,
                    year,
                    tracts = year_rows.len(),
                    "processed {}",
                    path.display()
                );
                report.years_processed.push(year);
                rows.append(&mut year_rows);
            }
            Err(err) => {
                error!(statistic = %spec.name, year, "skipping year: {err:#}");
                report.years_skipped.push(year);
            }
        }
    }

    if rows.is_empty() {
        bail!("no data processed for {} over {}", spec.name, years);
    }
    report.rows_emitted = rows.len();

    Ok(SeriesOutcome {
        table: NormalizedTable {
            statistic: spec.name.clone(),
            columns: spec.column_names(),
            interpolate: spec.interpolate,
            rows,
        },
        report,
    })
}

fn build_year(
    spec: &StatisticSpec,
    year: u16,
    path: &Path,
    report: &mut StatisticReport,
) -> Result<Vec<TableRow>> {
    let raw = read_table(path, spec.header_row)?;
    let Some(label_idx) = raw.label_column() else {
        bail!("{} has no geographic label column", path.display());
    };

    let resolved = resolve(&raw.headers, spec, year);
    for (col, binding) in spec.columns.iter().zip(&resolved.bindings) {
        if matches!(binding, Binding::Missing) {
            report.note_missing_column(year, &col.name);
        }
    }

    // A weighted rule without its weight column degrades to a simple mean
    // for the year.
    let reduction = match (&spec.rule, resolved.weight) {
        (AggregateRule::Sum, _) => Reduction::Sum,
        (AggregateRule::Mean, _) => Reduction::Mean,
        (AggregateRule::WeightedMean { .. }, Some(_)) => Reduction::WeightedMean,
        (AggregateRule::WeightedMean { weight }, None) => {
            warn!(
                statistic = %spec.name,
                year,
                weight = %weight.name,
                "weight column unresolved, using simple mean for this year"
            );
            Reduction::Mean
        }
    };

    let mut keyed = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let key = match geo::parse_label(&row[label_idx]) {
            Ok(key) => key,
            Err(err) => {
                debug!(statistic = %spec.name, year, "dropping row: {err}");
                report.rows_dropped += 1;
                continue;
            }
        };
        let values = resolved
            .bindings
            .iter()
            .map(|binding| binding_value(binding, row))
            .collect();
        let weight = resolved
            .weight
            .map(|idx| value::coerce(&row[idx]))
            .unwrap_or(0.0);

        keyed.push(KeyedRow {
            parent_tract: geo::parent_tract_id(&key.tract_id).to_string(),
            county: key.county,
            year,
            values,
            weight,
        });
    }

    Ok(aggregate(keyed, reduction, spec.columns.len()))
}

fn binding_value(binding: &Binding, row: &[String]) -> f64 {
    match binding {
        Binding::Column(idx) => value::coerce(&row[*idx]),
        Binding::Share {
            numerator,
            denominator,
        } => {
            let num = value::coerce(&row[*numerator]);
            let den = value::coerce(&row[*denominator]);
            if den == 0.0 {
                0.0
            } else {
                num / den * 100.0
            }
        }
        Binding::Missing => 0.0,
    }
}
