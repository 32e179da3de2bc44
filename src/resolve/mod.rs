// src/resolve/mod.rs
//! Header resolution. Census extracts rename, reorder, and requalify their
//! columns between vintages; this module binds each canonical column of a
//! statistic to the raw column index (or index pair) carrying it in one
//! year's file. Resolution never fails outright: a column with no home in
//! the header binds as `Missing` and zero-fills downstream.

use regex::Regex;
use tracing::warn;

use crate::spec::{AggregateRule, ColumnSpec, Resolution, StatisticSpec};

/// Where a canonical column's value comes from within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Single raw column at this index.
    Column(usize),
    /// Ratio of two raw columns, scaled to a percentage.
    Share { numerator: usize, denominator: usize },
    /// No raw column found; values zero-fill.
    Missing,
}

/// Resolution of every canonical column of one statistic against one
/// header row.
#[derive(Debug)]
pub struct ResolvedColumns {
    /// One binding per canonical column, in catalog order.
    pub bindings: Vec<Binding>,
    /// Raw index of the aggregation weight column, when the rule calls for
    /// one and the header carries it.
    pub weight: Option<usize>,
}

/// Bind every canonical column of `spec` against `headers` for `year`.
pub fn resolve(headers: &[String], spec: &StatisticSpec, year: u16) -> ResolvedColumns {
    let bindings = spec
        .columns
        .iter()
        .map(|col| resolve_column(headers, col, &spec.name, year))
        .collect();

    let weight = match &spec.rule {
        AggregateRule::WeightedMean { weight } => {
            match resolve_column(headers, weight, &spec.name, year) {
                Binding::Column(idx) => Some(idx),
                _ => None,
            }
        }
        _ => None,
    };

    ResolvedColumns { bindings, weight }
}

fn resolve_column(headers: &[String], col: &ColumnSpec, statistic: &str, year: u16) -> Binding {
    let Some(entry) = col.entry_for(year) else {
        warn!(
            statistic,
            column = %col.name,
            year,
            "no resolution entry covers this year"
        );
        return Binding::Missing;
    };

    match &entry.how {
        Resolution::Exact(name) => match position(headers, name) {
            Some(idx) => Binding::Column(idx),
            None => {
                warn!(statistic, column = %col.name, year, raw = %name, "raw column not found");
                Binding::Missing
            }
        },
        Resolution::Suffix(candidates) => {
            // Candidates in order, headers in order: the estimate column of
            // a census extract precedes its margin-of-error twin, so the
            // first match is the estimate.
            for candidate in candidates {
                let re = compile(candidate);
                if let Some(idx) = headers.iter().position(|h| re.is_match(h)) {
                    return Binding::Column(idx);
                }
            }
            warn!(statistic, column = %col.name, year, "no header matches any candidate pattern");
            Binding::Missing
        }
        Resolution::Share {
            numerator,
            denominator,
        } => match (position(headers, numerator), position(headers, denominator)) {
            (Some(num), Some(den)) => Binding::Share {
                numerator: num,
                denominator: den,
            },
            _ => {
                warn!(
                    statistic,
                    column = %col.name,
                    year,
                    "share operands not found in header"
                );
                Binding::Missing
            }
        },
    }
}

fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn compile(pattern: &str) -> Regex {
    // Catalog patterns are static and covered by tests.
    Regex::new(pattern).expect("catalog pattern should compile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ColumnSpec, HeaderRow, Resolution, ResolutionEntry, YearRange};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn suffix_col(name: &str, years: YearRange, candidates: &[&str]) -> ColumnSpec {
        ColumnSpec {
            name: name.to_string(),
            entries: vec![ResolutionEntry {
                years,
                how: Resolution::Suffix(candidates.iter().map(|s| s.to_string()).collect()),
            }],
        }
    }

    fn spec_with(columns: Vec<ColumnSpec>, rule: AggregateRule) -> StatisticSpec {
        StatisticSpec {
            name: "test_stat".to_string(),
            table: "T0000".to_string(),
            file_pattern: "{year}.csv".to_string(),
            header_row: HeaderRow::First,
            columns,
            rule,
            interpolate: false,
        }
    }

    #[test]
    fn end_anchoring_separates_total_from_subtotals() {
        let headers = headers(&[
            "Geography",
            "Geographic Area Name",
            "Estimate!!Total",
            "Margin of Error!!Total",
            "Estimate!!Total!!Occupied",
            "Estimate!!Total!!Vacant",
        ]);
        let years = YearRange::new(2010, 2023);
        let spec = spec_with(
            vec![
                suffix_col("Total", years, &[r"Estimate!!Total:?$"]),
                suffix_col("Occupied", years, &[r"Estimate!!Total:?!!Occupied$"]),
                suffix_col("Vacant", years, &[r"Estimate!!Total:?!!Vacant$"]),
            ],
            AggregateRule::Sum,
        );

        let resolved = resolve(&headers, &spec, 2015);
        assert_eq!(
            resolved.bindings,
            vec![Binding::Column(2), Binding::Column(4), Binding::Column(5)]
        );
    }

    #[test]
    fn optional_colon_covers_relabelled_totals() {
        let headers = headers(&["Geographic Area Name", "Estimate!!Total:"]);
        let spec = spec_with(
            vec![suffix_col(
                "Total",
                YearRange::new(2010, 2023),
                &[r"Estimate!!Total:?$"],
            )],
            AggregateRule::Sum,
        );
        assert_eq!(resolve(&headers, &spec, 2022).bindings, vec![Binding::Column(1)]);
    }

    #[test]
    fn qualifier_segments_before_the_suffix_are_ignored() {
        let headers = headers(&[
            "Geographic Area Name",
            "Estimate!!Total:",
            "Estimate!!Total:!!Occupied units paying rent!!20.0 to 24.9 percent",
        ]);
        let spec = spec_with(
            vec![suffix_col(
                "GRAPI_20.0_to_24.9_percent",
                YearRange::new(2010, 2023),
                &[r"20\.0 to 24\.9 percent$"],
            )],
            AggregateRule::Sum,
        );
        assert_eq!(resolve(&headers, &spec, 2020).bindings, vec![Binding::Column(2)]);
    }

    #[test]
    fn candidates_try_in_order_until_one_matches() {
        let headers = headers(&[
            "Geographic Area Name",
            "Households!!Estimate!!Median income (dollars)",
        ]);
        let spec = spec_with(
            vec![suffix_col(
                "Median_Household_Income",
                YearRange::new(2010, 2023),
                &[
                    r"^Estimate!!Households!!Median income \(dollars\)$",
                    r"^Households!!Estimate!!Median income \(dollars\)$",
                ],
            )],
            AggregateRule::Mean,
        );
        assert_eq!(resolve(&headers, &spec, 2013).bindings, vec![Binding::Column(1)]);
    }

    #[test]
    fn estimate_resolves_ahead_of_margin_of_error() {
        // Headers scan left to right, so the estimate wins even when the
        // margin-of-error column would also match a looser pattern.
        let headers = headers(&[
            "Geography",
            "Geographic Area Name",
            "Margin of Error!!Total",
            "Estimate!!Total",
        ]);
        let spec = spec_with(
            vec![suffix_col(
                "Estimate!!Total",
                YearRange::new(2010, 2023),
                &[r"Estimate!!Total:?$"],
            )],
            AggregateRule::Sum,
        );
        assert_eq!(resolve(&headers, &spec, 2010).bindings, vec![Binding::Column(3)]);
    }

    #[test]
    fn exact_and_share_entries_select_by_year() {
        let headers = headers(&["NAME", "S1501_C01_006E", "S1501_C01_015E"]);
        let col = ColumnSpec {
            name: "count".to_string(),
            entries: vec![
                ResolutionEntry {
                    years: YearRange::new(2010, 2017),
                    how: Resolution::Exact("S1501_C01_015E".to_string()),
                },
                ResolutionEntry {
                    years: YearRange::new(2018, 2023),
                    how: Resolution::Share {
                        numerator: "S1501_C01_015E".to_string(),
                        denominator: "S1501_C01_006E".to_string(),
                    },
                },
            ],
        };
        let spec = spec_with(vec![col], AggregateRule::Mean);

        assert_eq!(resolve(&headers, &spec, 2014).bindings, vec![Binding::Column(2)]);
        assert_eq!(
            resolve(&headers, &spec, 2019).bindings,
            vec![Binding::Share {
                numerator: 2,
                denominator: 1
            }]
        );
    }

    #[test]
    fn unmatched_column_binds_missing() {
        let headers = headers(&["Geographic Area Name", "Estimate!!Total"]);
        let spec = spec_with(
            vec![suffix_col(
                "Vacant",
                YearRange::new(2010, 2023),
                &[r"Estimate!!Total:?!!Vacant$"],
            )],
            AggregateRule::Sum,
        );
        assert_eq!(resolve(&headers, &spec, 2015).bindings, vec![Binding::Missing]);
    }

    #[test]
    fn year_outside_every_entry_binds_missing() {
        let headers = headers(&["Geographic Area Name", "Estimate!!Total"]);
        let spec = spec_with(
            vec![suffix_col(
                "Total",
                YearRange::new(2010, 2023),
                &[r"Estimate!!Total:?$"],
            )],
            AggregateRule::Sum,
        );
        assert_eq!(resolve(&headers, &spec, 2009).bindings, vec![Binding::Missing]);
    }

    #[test]
    fn weight_column_resolves_only_for_weighted_rules() {
        let headers = headers(&[
            "Geographic Area Name",
            "Households!!Estimate!!Total",
            "Households!!Estimate!!Less than $10,000",
        ]);
        let years = YearRange::new(2010, 2023);
        let weighted = spec_with(
            vec![suffix_col("Low", years, &[r"Less than \$10,000$"])],
            AggregateRule::WeightedMean {
                weight: suffix_col("Total_Households", years, &[r"^Households!!Estimate!!Total$"]),
            },
        );
        let resolved = resolve(&headers, &weighted, 2015);
        assert_eq!(resolved.bindings, vec![Binding::Column(2)]);
        assert_eq!(resolved.weight, Some(1));

        let unweighted = spec_with(
            vec![suffix_col("Low", years, &[r"Less than \$10,000$"])],
            AggregateRule::Sum,
        );
        assert_eq!(resolve(&headers, &unweighted, 2015).weight, None);
    }

    #[test]
    fn missing_weight_column_resolves_none() {
        let headers = headers(&["Geographic Area Name", "Households!!Estimate!!Less than $10,000"]);
        let years = YearRange::new(2010, 2023);
        let spec = spec_with(
            vec![suffix_col("Low", years, &[r"Less than \$10,000$"])],
            AggregateRule::WeightedMean {
                weight: suffix_col("Total_Households", years, &[r"^Households!!Estimate!!Total$"]),
            },
        );
        let resolved = resolve(&headers, &spec, 2015);
        assert_eq!(resolved.bindings, vec![Binding::Column(1)]);
        assert_eq!(resolved.weight, None);
    }
}
