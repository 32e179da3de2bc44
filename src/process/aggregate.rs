// src/process/aggregate.rs

use std::collections::BTreeMap;

use crate::table::TableRow;

/// Reduction applied to each (parent tract, county, year) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
    /// Recombines percentages through the per-row weights carried on the
    /// rows: each percentage converts back to a count, counts and weights
    /// sum, and the group percentage is recomputed.
    WeightedMean,
}

/// One coerced source row, already keyed by its split-stable parent tract.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRow {
    pub parent_tract: String,
    pub county: String,
    pub year: u16,
    /// One value per canonical column.
    pub values: Vec<f64>,
    /// Group weight contribution; only read under `WeightedMean`.
    pub weight: f64,
}

struct Accumulator {
    totals: Vec<f64>,
    rows: usize,
    weight: f64,
}

impl Accumulator {
    fn new(width: usize) -> Self {
        Self {
            totals: vec![0.0; width],
            rows: 0,
            weight: 0.0,
        }
    }

    fn add(&mut self, values: &[f64], weight: f64, reduction: Reduction) {
        match reduction {
            Reduction::Sum | Reduction::Mean => {
                for (total, v) in self.totals.iter_mut().zip(values) {
                    *total += v;
                }
            }
            Reduction::WeightedMean => {
                for (total, v) in self.totals.iter_mut().zip(values) {
                    *total += v / 100.0 * weight;
                }
            }
        }
        self.rows += 1;
        self.weight += weight;
    }

    fn finish(self, reduction: Reduction) -> Vec<f64> {
        match reduction {
            Reduction::Sum => self.totals,
            Reduction::Mean => {
                let n = self.rows as f64;
                self.totals.into_iter().map(|t| t / n).collect()
            }
            Reduction::WeightedMean => {
                if self.weight == 0.0 {
                    vec![0.0; self.totals.len()]
                } else {
                    self.totals
                        .into_iter()
                        .map(|t| t / self.weight * 100.0)
                        .collect()
                }
            }
        }
    }
}

/// Collapse rows sharing (parent tract, county, year) into one row per
/// group. Grouping runs over a BTreeMap, so output order and content are
/// independent of input order.
pub fn aggregate(rows: Vec<KeyedRow>, reduction: Reduction, width: usize) -> Vec<TableRow> {
    let mut groups: BTreeMap<(String, String, u16), Accumulator> = BTreeMap::new();

    for KeyedRow {
        parent_tract,
        county,
        year,
        values,
        weight,
    } in rows
    {
        groups
            .entry((parent_tract, county, year))
            .or_insert_with(|| Accumulator::new(width))
            .add(&values, weight, reduction);
    }

    groups
        .into_iter()
        .map(|((tract_id, county, year), acc)| TableRow {
            tract_id,
            county,
            year,
            values: acc.finish(reduction),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tract: &str, county: &str, values: &[f64], weight: f64) -> KeyedRow {
        KeyedRow {
            parent_tract: tract.to_string(),
            county: county.to_string(),
            year: 2015,
            values: values.to_vec(),
            weight,
        }
    }

    #[test]
    fn sum_adds_split_tracts() {
        let out = aggregate(
            vec![row("1542", "Sonoma", &[100.0], 0.0), row("1542", "Sonoma", &[50.0], 0.0)],
            Reduction::Sum,
            1,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tract_id, "1542");
        assert_eq!(out[0].values, vec![150.0]);
    }

    #[test]
    fn mean_averages_split_tracts() {
        let out = aggregate(
            vec![
                row("1542", "Sonoma", &[1000.0], 0.0),
                row("1542", "Sonoma", &[2000.0], 0.0),
            ],
            Reduction::Mean,
            1,
        );
        assert_eq!(out[0].values, vec![1500.0]);
    }

    #[test]
    fn weighted_mean_recombines_through_counts() {
        // 50% of 100 households plus 10% of 900 households is 140 of 1000,
        // i.e. 14%.
        let out = aggregate(
            vec![
                row("1542", "Sonoma", &[50.0], 100.0),
                row("1542", "Sonoma", &[10.0], 900.0),
            ],
            Reduction::WeightedMean,
            1,
        );
        assert!((out[0].values[0] - 14.0).abs() < 1e-9);
    }

    #[test]
    fn zero_weight_group_yields_zero() {
        let out = aggregate(
            vec![
                row("1542", "Sonoma", &[50.0], 0.0),
                row("1542", "Sonoma", &[10.0], 0.0),
            ],
            Reduction::WeightedMean,
            1,
        );
        assert_eq!(out[0].values, vec![0.0]);
    }

    #[test]
    fn groups_split_by_county_and_year() {
        let mut napa = row("100", "Napa", &[10.0], 0.0);
        napa.year = 2016;
        let out = aggregate(
            vec![
                row("100", "Sonoma", &[1.0], 0.0),
                row("100", "Napa", &[5.0], 0.0),
                napa,
            ],
            Reduction::Sum,
            1,
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn output_is_input_order_independent() {
        let forward = vec![
            row("1542", "Sonoma", &[100.0, 7.0], 0.0),
            row("1542", "Sonoma", &[50.0, 3.0], 0.0),
            row("4001", "Alameda", &[20.0, 1.0], 0.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            aggregate(forward, Reduction::Sum, 2),
            aggregate(reversed, Reduction::Sum, 2)
        );
    }

    #[test]
    fn output_is_sorted_by_key() {
        let out = aggregate(
            vec![
                row("99", "Sonoma", &[1.0], 0.0),
                row("100", "Alameda", &[1.0], 0.0),
            ],
            Reduction::Sum,
            1,
        );
        // Lexicographic tract order, not numeric.
        assert_eq!(out[0].tract_id, "100");
        assert_eq!(out[1].tract_id, "99");
    }
}
