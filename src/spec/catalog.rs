// src/spec/catalog.rs
//! The statistic catalog. Every supported statistic is a static entry here:
//! which file it comes from, where its header row sits, how each canonical
//! column binds to the raw header vocabulary of a given vintage, and how
//! split tracts collapse. Adding a statistic means adding an entry, nothing
//! else.

use once_cell::sync::Lazy;

use super::types::{
    AggregateRule, ColumnSpec, HeaderRow, Resolution, ResolutionEntry, StatisticSpec, YearRange,
};

/// Vintage range the catalog patterns are known to cover.
pub const CATALOG_YEARS: YearRange = YearRange::new(2010, 2023);

/// Statistics built when the caller names none. The two bracket-style
/// alternates (`grapi`, `income_brackets`) are opt-in.
const DEFAULT_SET: &[&str] = &[
    "total_pop",
    "occ_status",
    "gross_rent",
    "home_value",
    "house_income",
    "edu_attain",
];

pub static CATALOG: Lazy<Vec<StatisticSpec>> = Lazy::new(build_catalog);

pub fn find_spec(name: &str) -> Option<&'static StatisticSpec> {
    CATALOG.iter().find(|s| s.name == name)
}

pub fn default_specs() -> Vec<&'static StatisticSpec> {
    DEFAULT_SET
        .iter()
        .map(|name| find_spec(name).expect("default set names a catalog entry"))
        .collect()
}

pub fn spec_names() -> Vec<&'static str> {
    CATALOG.iter().map(|s| s.name.as_str()).collect()
}

fn suffix(candidates: &[&str]) -> ResolutionEntry {
    ResolutionEntry {
        years: CATALOG_YEARS,
        how: Resolution::Suffix(candidates.iter().map(|s| s.to_string()).collect()),
    }
}

fn exact(years: YearRange, name: &str) -> ResolutionEntry {
    ResolutionEntry {
        years,
        how: Resolution::Exact(name.to_string()),
    }
}

fn share(years: YearRange, numerator: &str, denominator: &str) -> ResolutionEntry {
    ResolutionEntry {
        years,
        how: Resolution::Share {
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        },
    }
}

fn column(name: &str, entries: Vec<ResolutionEntry>) -> ColumnSpec {
    ColumnSpec {
        name: name.to_string(),
        entries,
    }
}

fn build_catalog() -> Vec<StatisticSpec> {
    vec![
        // B01003 total population. A count, so split tracts sum. The 2010
        // download orders the estimate and margin-of-error columns
        // differently from later vintages; binding by name rather than by
        // position absorbs that.
        StatisticSpec {
            name: "total_pop".to_string(),
            table: "B01003".to_string(),
            file_pattern: "ACSDT5Y{year}.B01003-Data.csv".to_string(),
            header_row: HeaderRow::Second,
            columns: vec![column("Estimate!!Total", vec![suffix(&[r"Estimate!!Total:?$"])])],
            rule: AggregateRule::Sum,
            interpolate: false,
        },
        // B25002 occupancy status: three unit counts. The optional colon
        // covers the "Total:" relabel in later vintages, and end anchoring
        // keeps the Total pattern off the Occupied and Vacant headers.
        StatisticSpec {
            name: "occ_status".to_string(),
            table: "B25002".to_string(),
            file_pattern: "ACSDT5Y{year}.B25002-Data.csv".to_string(),
            header_row: HeaderRow::Second,
            columns: vec![
                column("Total Housing Units", vec![suffix(&[r"Estimate!!Total:?$"])]),
                column("Occupied Units", vec![suffix(&[r"Estimate!!Total:?!!Occupied$"])]),
                column("Vacant Units", vec![suffix(&[r"Estimate!!Total:?!!Vacant$"])]),
            ],
            rule: AggregateRule::Sum,
            interpolate: false,
        },
        // B25064 median gross rent. Top-coded cells ("3,500+") lose the
        // ceiling marker during coercion.
        StatisticSpec {
            name: "gross_rent".to_string(),
            table: "B25064".to_string(),
            file_pattern: "ACSDT5Y{year}.B25064-Data.csv".to_string(),
            header_row: HeaderRow::Second,
            columns: vec![column(
                "Median_Gross_Rent",
                vec![suffix(&[r"Estimate!!Median gross rent$"])],
            )],
            rule: AggregateRule::Mean,
            interpolate: false,
        },
        // S2506 median value of owner-occupied units with a mortgage, bound
        // by variable code off the first row.
        StatisticSpec {
            name: "home_value".to_string(),
            table: "S2506".to_string(),
            file_pattern: "ACSST5Y{year}.S2506-Data.csv".to_string(),
            header_row: HeaderRow::First,
            columns: vec![column(
                "Median_Home_Value",
                vec![exact(CATALOG_YEARS, "S2506_C01_009E")],
            )],
            rule: AggregateRule::Mean,
            interpolate: false,
        },
        // S1901 median household income. Vintages flip the order of the
        // "Households" and "Estimate" prefix segments, so both spellings are
        // candidates.
        StatisticSpec {
            name: "house_income".to_string(),
            table: "S1901".to_string(),
            file_pattern: "ACSST5Y{year}.S1901-Data.csv".to_string(),
            header_row: HeaderRow::Second,
            columns: vec![column(
                "Median_Household_Income",
                vec![suffix(&[
                    r"^Estimate!!Households!!Median income \(dollars\)$",
                    r"^Households!!Estimate!!Median income \(dollars\)$",
                ])],
            )],
            rule: AggregateRule::Mean,
            interpolate: false,
        },
        // S1501 educational attainment: population 25 and over holding a
        // bachelor's degree or higher. Through 2017 the published variable
        // is a raw count; from 2018 it is a percentage, so the count is
        // recovered as a share of the 25-and-over population. Years the
        // variable cannot produce are interpolated during assembly.
        StatisticSpec {
            name: "edu_attain".to_string(),
            table: "S1501".to_string(),
            file_pattern: "ACSST5Y{year}.S1501-Data.csv".to_string(),
            header_row: HeaderRow::First,
            columns: vec![column(
                "25_Plus_Bachelors_Degree_Or_Higher_Count",
                vec![
                    exact(YearRange::new(2010, 2017), "S1501_C01_015E"),
                    share(YearRange::new(2018, 2023), "S1501_C01_015E", "S1501_C01_006E"),
                ],
            )],
            rule: AggregateRule::Mean,
            interpolate: true,
        },
        // B25070 gross rent as a percentage of household income: renter
        // counts per burden bucket, the distributional alternative to the
        // median rent series. Newer vintages insert an "Occupied units
        // paying rent" qualifier segment ahead of the bucket name; end
        // anchoring absorbs it.
        StatisticSpec {
            name: "grapi".to_string(),
            table: "B25070".to_string(),
            file_pattern: "{year}.csv".to_string(),
            header_row: HeaderRow::First,
            columns: vec![
                column("GRAPI_20.0_to_24.9_percent", vec![suffix(&[r"20\.0 to 24\.9 percent$"])]),
                column("GRAPI_25.0_to_29.9_percent", vec![suffix(&[r"25\.0 to 29\.9 percent$"])]),
                column("GRAPI_30.0_to_34.9_percent", vec![suffix(&[r"30\.0 to 34\.9 percent$"])]),
                column("GRAPI_35.0_percent_or_more", vec![suffix(&[r"35\.0 percent or more$"])]),
                column("GRAPI_Not_computed", vec![suffix(&[r"Not computed$"])]),
            ],
            rule: AggregateRule::Sum,
            interpolate: false,
        },
        // S1901 household income brackets as percentages, the
        // distributional alternative to the median income series.
        // Percentages recombine across a split through the household total;
        // a year missing that column degrades to a simple mean.
        StatisticSpec {
            name: "income_brackets".to_string(),
            table: "S1901".to_string(),
            file_pattern: "{year}.csv".to_string(),
            header_row: HeaderRow::First,
            columns: vec![
                column("Income_Less_than_10K_Percent", vec![suffix(&[r"Less than \$10,000$"])]),
                column("Income_10K_to_14999_Percent", vec![suffix(&[r"\$10,000 to \$14,999$"])]),
                column("Income_15K_to_24999_Percent", vec![suffix(&[r"\$15,000 to \$24,999$"])]),
                column("Income_25K_to_34999_Percent", vec![suffix(&[r"\$25,000 to \$34,999$"])]),
                column("Income_35K_to_49999_Percent", vec![suffix(&[r"\$35,000 to \$49,999$"])]),
                column("Income_50K_to_74999_Percent", vec![suffix(&[r"\$50,000 to \$74,999$"])]),
                column("Income_75K_to_99999_Percent", vec![suffix(&[r"\$75,000 to \$99,999$"])]),
                column(
                    "Income_100K_to_149999_Percent",
                    vec![suffix(&[r"\$100,000 to \$149,999$"])],
                ),
                column(
                    "Income_150K_to_199999_Percent",
                    vec![suffix(&[r"\$150,000 to \$199,999$"])],
                ),
                column("Income_200K_or_more_Percent", vec![suffix(&[r"\$200,000 or more$"])]),
            ],
            rule: AggregateRule::WeightedMean {
                weight: column(
                    "Total_Households",
                    vec![suffix(&[
                        r"^Households!!Estimate!!Total$",
                        r"^Estimate!!Households!!Total:?$",
                    ])],
                ),
            },
            interpolate: false,
        },
    ]
}
