use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use tractweave::discover::SourceDir;
use tractweave::process::{assemble, build_series, SeriesOutcome};
use tractweave::report::{write_report, RunReport, StatisticReport};
use tractweave::spec::{catalog, StatisticSpec, YearRange, CATALOG_YEARS};
use tractweave::table::{write_combined, write_normalized};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Normalize yearly ACS tract extracts into one combined dataset"
)]
struct Args {
    /// Directory holding the downloaded extracts.
    #[arg(long, default_value = "./data/raw")]
    input: String,
    /// Directory the per-statistic tables, combined dataset, and run
    /// report are written to.
    #[arg(long, default_value = "./data/processed")]
    output: String,
    /// Statistics to build, comma separated. Defaults to the standard set.
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,
    /// Vintage range as START-END, e.g. 2010-2023.
    #[arg(long)]
    years: Option<String>,
    /// Combined dataset filename within the output directory.
    #[arg(long, default_value = "data.csv")]
    combined: String,
    /// Run report filename within the output directory.
    #[arg(long, default_value = "run_report.json")]
    report: String,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    let args = Args::parse();
    let started = Utc::now();

    // ─── 2) resolve statistics and years ─────────────────────────────
    let specs = select_specs(&args.stats)?;
    let years = match &args.years {
        Some(text) => parse_year_range(text)?,
        None => CATALOG_YEARS,
    };
    info!(
        "building {} statistics over {}: {}",
        specs.len(),
        years,
        specs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    );

    let src = SourceDir::new(&args.input);
    let out_dir = PathBuf::from(&args.output);
    fs::create_dir_all(&out_dir)?;

    // ─── 3) build each statistic ─────────────────────────────────────
    // Statistics share nothing, so they build in parallel. A failed build
    // lands in the report and drops out of assembly; it does not stop the
    // others.
    let outcomes: Vec<(String, Result<SeriesOutcome>)> = specs
        .par_iter()
        .map(|&spec| (spec.name.clone(), build_series(spec, years, &src)))
        .collect();

    let mut tables = Vec::new();
    let mut reports = Vec::new();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(SeriesOutcome { table, report }) => {
                let path = out_dir.join(format!("{name}.csv"));
                write_normalized(&table, &path)?;
                info!("wrote {} ({} rows)", path.display(), table.rows.len());
                tables.push(table);
                reports.push(report);
            }
            Err(err) => {
                error!("{name} failed: {err:#}");
                reports.push(StatisticReport::failed(&name, &err));
            }
        }
    }
    if tables.is_empty() {
        bail!("every statistic failed; nothing to assemble");
    }

    // ─── 4) assemble the combined dataset ────────────────────────────
    let combined = assemble(&tables);
    let combined_path = out_dir.join(&args.combined);
    write_combined(&combined, &combined_path)?;
    info!(
        "wrote {} ({} rows, {} statistic columns)",
        combined_path.display(),
        combined.rows.len(),
        combined.columns.len()
    );

    // ─── 5) write the run report ─────────────────────────────────────
    let report = RunReport {
        started,
        finished: Utc::now(),
        statistics: reports,
    };
    let report_path = out_dir.join(&args.report);
    write_report(&report, &report_path)?;
    info!("wrote {}", report_path.display());

    info!("all done");
    Ok(())
}

fn select_specs(names: &[String]) -> Result<Vec<&'static StatisticSpec>> {
    if names.is_empty() {
        return Ok(catalog::default_specs());
    }
    names
        .iter()
        .map(|name| {
            catalog::find_spec(name).with_context(|| {
                format!(
                    "unknown statistic {:?}; known: {}",
                    name,
                    catalog::spec_names().join(", ")
                )
            })
        })
        .collect()
}

fn parse_year_range(text: &str) -> Result<YearRange> {
    let Some((start, end)) = text.split_once('-') else {
        bail!("year range must be START-END, got {text:?}");
    };
    let start: u16 = start.trim().parse().context("bad start year")?;
    let end: u16 = end.trim().parse().context("bad end year")?;
    if start > end {
        bail!("year range runs backwards: {text:?}");
    }
    Ok(YearRange::new(start, end))
}
