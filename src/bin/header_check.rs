//! Print how a statistic's canonical columns bind against one extract's
//! header row. Handy when a new vintage lands and a pattern stops
//! matching.
//!
//! Usage: header_check --file <CSV> --stat <NAME> --year <YEAR>

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use tractweave::resolve::{resolve, Binding};
use tractweave::spec::catalog;
use tractweave::table::read_table;

#[derive(Parser)]
#[command(about = "Show canonical-to-raw header resolution for one extract")]
struct Args {
    /// Extract to inspect.
    #[arg(long)]
    file: PathBuf,
    /// Catalog statistic name, e.g. occ_status.
    #[arg(long)]
    stat: String,
    /// Vintage year the file belongs to.
    #[arg(long)]
    year: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let spec = catalog::find_spec(&args.stat).with_context(|| {
        format!(
            "unknown statistic {:?}; known: {}",
            args.stat,
            catalog::spec_names().join(", ")
        )
    })?;

    let raw = read_table(&args.file, spec.header_row)?;
    println!(
        "{}: {} header columns, {} data rows",
        args.file.display(),
        raw.headers.len(),
        raw.rows.len()
    );
    match raw.label_column() {
        Some(idx) => println!("label column: [{idx}] {:?}", raw.headers[idx]),
        None => println!("label column: NOT FOUND"),
    }

    let resolved = resolve(&raw.headers, spec, args.year);
    for (col, binding) in spec.columns.iter().zip(&resolved.bindings) {
        match binding {
            Binding::Column(idx) => {
                println!("{}: [{idx}] {:?}", col.name, raw.headers[*idx]);
            }
            Binding::Share {
                numerator,
                denominator,
            } => {
                println!(
                    "{}: 100 * [{numerator}] {:?} / [{denominator}] {:?}",
                    col.name, raw.headers[*numerator], raw.headers[*denominator]
                );
            }
            Binding::Missing => println!("{}: MISSING (will zero-fill)", col.name),
        }
    }
    match resolved.weight {
        Some(idx) => println!("weight: [{idx}] {:?}", raw.headers[idx]),
        None => println!("weight: none"),
    }

    Ok(())
}
