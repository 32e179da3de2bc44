// src/discover.rs
//! Locates source extracts on disk. The directory layout is flat: one CSV
//! per statistic per year, named by the statistic's `file_pattern` with the
//! vintage year substituted in.

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::debug;

use crate::spec::StatisticSpec;

/// Root directory holding the downloaded extracts.
#[derive(Debug, Clone)]
pub struct SourceDir {
    root: PathBuf,
}

impl SourceDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `spec`'s extract for `year`, if the file exists.
    pub fn locate(&self, spec: &StatisticSpec, year: u16) -> Option<PathBuf> {
        let path = self.root.join(spec.source_file(year));
        if path.is_file() {
            Some(path)
        } else {
            debug!(statistic = %spec.name, year, path = %path.display(), "no extract");
            None
        }
    }

    /// Years for which `spec`'s extract exists, ascending. Matches the
    /// statistic's file pattern against the directory and reads the year
    /// back out of each hit.
    pub fn available_years(&self, spec: &StatisticSpec) -> Vec<u16> {
        let pattern = self
            .root
            .join(spec.file_pattern.replace("{year}", "[0-9][0-9][0-9][0-9]"));
        let Some(pattern) = pattern.to_str() else {
            return Vec::new();
        };

        let mut years: Vec<u16> = glob(pattern)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter_map(|path| year_from_name(spec, &path))
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

/// Recover the vintage year from a filename the pattern produced.
fn year_from_name(spec: &StatisticSpec, path: &Path) -> Option<u16> {
    let name = path.file_name()?.to_str()?;
    let (prefix, suffix) = spec.file_pattern.split_once("{year}")?;
    name.strip_prefix(prefix)?
        .strip_suffix(suffix)?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::catalog;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn locate_finds_only_existing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ACSDT5Y2016.B01003-Data.csv"), "x").unwrap();

        let spec = catalog::find_spec("total_pop").unwrap();
        let src = SourceDir::new(dir.path());
        assert!(src.locate(spec, 2016).is_some());
        assert!(src.locate(spec, 2017).is_none());
    }

    #[test]
    fn available_years_reads_years_out_of_filenames() {
        let dir = tempdir().unwrap();
        for year in [2012, 2010, 2015] {
            fs::write(
                dir.path().join(format!("ACSDT5Y{year}.B01003-Data.csv")),
                "x",
            )
            .unwrap();
        }
        // A different table's file in the same directory is not a hit.
        fs::write(dir.path().join("ACSDT5Y2011.B25002-Data.csv"), "x").unwrap();

        let spec = catalog::find_spec("total_pop").unwrap();
        let src = SourceDir::new(dir.path());
        assert_eq!(src.available_years(spec), vec![2010, 2012, 2015]);
    }

    #[test]
    fn empty_directory_has_no_years() {
        let dir = tempdir().unwrap();
        let spec = catalog::find_spec("total_pop").unwrap();
        assert!(SourceDir::new(dir.path()).available_years(spec).is_empty());
    }
}
