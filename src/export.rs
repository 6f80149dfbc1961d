//! Thin persistence helpers for the report artifacts.

use crate::climdex::ClimdexReport;
use crate::error::ClimdexError;
use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use std::fs::File;
use std::path::{Path, PathBuf};

const SERIES_FILE: &str = "series.csv";
const CLIMATOLOGY_FILE: &str = "climatology.csv";
const PERCENTAGE_FILE: &str = "percentage_indices.csv";
const SEASONAL_FILE: &str = "seasonal_summary.csv";
const ANNUAL_FILE: &str = "annual_indices.csv";
const EVENTS_FILE: &str = "wave_events.csv";

fn write_csv(df: &DataFrame, path: PathBuf) -> Result<(), ClimdexError> {
    let mut file = File::create(&path).map_err(|e| ClimdexError::OutputIo(path.clone(), e))?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

impl ClimdexReport {
    /// Writes the six artifacts as CSV files into `dir` (created if
    /// needed): `series.csv`, `climatology.csv`, `percentage_indices.csv`,
    /// `seasonal_summary.csv`, `annual_indices.csv` and `wave_events.csv`.
    pub fn write_csv(&self, dir: &Path) -> Result<(), ClimdexError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| ClimdexError::OutputDirCreation(dir.to_path_buf(), e))?;
        write_csv(&self.series, dir.join(SERIES_FILE))?;
        write_csv(&self.climatology, dir.join(CLIMATOLOGY_FILE))?;
        write_csv(&self.percentage_indices, dir.join(PERCENTAGE_FILE))?;
        write_csv(&self.seasonal_summary, dir.join(SEASONAL_FILE))?;
        write_csv(&self.annual_indices, dir.join(ANNUAL_FILE))?;
        write_csv(&self.events_frame()?, dir.join(EVENTS_FILE))?;
        Ok(())
    }

    /// Writes the tidy series (the largest artifact) as a Parquet file.
    pub fn write_series_parquet(&self, path: &Path) -> Result<(), ClimdexError> {
        let file =
            File::create(path).map_err(|e| ClimdexError::OutputIo(path.to_path_buf(), e))?;
        let mut df = self.series.clone();
        ParquetWriter::new(file).finish(&mut df)?;
        Ok(())
    }
}
