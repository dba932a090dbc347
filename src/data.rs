//! Data Loading
//!
//! Reads survey tables from CSV or Parquet into a polars `DataFrame`.
//! The file extension picks the reader; anything other than `.parquet` is
//! read as CSV with a header row.

use polars::prelude::*;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a survey table from disk
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let is_parquet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        load_parquet(path)
    } else {
        load_csv(path)
    }
}

fn load_parquet(path: &Path) -> Result<DataFrame> {
    let path_str = path.to_string_lossy();
    LazyFrame::scan_parquet(path_str.as_ref(), Default::default())
        .with_context(|| format!("Failed to scan parquet: {}", path_str))?
        .collect()
        .with_context(|| format!("Failed to load survey parquet: {}", path_str))
}

fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load survey CSV: {}", path.display()))
}
