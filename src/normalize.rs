//! Data Normalizer
//!
//! Converts either accepted source shape into the canonical use-report matrix:
//! - Binary-wide: one row per (informant, taxon), one 0/1 column per use
//!   category. Cells with 1 become reports; repeated triples collapse to one.
//! - Long form: one use label per row. Labels pass through verbatim and
//!   duplicate rows are kept as distinct use reports.
//!
//! The shape is resolved once here so every index formula works on a single
//! representation.

use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::debug;
use crate::config::ColumnBindings;
use crate::error::{EthnoError, Result};
use crate::matrix::{CanonicalMatrix, LiteratureLink, UseReport};
use crate::utils::{binary_values, materialize_with_columns, parse_literature, require_columns, string_values};

/// Accepted source table shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    BinaryWide,
    LongForm,
}

impl InputShape {
    pub fn from_bindings(bindings: &ColumnBindings) -> Self {
        if bindings.convert_use_data {
            InputShape::BinaryWide
        } else {
            InputShape::LongForm
        }
    }
}

/// Normalize a source table into the canonical matrix
///
/// # Errors
/// `SchemaError` when a bound column is missing, when long-form input has no
/// use column binding, or when a binary use column is non-numeric or holds
/// values outside {0, 1}.
pub fn normalize(df: &DataFrame, bindings: &ColumnBindings) -> Result<CanonicalMatrix> {
    let matrix = match InputShape::from_bindings(bindings) {
        InputShape::LongForm => normalize_long_form(df, bindings)?,
        InputShape::BinaryWide => normalize_binary_wide(df, bindings)?,
    };

    debug!(
        "Normalized {} source rows into {} use reports ({} literature links)",
        df.height(),
        matrix.len(),
        matrix.literature_links().map_or(0, |links| links.len())
    );

    Ok(matrix)
}

/// Long form: (informant, taxon, use[, literature]) per row
fn normalize_long_form(df: &DataFrame, bindings: &ColumnBindings) -> Result<CanonicalMatrix> {
    let use_column = bindings.use_column.as_deref().ok_or_else(|| {
        EthnoError::Schema("long-form input requires a use column binding".to_string())
    })?;

    let mut required = vec![
        bindings.informant_column.as_str(),
        bindings.taxon_column.as_str(),
        use_column,
    ];
    if let Some(lit) = bindings.literature_column.as_deref() {
        required.push(lit);
    }

    let source = materialize_with_columns(df, &required, "long-form input")?;

    let informants = string_values(&source, &bindings.informant_column)?;
    let taxa = string_values(&source, &bindings.taxon_column)?;
    let uses = string_values(&source, use_column)?;
    let literature = match bindings.literature_column.as_deref() {
        Some(lit) => Some(string_values(&source, lit)?),
        None => None,
    };

    let mut reports = Vec::with_capacity(source.height());
    let mut links = Vec::new();
    let mut skipped = 0usize;

    for idx in 0..source.height() {
        let (Some(informant), Some(taxon), Some(use_category)) =
            (&informants[idx], &taxa[idx], &uses[idx])
        else {
            skipped += 1;
            continue;
        };

        let report = reports.len();
        reports.push(UseReport::new(informant, taxon, use_category));

        if let Some(cells) = &literature {
            for study in parse_literature(cells[idx].as_deref()) {
                links.push(LiteratureLink { report, study });
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} long-form rows with a missing informant, taxon or use", skipped);
    }

    CanonicalMatrix::new(reports, literature.map(|_| links))
}

/// Binary-wide: melt every non-key column into (use, presence) cells
fn normalize_binary_wide(df: &DataFrame, bindings: &ColumnBindings) -> Result<CanonicalMatrix> {
    let mut keys = vec![bindings.informant_column.as_str(), bindings.taxon_column.as_str()];
    if let Some(lit) = bindings.literature_column.as_deref() {
        keys.push(lit);
    }
    require_columns(df, &keys, "binary-wide input")?;

    let use_columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .filter(|name| !keys.contains(&name.as_str()))
        .collect();

    if use_columns.is_empty() {
        return Err(EthnoError::Schema(
            "binary-wide input has no use category columns".to_string(),
        ));
    }

    let informants = string_values(df, &bindings.informant_column)?;
    let taxa = string_values(df, &bindings.taxon_column)?;
    let literature = match bindings.literature_column.as_deref() {
        Some(lit) => Some(string_values(df, lit)?),
        None => None,
    };

    let flags: Vec<Vec<bool>> = use_columns
        .iter()
        .map(|name| binary_values(df, name))
        .collect::<Result<_>>()?;

    // Rows ordered by (informant, taxon); stable so ties keep source order
    let mut row_order: Vec<usize> = (0..df.height())
        .filter(|&idx| informants[idx].is_some() && taxa[idx].is_some())
        .collect();

    let skipped = df.height() - row_order.len();
    if skipped > 0 {
        debug!("Skipped {} binary-wide rows with a missing informant or taxon", skipped);
    }
    row_order.sort_by(|&a, &b| (&informants[a], &taxa[a]).cmp(&(&informants[b], &taxa[b])));

    let mut reports: Vec<UseReport> = Vec::new();
    let mut report_index: FxHashMap<UseReport, usize> = FxHashMap::default();
    let mut studies: Vec<BTreeSet<String>> = Vec::new();

    for idx in row_order {
        let (Some(informant), Some(taxon)) = (&informants[idx], &taxa[idx]) else {
            continue;
        };
        let row_studies = literature
            .as_ref()
            .map(|cells| parse_literature(cells[idx].as_deref()))
            .unwrap_or_default();

        for (use_idx, use_category) in use_columns.iter().enumerate() {
            if !flags[use_idx][idx] {
                continue;
            }

            let report = UseReport::new(informant, taxon, use_category);
            let slot = match report_index.get(&report) {
                Some(&existing) => existing,
                None => {
                    let slot = reports.len();
                    report_index.insert(report.clone(), slot);
                    reports.push(report);
                    studies.push(BTreeSet::new());
                    slot
                }
            };
            studies[slot].extend(row_studies.iter().cloned());
        }
    }

    let links: Option<Vec<LiteratureLink>> = literature.map(|_| {
        studies
            .into_iter()
            .enumerate()
            .flat_map(|(report, set)| set.into_iter().map(move |study| LiteratureLink { report, study }))
            .collect()
    });

    CanonicalMatrix::new(reports, links)
}
