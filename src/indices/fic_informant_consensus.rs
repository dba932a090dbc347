//! INFORMANT CONSENSUS FACTOR (FIC)
//!
//! Per use category: FIC = (Nur − Nt) / (Nur − 1)
//!   Nur = use-report rows for the category
//!   Nt  = distinct taxa reported for the category
//!
//! Undefined when Nur = 1. A single category request fails outright; the
//! full table follows the configured `UndefinedValuePolicy`.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;
use crate::config::UndefinedValuePolicy;
use crate::error::{EthnoError, Result};
use crate::matrix::CanonicalMatrix;

/// One use category's consensus value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusRow {
    pub use_category: String,
    /// Use reports for the category (Nur)
    pub use_reports: usize,
    /// Distinct taxa for the category (Nt)
    pub taxa: usize,
    /// FIC in [0, 1]
    pub value: f64,
}

#[derive(Default)]
struct CategoryTally<'a> {
    reports: usize,
    taxa: FxHashSet<&'a str>,
}

fn tally_by_use(matrix: &CanonicalMatrix) -> BTreeMap<&str, CategoryTally<'_>> {
    let mut tallies: BTreeMap<&str, CategoryTally<'_>> = BTreeMap::new();
    for report in matrix.reports() {
        let tally = tallies.entry(report.use_category.as_str()).or_default();
        tally.reports += 1;
        tally.taxa.insert(report.taxon.as_str());
    }
    tallies
}

fn consensus(use_category: &str, nur: usize, nt: usize) -> Result<f64> {
    if nur <= 1 {
        return Err(EthnoError::UndefinedIndexValue {
            index: "FIC",
            key: use_category.to_string(),
            reason: format!("Nur = {} (needs at least 2 use reports)", nur),
        });
    }
    Ok((nur - nt) as f64 / (nur - 1) as f64)
}

/// Calculate FIC for every use category
///
/// Sorted by FIC descending, then use category ascending.
///
/// # Errors
/// - `EmptyData` for an empty matrix
/// - `UndefinedIndexValue` for the first category (alphabetically) with
///   Nur = 1 under `UndefinedValuePolicy::Fail`
pub fn calculate_fic(matrix: &CanonicalMatrix, policy: UndefinedValuePolicy) -> Result<Vec<ConsensusRow>> {
    matrix.ensure_not_empty()?;

    let mut rows = Vec::new();
    let mut excluded = Vec::new();

    for (use_category, tally) in tally_by_use(matrix) {
        match consensus(use_category, tally.reports, tally.taxa.len()) {
            Ok(value) => rows.push(ConsensusRow {
                use_category: use_category.to_string(),
                use_reports: tally.reports,
                taxa: tally.taxa.len(),
                value,
            }),
            Err(err) => match policy {
                UndefinedValuePolicy::Fail => return Err(err),
                UndefinedValuePolicy::Exclude => excluded.push(use_category),
            },
        }
    }

    if !excluded.is_empty() {
        warn!(
            "FIC undefined (single use report) for {} categories, excluded: {:?}",
            excluded.len(),
            excluded
        );
    }

    rows.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.use_category.cmp(&b.use_category))
    });

    Ok(rows)
}

/// FIC for one use category
///
/// # Errors
/// `UndefinedIndexValue` when the category has fewer than 2 use reports
/// (including categories never reported).
pub fn fic_for(matrix: &CanonicalMatrix, use_category: &str) -> Result<f64> {
    matrix.ensure_not_empty()?;

    let (nur, taxa) = matrix
        .reports()
        .iter()
        .filter(|r| r.use_category == use_category)
        .fold((0usize, FxHashSet::default()), |(n, mut taxa), r| {
            taxa.insert(r.taxon.as_str());
            (n + 1, taxa)
        });

    consensus(use_category, nur, taxa.len())
}
