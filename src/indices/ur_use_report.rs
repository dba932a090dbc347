//! USE REPORT (UR)
//!
//! Number of use-report rows per taxon. Duplicate long-form rows each count.

use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use super::tally::tally_by_taxon;
use super::{sort_counts, TaxonCount};

/// Calculate UR for every taxon, sorted descending (ties by taxon)
pub fn calculate_ur(matrix: &CanonicalMatrix) -> Result<Vec<TaxonCount>> {
    matrix.ensure_not_empty()?;

    let mut rows: Vec<TaxonCount> = tally_by_taxon(matrix)
        .into_iter()
        .map(|(taxon, tally)| TaxonCount::new(taxon, tally.reports))
        .collect();

    sort_counts(&mut rows);
    Ok(rows)
}
