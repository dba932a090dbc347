//! NUMBER OF USES (NU)
//!
//! Distinct use categories per taxon, read from the taxon × use incidence
//! table so repeated reports of the same use never inflate the count.

use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use super::{sort_counts, TaxonCount};

/// Calculate NU for every taxon, sorted descending (ties by taxon)
pub fn calculate_nu(matrix: &CanonicalMatrix) -> Result<Vec<TaxonCount>> {
    matrix.ensure_not_empty()?;

    let incidence = matrix.incidence();
    let mut rows: Vec<TaxonCount> = incidence
        .uses_per_taxon()
        .into_iter()
        .map(|(taxon, uses)| TaxonCount::new(taxon, uses))
        .collect();

    sort_counts(&mut rows);
    Ok(rows)
}
