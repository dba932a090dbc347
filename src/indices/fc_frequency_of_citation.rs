//! FREQUENCY OF CITATION (FC)
//!
//! Distinct informants citing each taxon for at least one use.

use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use super::tally::tally_by_taxon;
use super::{sort_counts, TaxonCount};

/// Calculate FC for every taxon, sorted descending (ties by taxon)
pub fn calculate_fc(matrix: &CanonicalMatrix) -> Result<Vec<TaxonCount>> {
    matrix.ensure_not_empty()?;

    let mut rows: Vec<TaxonCount> = tally_by_taxon(matrix)
        .into_iter()
        .map(|(taxon, tally)| TaxonCount::new(taxon, tally.informants.len()))
        .collect();

    sort_counts(&mut rows);
    Ok(rows)
}
