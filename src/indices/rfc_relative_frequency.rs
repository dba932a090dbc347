//! RELATIVE FREQUENCY OF CITATION (RFC)
//!
//! RFC = FC(taxon) / I. Always within [0, 1] because FC never exceeds the
//! informant count.

use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use crate::utils::share;
use super::fc_frequency_of_citation::calculate_fc;
use super::{sort_scores, TaxonCount, TaxonScore};

/// Calculate RFC for every taxon, sorted descending (ties by taxon)
pub fn calculate_rfc(matrix: &CanonicalMatrix) -> Result<Vec<TaxonScore>> {
    let fc = calculate_fc(matrix)?;
    Ok(rfc_from_fc(&fc, matrix.informant_count()))
}

/// Derive RFC from an already computed FC column
pub fn rfc_from_fc(fc: &[TaxonCount], informants: usize) -> Vec<TaxonScore> {
    let mut rows: Vec<TaxonScore> = fc
        .iter()
        .map(|row| TaxonScore::new(&row.taxon, share(row.value, informants)))
        .collect();

    sort_scores(&mut rows);
    rows
}
