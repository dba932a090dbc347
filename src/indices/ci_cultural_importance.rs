//! CULTURAL IMPORTANCE (CI)
//!
//! CI = UR(taxon) / I, where I is the number of distinct informants in the
//! whole survey.

use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use crate::utils::share;
use super::ur_use_report::calculate_ur;
use super::{sort_scores, TaxonCount, TaxonScore};

/// Calculate CI for every taxon, sorted descending (ties by taxon)
pub fn calculate_ci(matrix: &CanonicalMatrix) -> Result<Vec<TaxonScore>> {
    let ur = calculate_ur(matrix)?;
    Ok(ci_from_ur(&ur, matrix.informant_count()))
}

/// Derive CI from an already computed UR column
pub fn ci_from_ur(ur: &[TaxonCount], informants: usize) -> Vec<TaxonScore> {
    let mut rows: Vec<TaxonScore> = ur
        .iter()
        .map(|row| TaxonScore::new(&row.taxon, share(row.value, informants)))
        .collect();

    sort_scores(&mut rows);
    rows
}
