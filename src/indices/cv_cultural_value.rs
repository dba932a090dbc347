//! CULTURAL VALUE (CV) for ethnospecies
//!
//! CV = Uce × Ice × IUce
//!   Uce  = NU / U   (uses of the taxon over all use categories reported)
//!   Ice  = FC / I   (the taxon's RFC)
//!   IUce = UR / I   (the taxon's UV)

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use crate::utils::share;
use super::fc_frequency_of_citation::calculate_fc;
use super::nu_number_of_uses::calculate_nu;
use super::ur_use_report::calculate_ur;
use super::{sort_scores, TaxonCount, TaxonScore};

/// Survey-wide denominators for CV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CvDenominators {
    /// Distinct informants (I)
    pub informants: usize,
    /// Distinct use categories (U)
    pub potential_uses: usize,
}

impl CvDenominators {
    pub fn of(matrix: &CanonicalMatrix) -> Self {
        Self {
            informants: matrix.informant_count(),
            potential_uses: matrix.use_category_count(),
        }
    }
}

/// Calculate CV for every taxon, sorted descending (ties by taxon)
pub fn calculate_cv(matrix: &CanonicalMatrix) -> Result<Vec<TaxonScore>> {
    let ur = calculate_ur(matrix)?;
    let fc = calculate_fc(matrix)?;
    let nu = calculate_nu(matrix)?;
    Ok(cv_from_components(&ur, &fc, &nu, CvDenominators::of(matrix)))
}

/// Combine already computed UR, FC and NU columns
pub fn cv_from_components(
    ur: &[TaxonCount],
    fc: &[TaxonCount],
    nu: &[TaxonCount],
    denominators: CvDenominators,
) -> Vec<TaxonScore> {
    let fc_by_taxon: FxHashMap<&str, usize> = fc.iter().map(|r| (r.taxon.as_str(), r.value)).collect();
    let nu_by_taxon: FxHashMap<&str, usize> = nu.iter().map(|r| (r.taxon.as_str(), r.value)).collect();

    let mut rows: Vec<TaxonScore> = ur
        .iter()
        .map(|row| {
            let taxon = row.taxon.as_str();
            let uce = share(nu_by_taxon.get(taxon).copied().unwrap_or(0), denominators.potential_uses);
            let ice = share(fc_by_taxon.get(taxon).copied().unwrap_or(0), denominators.informants);
            let iuce = share(row.value, denominators.informants);
            TaxonScore::new(taxon, uce * ice * iuce)
        })
        .collect();

    sort_scores(&mut rows);
    rows
}
