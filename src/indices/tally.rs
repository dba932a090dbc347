//! Per-taxon report tally
//!
//! Walks the canonical matrix once and records, for each taxon, the number of
//! report rows and the distinct informants citing it. UR and FC both read
//! from this so the two counts always come from the same pass.

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use crate::matrix::CanonicalMatrix;

#[derive(Debug, Default)]
pub(crate) struct TaxonTally<'a> {
    /// Report rows (UR)
    pub reports: usize,
    /// Distinct informants (FC)
    pub informants: FxHashSet<&'a str>,
}

/// Taxon → tally, keyed in taxon order
pub(crate) fn tally_by_taxon(matrix: &CanonicalMatrix) -> BTreeMap<&str, TaxonTally<'_>> {
    let mut tallies: BTreeMap<&str, TaxonTally<'_>> = BTreeMap::new();

    for report in matrix.reports() {
        let tally = tallies.entry(report.taxon.as_str()).or_default();
        tally.reports += 1;
        tally.informants.insert(report.informant.as_str());
    }

    tallies
}
