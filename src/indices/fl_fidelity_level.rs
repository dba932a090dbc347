//! FIDELITY LEVEL (FL)
//!
//! For each (taxon, use) pair: FL = Ns × 100 / FC(taxon), where Ns is the
//! number of distinct informants citing that use for that taxon.
//!
//! Only reported (taxon, use) pairs get a row, so Ns ≥ 1 and FC ≥ 1 for
//! every row and FL lies in (0, 100].

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use crate::utils::share;
use super::fc_frequency_of_citation::calculate_fc;

/// One (taxon, use) fidelity value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FidelityRow {
    pub taxon: String,
    pub use_category: String,
    /// Informants citing this use for this taxon (Ns)
    pub informants: usize,
    /// Informants citing the taxon at all (FC)
    pub frequency_of_citation: usize,
    /// Percentage in (0, 100]
    pub value: f64,
}

/// Calculate FL for every reported (taxon, use) pair
///
/// Sorted by FL descending, then taxon and use category ascending.
pub fn calculate_fl(matrix: &CanonicalMatrix) -> Result<Vec<FidelityRow>> {
    let fc = calculate_fc(matrix)?;
    let fc_by_taxon: FxHashMap<&str, usize> = fc.iter().map(|r| (r.taxon.as_str(), r.value)).collect();

    let mut ns: FxHashMap<(&str, &str), FxHashSet<&str>> = FxHashMap::default();
    for report in matrix.reports() {
        ns.entry((report.taxon.as_str(), report.use_category.as_str()))
            .or_default()
            .insert(report.informant.as_str());
    }

    let mut rows: Vec<FidelityRow> = ns
        .into_iter()
        .map(|((taxon, use_category), informants)| {
            let fc = fc_by_taxon.get(taxon).copied().unwrap_or(0);
            FidelityRow {
                taxon: taxon.to_string(),
                use_category: use_category.to_string(),
                informants: informants.len(),
                frequency_of_citation: fc,
                value: share(informants.len() * 100, fc),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.taxon.cmp(&b.taxon))
            .then_with(|| a.use_category.cmp(&b.use_category))
    });

    Ok(rows)
}
