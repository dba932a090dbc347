//! All-taxon summary
//!
//! One row per taxon carrying every per-taxon index (CI, FC, NU, UR, RFC, RI,
//! UV, CV). UR, FC and NU are computed once and the rest are derived from
//! those columns, so each value matches its standalone calculation exactly.

use rustc_hash::FxHashMap;
use serde::Serialize;
use crate::error::{EthnoError, Result};
use crate::matrix::CanonicalMatrix;
use super::ci_cultural_importance::ci_from_ur;
use super::cv_cultural_value::{cv_from_components, CvDenominators};
use super::fc_frequency_of_citation::calculate_fc;
use super::kind::IndexKind;
use super::nu_number_of_uses::calculate_nu;
use super::ri_relative_importance::ri_from_components;
use super::rfc_relative_frequency::rfc_from_fc;
use super::ur_use_report::calculate_ur;
use super::TaxonScore;

/// Every per-taxon index for one taxon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonSummary {
    pub taxon: String,
    pub ci: f64,
    pub fc: usize,
    pub nu: usize,
    pub ur: usize,
    pub rfc: f64,
    pub ri: f64,
    pub uv: f64,
    pub cv: f64,
}

impl TaxonSummary {
    /// Value of one per-taxon index as f64
    pub fn get(&self, kind: IndexKind) -> Option<f64> {
        match kind {
            IndexKind::CulturalImportance => Some(self.ci),
            IndexKind::FrequencyOfCitation => Some(self.fc as f64),
            IndexKind::NumberOfUses => Some(self.nu as f64),
            IndexKind::UseReport => Some(self.ur as f64),
            IndexKind::RelativeFrequencyOfCitation => Some(self.rfc),
            IndexKind::RelativeImportance => Some(self.ri),
            IndexKind::UseValue => Some(self.uv),
            IndexKind::CulturalValue => Some(self.cv),
            _ => None,
        }
    }
}

/// Calculate the summary table, ordered by taxon
pub fn calculate_summary(matrix: &CanonicalMatrix) -> Result<Vec<TaxonSummary>> {
    let ur = calculate_ur(matrix)?;
    let fc = calculate_fc(matrix)?;
    let nu = calculate_nu(matrix)?;
    let informants = matrix.informant_count();

    let ci = ci_from_ur(&ur, informants);
    let rfc = rfc_from_fc(&fc, informants);
    let ri = ri_from_components(&rfc, &nu);
    let cv = cv_from_components(&ur, &fc, &nu, CvDenominators::of(matrix));

    let ci_map = score_map(&ci);
    let rfc_map = score_map(&rfc);
    let ri_map = score_map(&ri);
    let cv_map = score_map(&cv);
    let fc_map: FxHashMap<&str, usize> = fc.iter().map(|r| (r.taxon.as_str(), r.value)).collect();
    let nu_map: FxHashMap<&str, usize> = nu.iter().map(|r| (r.taxon.as_str(), r.value)).collect();

    let mut rows: Vec<TaxonSummary> = ur
        .iter()
        .map(|row| {
            let taxon = row.taxon.as_str();
            let ci_value = ci_map.get(taxon).copied().unwrap_or(0.0);
            TaxonSummary {
                taxon: taxon.to_string(),
                ci: ci_value,
                fc: fc_map.get(taxon).copied().unwrap_or(0),
                nu: nu_map.get(taxon).copied().unwrap_or(0),
                ur: row.value,
                rfc: rfc_map.get(taxon).copied().unwrap_or(0.0),
                ri: ri_map.get(taxon).copied().unwrap_or(0.0),
                uv: ci_value,
                cv: cv_map.get(taxon).copied().unwrap_or(0.0),
            }
        })
        .collect();

    rows.sort_by(|a, b| a.taxon.cmp(&b.taxon));
    Ok(rows)
}

fn score_map(rows: &[TaxonScore]) -> FxHashMap<&str, f64> {
    rows.iter().map(|r| (r.taxon.as_str(), r.value)).collect()
}

/// Reorder summary rows by one per-taxon index (ties by taxon ascending)
///
/// # Errors
/// `SchemaError` when `kind` is not a per-taxon index.
pub fn sort_summary(rows: &mut [TaxonSummary], kind: IndexKind, ascending: bool) -> Result<()> {
    if !kind.is_per_taxon() {
        return Err(EthnoError::Schema(format!(
            "{} is not a per-taxon index and cannot order the summary",
            kind
        )));
    }

    rows.sort_by(|a, b| {
        let (va, vb) = (a.get(kind).unwrap_or(0.0), b.get(kind).unwrap_or(0.0));
        let by_value = if ascending { va.total_cmp(&vb) } else { vb.total_cmp(&va) };
        by_value.then_with(|| a.taxon.cmp(&b.taxon))
    });

    Ok(())
}
