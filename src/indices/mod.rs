//! Index modules for survey analysis
//!
//! Each index lives in its own module and exposes a `calculate_*` function
//! over the canonical matrix. Composite indices (CI, RFC, RI, CV) also expose
//! a pure `*_from_*` function over already computed columns, which the
//! all-taxon summary reuses.
//!
//! Every per-taxon table is sorted by value descending with ties broken by
//! ascending taxon, so repeated calls return identical tables.

pub mod kind;
mod tally;
pub mod ur_use_report;
pub mod nu_number_of_uses;
pub mod fc_frequency_of_citation;
pub mod ci_cultural_importance;
pub mod rfc_relative_frequency;
pub mod uv_use_value;
pub mod ri_relative_importance;
pub mod cv_cultural_value;
pub mod fl_fidelity_level;
pub mod fic_informant_consensus;
pub mod summary;

pub use kind::{IndexKind, Renderer};
pub use ur_use_report::calculate_ur;
pub use nu_number_of_uses::calculate_nu;
pub use fc_frequency_of_citation::calculate_fc;
pub use ci_cultural_importance::{calculate_ci, ci_from_ur};
pub use rfc_relative_frequency::{calculate_rfc, rfc_from_fc};
pub use uv_use_value::calculate_uv;
pub use ri_relative_importance::{calculate_ri, ri_from_components};
pub use cv_cultural_value::{calculate_cv, cv_from_components, CvDenominators};
pub use fl_fidelity_level::{calculate_fl, FidelityRow};
pub use fic_informant_consensus::{calculate_fic, fic_for, ConsensusRow};
pub use summary::{calculate_summary, sort_summary, TaxonSummary};

use serde::Serialize;
use crate::config::UndefinedValuePolicy;
use crate::error::Result;
use crate::matrix::CanonicalMatrix;

/// Integer index value for one taxon (UR, NU, FC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonCount {
    pub taxon: String,
    pub value: usize,
}

impl TaxonCount {
    pub fn new(taxon: &str, value: usize) -> Self {
        Self { taxon: taxon.to_string(), value }
    }
}

/// Real-valued index value for one taxon (CI, RFC, UV, RI, CV)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonScore {
    pub taxon: String,
    pub value: f64,
}

impl TaxonScore {
    pub fn new(taxon: &str, value: f64) -> Self {
        Self { taxon: taxon.to_string(), value }
    }
}

pub(crate) fn sort_counts(rows: &mut [TaxonCount]) {
    rows.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.taxon.cmp(&b.taxon)));
}

pub(crate) fn sort_scores(rows: &mut [TaxonScore]) {
    rows.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.taxon.cmp(&b.taxon)));
}

/// Stateless index formulas bound to one canonical matrix
///
/// Borrowing the matrix keeps every call read-only; nothing is cached between
/// calls.
#[derive(Debug, Clone, Copy)]
pub struct IndexEngine<'a> {
    matrix: &'a CanonicalMatrix,
    policy: UndefinedValuePolicy,
}

impl<'a> IndexEngine<'a> {
    pub fn new(matrix: &'a CanonicalMatrix, policy: UndefinedValuePolicy) -> Self {
        Self { matrix, policy }
    }

    pub fn matrix(&self) -> &'a CanonicalMatrix {
        self.matrix
    }

    pub fn ur(&self) -> Result<Vec<TaxonCount>> {
        calculate_ur(self.matrix)
    }

    pub fn nu(&self) -> Result<Vec<TaxonCount>> {
        calculate_nu(self.matrix)
    }

    pub fn fc(&self) -> Result<Vec<TaxonCount>> {
        calculate_fc(self.matrix)
    }

    pub fn ci(&self) -> Result<Vec<TaxonScore>> {
        calculate_ci(self.matrix)
    }

    pub fn rfc(&self) -> Result<Vec<TaxonScore>> {
        calculate_rfc(self.matrix)
    }

    pub fn uv(&self) -> Result<Vec<TaxonScore>> {
        calculate_uv(self.matrix)
    }

    pub fn ri(&self) -> Result<Vec<TaxonScore>> {
        calculate_ri(self.matrix)
    }

    pub fn cv(&self) -> Result<Vec<TaxonScore>> {
        calculate_cv(self.matrix)
    }

    pub fn fl(&self) -> Result<Vec<FidelityRow>> {
        calculate_fl(self.matrix)
    }

    pub fn fic(&self) -> Result<Vec<ConsensusRow>> {
        calculate_fic(self.matrix, self.policy)
    }

    pub fn fic_for(&self, use_category: &str) -> Result<f64> {
        fic_for(self.matrix, use_category)
    }

    pub fn summary(&self) -> Result<Vec<TaxonSummary>> {
        calculate_summary(self.matrix)
    }
}
