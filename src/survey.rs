//! Survey - Main entry point for ethnobiological index analysis
//!
//! Owns the configuration and the canonical matrix built once at
//! construction. Every index call re-derives its result from the cached
//! matrix; nothing else is cached.

use polars::prelude::*;
use std::path::Path;
use tracing::info;
use crate::config::SurveyConfig;
use crate::data::load_table;
use crate::error::Result;
use crate::indices::*;
use crate::matrix::CanonicalMatrix;
use crate::normalize::normalize;
use crate::similarity::{self, StudyPairSimilarity, StudySimilarity};
use crate::view::{ResultTable, ResultView};

/// A normalized survey ready for index calculation
#[derive(Debug, Clone)]
pub struct Survey {
    config: SurveyConfig,
    matrix: CanonicalMatrix,
}

impl Survey {
    /// Normalize a source table under the given configuration
    ///
    /// # Errors
    /// `SchemaError` for missing or invalid column bindings. An empty table
    /// is accepted here; index calls on it fail with `EmptyData`.
    pub fn new(df: &DataFrame, config: SurveyConfig) -> Result<Self> {
        let matrix = normalize(df, &config.columns)?;

        info!(
            "Survey ready: {} use reports, {} informants, {} taxa, {} use categories",
            matrix.len(),
            matrix.informant_count(),
            matrix.taxon_count(),
            matrix.use_category_count()
        );

        Ok(Self { config, matrix })
    }

    /// Load a CSV or Parquet table and normalize it
    pub fn from_path(path: &Path, config: SurveyConfig) -> anyhow::Result<Self> {
        info!("Loading survey table: {}", path.display());
        let df = load_table(path)?;
        Ok(Self::new(&df, config)?)
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    pub fn matrix(&self) -> &CanonicalMatrix {
        &self.matrix
    }

    pub fn engine(&self) -> IndexEngine<'_> {
        IndexEngine::new(&self.matrix, self.config.undefined_values)
    }

    pub fn use_report(&self) -> Result<Vec<TaxonCount>> {
        self.engine().ur()
    }

    pub fn number_of_uses(&self) -> Result<Vec<TaxonCount>> {
        self.engine().nu()
    }

    pub fn frequency_of_citation(&self) -> Result<Vec<TaxonCount>> {
        self.engine().fc()
    }

    pub fn cultural_importance(&self) -> Result<Vec<TaxonScore>> {
        self.engine().ci()
    }

    pub fn relative_frequency_of_citation(&self) -> Result<Vec<TaxonScore>> {
        self.engine().rfc()
    }

    pub fn use_value(&self) -> Result<Vec<TaxonScore>> {
        self.engine().uv()
    }

    pub fn relative_importance(&self) -> Result<Vec<TaxonScore>> {
        self.engine().ri()
    }

    pub fn cultural_value(&self) -> Result<Vec<TaxonScore>> {
        self.engine().cv()
    }

    pub fn fidelity_level(&self) -> Result<Vec<FidelityRow>> {
        self.engine().fl()
    }

    pub fn informant_consensus(&self) -> Result<Vec<ConsensusRow>> {
        self.engine().fic()
    }

    pub fn informant_consensus_for(&self, use_category: &str) -> Result<f64> {
        self.engine().fic_for(use_category)
    }

    /// Each literature study against the whole survey
    pub fn jaccard(&self) -> Result<Vec<StudySimilarity>> {
        similarity::jaccard(&self.matrix)
    }

    /// Every unordered pair of literature studies
    pub fn jaccard_pairwise(&self) -> Result<Vec<StudyPairSimilarity>> {
        similarity::jaccard_pairwise(&self.matrix)
    }

    /// Every per-taxon index in one table
    ///
    /// Ordered by taxon when `sort_by` is `None`, otherwise by that index
    /// (ties by taxon).
    ///
    /// # Errors
    /// `SchemaError` when `sort_by` names FL, FIC or Jaccard.
    pub fn all_taxon_indices(&self, sort_by: Option<IndexKind>, ascending: bool) -> Result<Vec<TaxonSummary>> {
        let mut rows = self.engine().summary()?;
        if let Some(kind) = sort_by {
            sort_summary(&mut rows, kind, ascending)?;
        }
        Ok(rows)
    }

    /// Compute one index and wrap it for rendering or export
    pub fn calculate(&self, kind: IndexKind) -> Result<ResultView> {
        let table = match kind {
            IndexKind::UseReport => ResultTable::Counts(self.use_report()?),
            IndexKind::NumberOfUses => ResultTable::Counts(self.number_of_uses()?),
            IndexKind::FrequencyOfCitation => ResultTable::Counts(self.frequency_of_citation()?),
            IndexKind::CulturalImportance => ResultTable::Scores(self.cultural_importance()?),
            IndexKind::RelativeFrequencyOfCitation => ResultTable::Scores(self.relative_frequency_of_citation()?),
            IndexKind::UseValue => ResultTable::Scores(self.use_value()?),
            IndexKind::RelativeImportance => ResultTable::Scores(self.relative_importance()?),
            IndexKind::CulturalValue => ResultTable::Scores(self.cultural_value()?),
            IndexKind::FidelityLevel => ResultTable::Fidelity(self.fidelity_level()?),
            IndexKind::InformantConsensus => ResultTable::Consensus(self.informant_consensus()?),
            IndexKind::Jaccard => ResultTable::Similarity(self.jaccard()?),
        };
        Ok(ResultView::new(kind, table))
    }

    /// Pairwise Jaccard wrapped as a view
    pub fn calculate_pairwise_jaccard(&self) -> Result<ResultView> {
        Ok(ResultView::new(IndexKind::Jaccard, ResultTable::PairSimilarity(self.jaccard_pairwise()?)))
    }

    /// All-taxon summary wrapped as a view
    ///
    /// The view is named `all_taxon_indices`; `kind()` reports the sort index
    /// (CI when unsorted).
    pub fn calculate_summary(&self, sort_by: Option<IndexKind>, ascending: bool) -> Result<ResultView> {
        let rows = self.all_taxon_indices(sort_by, ascending)?;
        let kind = sort_by.unwrap_or(IndexKind::CulturalImportance);
        Ok(ResultView::new(kind, ResultTable::Summary(rows)))
    }
}
