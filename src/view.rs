//! Result views
//!
//! A `ResultView` binds a computed table to its index (short name, title,
//! preferred renderer) and converts it to the output formats callers need:
//! a polars frame, CSV or Parquet on disk, or JSON.

use polars::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use crate::config::ColumnBindings;
use crate::error::Result;
use crate::indices::{ConsensusRow, FidelityRow, IndexKind, Renderer, TaxonCount, TaxonScore, TaxonSummary};
use crate::similarity::{StudyPairSimilarity, StudySimilarity};

/// Key column name for study identifiers
pub const STUDY_COLUMN: &str = "study";

/// Name and title of the all-taxon summary view
pub const SUMMARY_NAME: &str = "all_taxon_indices";
pub const SUMMARY_TITLE: &str = "Ethnobiological Indices per Species";

/// Typed rows of one result table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultTable {
    Counts(Vec<TaxonCount>),
    Scores(Vec<TaxonScore>),
    Fidelity(Vec<FidelityRow>),
    Consensus(Vec<ConsensusRow>),
    Similarity(Vec<StudySimilarity>),
    PairSimilarity(Vec<StudyPairSimilarity>),
    Summary(Vec<TaxonSummary>),
}

impl ResultTable {
    pub fn len(&self) -> usize {
        match self {
            ResultTable::Counts(rows) => rows.len(),
            ResultTable::Scores(rows) => rows.len(),
            ResultTable::Fidelity(rows) => rows.len(),
            ResultTable::Consensus(rows) => rows.len(),
            ResultTable::Similarity(rows) => rows.len(),
            ResultTable::PairSimilarity(rows) => rows.len(),
            ResultTable::Summary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A result table plus the metadata renderers dispatch on
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    kind: IndexKind,
    table: ResultTable,
}

#[derive(Serialize)]
struct JsonView<'a> {
    index: &'a str,
    title: &'a str,
    renderer: Renderer,
    rows: &'a ResultTable,
}

fn counts(values: impl Iterator<Item = usize>) -> Vec<u64> {
    values.map(|v| v as u64).collect()
}

impl ResultView {
    pub fn new(kind: IndexKind, table: ResultTable) -> Self {
        Self { kind, table }
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Short name; the all-taxon summary has its own rather than its sort index
    pub fn name(&self) -> &'static str {
        match self.table {
            ResultTable::Summary(_) => SUMMARY_NAME,
            _ => self.kind.short_name(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.table {
            ResultTable::Summary(_) => SUMMARY_TITLE,
            _ => self.kind.title(),
        }
    }

    pub fn renderer(&self) -> Renderer {
        match self.table {
            // The summary is a plain multi-column table whatever index it is sorted by
            ResultTable::Summary(_) => Renderer::Table,
            _ => self.kind.renderer(),
        }
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn into_table(self) -> ResultTable {
        self.table
    }

    /// Default export file name for this view
    pub fn file_name(&self) -> &'static str {
        match self.table {
            ResultTable::Summary(_) => "all_taxon_indices.csv",
            ResultTable::PairSimilarity(_) => "jaccard_similarity_pairwise.csv",
            _ => self.kind.csv_file_name(),
        }
    }

    /// Convert to a frame; key columns use the bound names, the value
    /// column uses the index short name
    pub fn to_dataframe(&self, bindings: &ColumnBindings) -> Result<DataFrame> {
        let taxon = bindings.taxon_column.as_str();
        let value = self.kind.short_name();

        let columns: Vec<Column> = match &self.table {
            ResultTable::Counts(rows) => vec![
                Series::new(taxon.into(), rows.iter().map(|r| r.taxon.as_str()).collect::<Vec<_>>()).into(),
                Series::new(value.into(), counts(rows.iter().map(|r| r.value))).into(),
            ],
            ResultTable::Scores(rows) => vec![
                Series::new(taxon.into(), rows.iter().map(|r| r.taxon.as_str()).collect::<Vec<_>>()).into(),
                Series::new(value.into(), rows.iter().map(|r| r.value).collect::<Vec<f64>>()).into(),
            ],
            ResultTable::Fidelity(rows) => vec![
                Series::new(taxon.into(), rows.iter().map(|r| r.taxon.as_str()).collect::<Vec<_>>()).into(),
                Series::new(
                    bindings.use_label().into(),
                    rows.iter().map(|r| r.use_category.as_str()).collect::<Vec<_>>(),
                )
                .into(),
                Series::new("Ns".into(), counts(rows.iter().map(|r| r.informants))).into(),
                Series::new("FC".into(), counts(rows.iter().map(|r| r.frequency_of_citation))).into(),
                Series::new(value.into(), rows.iter().map(|r| r.value).collect::<Vec<f64>>()).into(),
            ],
            ResultTable::Consensus(rows) => vec![
                Series::new(
                    bindings.use_label().into(),
                    rows.iter().map(|r| r.use_category.as_str()).collect::<Vec<_>>(),
                )
                .into(),
                Series::new("Nur".into(), counts(rows.iter().map(|r| r.use_reports))).into(),
                Series::new("Nt".into(), counts(rows.iter().map(|r| r.taxa))).into(),
                Series::new(value.into(), rows.iter().map(|r| r.value).collect::<Vec<f64>>()).into(),
            ],
            ResultTable::Similarity(rows) => vec![
                Series::new(STUDY_COLUMN.into(), rows.iter().map(|r| r.study.as_str()).collect::<Vec<_>>()).into(),
                Series::new("pairs".into(), counts(rows.iter().map(|r| r.pairs))).into(),
                Series::new(value.into(), rows.iter().map(|r| r.similarity).collect::<Vec<f64>>()).into(),
            ],
            ResultTable::PairSimilarity(rows) => vec![
                Series::new("study_a".into(), rows.iter().map(|r| r.first.as_str()).collect::<Vec<_>>()).into(),
                Series::new("study_b".into(), rows.iter().map(|r| r.second.as_str()).collect::<Vec<_>>()).into(),
                Series::new(value.into(), rows.iter().map(|r| r.similarity).collect::<Vec<f64>>()).into(),
            ],
            ResultTable::Summary(rows) => {
                let mut columns: Vec<Column> = vec![
                    Series::new(taxon.into(), rows.iter().map(|r| r.taxon.as_str()).collect::<Vec<_>>()).into(),
                ];
                for kind in IndexKind::PER_TAXON {
                    let name: PlSmallStr = kind.short_name().into();
                    // UR, NU and FC stay integer columns
                    let series = match kind {
                        IndexKind::FrequencyOfCitation => Series::new(name, counts(rows.iter().map(|r| r.fc))),
                        IndexKind::NumberOfUses => Series::new(name, counts(rows.iter().map(|r| r.nu))),
                        IndexKind::UseReport => Series::new(name, counts(rows.iter().map(|r| r.ur))),
                        _ => Series::new(
                            name,
                            rows.iter().map(|r| r.get(kind).unwrap_or(0.0)).collect::<Vec<f64>>(),
                        ),
                    };
                    columns.push(series.into());
                }
                columns
            }
        };

        Ok(DataFrame::new(columns)?)
    }

    /// Write the frame as CSV; returns the path written
    ///
    /// `target` may be a directory (the default file name is appended) or a
    /// file path.
    pub fn save_csv(&self, target: &Path, bindings: &ColumnBindings) -> Result<PathBuf> {
        let path = resolve_target(target, self.file_name());
        let mut df = self.to_dataframe(bindings)?;

        let file = fs::File::create(&path)?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)?;

        Ok(path)
    }

    /// Write the frame as Parquet (ZSTD); returns the path written
    pub fn save_parquet(&self, target: &Path, bindings: &ColumnBindings) -> Result<PathBuf> {
        let path = resolve_target(target, &self.file_name().replace(".csv", ".parquet"));
        let mut df = self.to_dataframe(bindings)?;

        let file = fs::File::create(&path)?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Zstd(None))
            .finish(&mut df)?;

        Ok(path)
    }

    /// Pretty-printed JSON with index metadata and typed rows
    pub fn to_json(&self) -> Result<String> {
        let view = JsonView {
            index: self.name(),
            title: self.title(),
            renderer: self.renderer(),
            rows: &self.table,
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

fn resolve_target(target: &Path, file_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(file_name)
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ur_view() -> ResultView {
        ResultView::new(
            IndexKind::UseReport,
            ResultTable::Counts(vec![TaxonCount::new("Species1", 2), TaxonCount::new("Species2", 1)]),
        )
    }

    #[test]
    fn test_metadata() {
        let view = ur_view();
        assert_eq!(view.name(), "UR");
        assert_eq!(view.title(), "Use Report (UR) per Species");
        assert_eq!(view.renderer(), Renderer::RadialBar);
        assert_eq!(view.file_name(), "use_report_UR.csv");
        assert_eq!(view.table().len(), 2);
    }

    #[test]
    fn test_to_dataframe_uses_bound_names() {
        let bindings = ColumnBindings {
            taxon_column: "species".to_string(),
            ..ColumnBindings::default()
        };
        let df = ur_view().to_dataframe(&bindings).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["species", "UR"]);
        assert_eq!(df.column("UR").unwrap().u64().unwrap().get(0), Some(2));
    }

    #[test]
    fn test_consensus_frame() {
        let view = ResultView::new(
            IndexKind::InformantConsensus,
            ResultTable::Consensus(vec![ConsensusRow {
                use_category: "Fever".to_string(),
                use_reports: 5,
                taxa: 3,
                value: 0.5,
            }]),
        );
        let df = view.to_dataframe(&ColumnBindings::default()).unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["ailments_treated", "Nur", "Nt", "FIC"]);
    }

    #[test]
    fn test_save_csv_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = ur_view().save_csv(dir.path(), &ColumnBindings::default()).unwrap();

        assert_eq!(path, dir.path().join("use_report_UR.csv"));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("taxon,UR"));
        assert!(contents.contains("Species1,2"));
    }

    #[test]
    fn test_summary_view_has_its_own_name() {
        let row = TaxonSummary {
            taxon: "Species1".to_string(),
            ci: 1.0,
            fc: 3,
            nu: 1,
            ur: 3,
            rfc: 1.0,
            ri: 1.0,
            uv: 1.0,
            cv: 1.0 / 3.0,
        };
        let view = ResultView::new(IndexKind::CulturalImportance, ResultTable::Summary(vec![row]));

        assert_eq!(view.name(), SUMMARY_NAME);
        assert_eq!(view.title(), SUMMARY_TITLE);
        assert_eq!(view.renderer(), Renderer::Table);

        let json = view.to_json().unwrap();
        assert!(json.contains("\"index\": \"all_taxon_indices\""));
        assert!(!json.contains("\"index\": \"CI\""));
    }

    #[test]
    fn test_to_json() {
        let json = ur_view().to_json().unwrap();
        assert!(json.contains("\"index\": \"UR\""));
        assert!(json.contains("\"renderer\": \"RadialBar\""));
        assert!(json.contains("\"taxon\": \"Species1\""));
    }
}
