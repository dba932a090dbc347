//! Ethnobiological index calculator
//!
//! Quantitative indices for ethnobotanical and ethnozoological survey data,
//! computed from tables describing which informants report which uses for
//! which taxa.
//!
//! Module layout:
//! - `config`: column bindings and engine options
//! - `data`: CSV/Parquet loading with Polars
//! - `normalize` / `matrix`: source table to canonical use-report matrix
//! - `indices`: UR, CI, FC, NU, RFC, RI, UV, CV, FL and FIC
//! - `similarity`: Jaccard similarity across literature studies
//! - `view`: result tables bound to their index, with frame/CSV/JSON export
//! - `survey`: the host object tying these together

pub mod config;
pub mod data;
pub mod error;
pub mod indices;
pub mod matrix;
pub mod normalize;
pub mod similarity;
pub mod survey;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use config::{ColumnBindings, SurveyConfig, UndefinedValuePolicy};
pub use error::{EthnoError, Result};
pub use indices::{
    ConsensusRow, FidelityRow, IndexEngine, IndexKind, Renderer, TaxonCount, TaxonScore, TaxonSummary,
};
pub use matrix::{CanonicalMatrix, IncidenceTable, InformantIncidence, LiteratureLink, UseReport};
pub use normalize::{normalize, InputShape};
pub use similarity::{jaccard_similarity, StudyPairSimilarity, StudySimilarity};
pub use survey::Survey;
pub use view::{ResultTable, ResultView};
