//! Error taxonomy for survey normalization and index calculation
//!
//! Every failure is an input-data problem surfaced at the offending call;
//! nothing is retried or defaulted.

use polars::error::PolarsError;
use thiserror::Error;

/// Errors raised by the normalizer, the index engine and the similarity engine.
#[derive(Debug, Error)]
pub enum EthnoError {
    /// Missing column binding, wrong dtype, or a binary use cell outside {0,1}.
    #[error("schema error: {0}")]
    Schema(String),

    /// The canonical matrix holds no use reports.
    #[error("no use reports available after normalization")]
    EmptyData,

    /// Jaccard similarity was requested without literature data.
    #[error("no literature data: {0}")]
    NoLiteratureData(String),

    /// A formula denominator is zero (or Nur = 1 for FIC).
    #[error("{index} is undefined for '{key}': {reason}")]
    UndefinedIndexValue {
        index: &'static str,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EthnoError {
    pub(crate) fn missing_columns(context: &str, missing: &[&str]) -> Self {
        EthnoError::Schema(format!(
            "{}: missing required columns: {}",
            context,
            missing.join(", ")
        ))
    }
}

pub type Result<T> = std::result::Result<T, EthnoError>;
