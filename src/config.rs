//! Survey configuration
//!
//! Column-role bindings and engine options. Defaults follow the column names
//! used by the reference ethnobotany datasets (`informant`, `taxon`,
//! `ailments_treated`).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

/// Default column names
pub const DEFAULT_INFORMANT_COLUMN: &str = "informant";
pub const DEFAULT_TAXON_COLUMN: &str = "taxon";
pub const DEFAULT_USE_COLUMN: &str = "ailments_treated";

/// Use label column name produced for binary-wide input when no use column is bound
pub const MELTED_USE_COLUMN: &str = "use";

/// Binds source table columns to their roles
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnBindings {
    pub informant_column: String,
    pub taxon_column: String,
    /// Required for long-form input; names the melted label column for binary-wide input
    pub use_column: Option<String>,
    /// `;`-separated citation identifiers (enables Jaccard)
    pub literature_column: Option<String>,
    /// true = one 0/1 column per use category (binary-wide)
    pub convert_use_data: bool,
}

impl Default for ColumnBindings {
    fn default() -> Self {
        Self {
            informant_column: DEFAULT_INFORMANT_COLUMN.to_string(),
            taxon_column: DEFAULT_TAXON_COLUMN.to_string(),
            use_column: Some(DEFAULT_USE_COLUMN.to_string()),
            literature_column: None,
            convert_use_data: false,
        }
    }
}

impl ColumnBindings {
    /// Name used for the use-category key column in result tables
    pub fn use_label(&self) -> &str {
        self.use_column.as_deref().unwrap_or(MELTED_USE_COLUMN)
    }
}

/// What to do with index values whose formula is undefined (FIC with Nur = 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedValuePolicy {
    /// Surface `UndefinedIndexValue` for the whole table
    #[default]
    Fail,
    /// Drop the undefined rows and log them
    Exclude,
}

/// Full survey configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub columns: ColumnBindings,
    pub undefined_values: UndefinedValuePolicy,
}

impl SurveyConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read survey config: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse survey config JSON: {:?}", path))
    }

    pub fn with_informant_column(mut self, name: &str) -> Self {
        self.columns.informant_column = name.to_string();
        self
    }

    pub fn with_taxon_column(mut self, name: &str) -> Self {
        self.columns.taxon_column = name.to_string();
        self
    }

    pub fn with_use_column(mut self, name: &str) -> Self {
        self.columns.use_column = Some(name.to_string());
        self
    }

    pub fn with_literature_column(mut self, name: &str) -> Self {
        self.columns.literature_column = Some(name.to_string());
        self
    }

    /// Treat the source as binary-wide (one 0/1 column per use)
    pub fn binary_wide(mut self) -> Self {
        self.columns.convert_use_data = true;
        self
    }

    pub fn with_undefined_values(mut self, policy: UndefinedValuePolicy) -> Self {
        self.undefined_values = policy;
        self
    }
}
