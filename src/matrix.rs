//! Canonical use-report matrix
//!
//! One row per use report (informant, taxon, use category) with an implicit
//! count of 1. Absence of a row means "not reported", never "negative
//! report". Literature tags live in a separate association table
//! (report index → study identifier) so similarity code can work with sets
//! directly.

use polars::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use crate::config::ColumnBindings;
use crate::error::{EthnoError, Result};

/// One (informant, taxon, use) observation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UseReport {
    pub informant: String,
    pub taxon: String,
    pub use_category: String,
}

impl UseReport {
    pub fn new(informant: &str, taxon: &str, use_category: &str) -> Self {
        Self {
            informant: informant.to_string(),
            taxon: taxon.to_string(),
            use_category: use_category.to_string(),
        }
    }
}

/// Association of a use report with one citing study
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteratureLink {
    /// Index into `CanonicalMatrix::reports`
    pub report: usize,
    pub study: String,
}

/// Normalized survey data shared read-only by every index calculation
#[derive(Debug, Clone, Default)]
pub struct CanonicalMatrix {
    reports: Vec<UseReport>,
    /// `None` when no literature column was bound
    literature: Option<Vec<LiteratureLink>>,
}

impl CanonicalMatrix {
    /// Build a matrix from reports and optional literature links
    ///
    /// # Errors
    /// `SchemaError` when a link points past the last report.
    pub fn new(reports: Vec<UseReport>, literature: Option<Vec<LiteratureLink>>) -> Result<Self> {
        if let Some(link) = literature
            .iter()
            .flatten()
            .find(|link| link.report >= reports.len())
        {
            return Err(EthnoError::Schema(format!(
                "literature link '{}' refers to report {} but only {} reports exist",
                link.study,
                link.report,
                reports.len()
            )));
        }

        Ok(Self { reports, literature })
    }

    pub fn reports(&self) -> &[UseReport] {
        &self.reports
    }

    /// Total use-report rows (R)
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Guard used at the top of every index calculation
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(EthnoError::EmptyData)
        } else {
            Ok(())
        }
    }

    /// Distinct informants (I)
    pub fn informant_count(&self) -> usize {
        self.reports.iter().map(|r| r.informant.as_str()).collect::<FxHashSet<_>>().len()
    }

    /// Distinct taxa (S)
    pub fn taxon_count(&self) -> usize {
        self.reports.iter().map(|r| r.taxon.as_str()).collect::<FxHashSet<_>>().len()
    }

    /// Distinct use categories (potential uses)
    pub fn use_category_count(&self) -> usize {
        self.reports.iter().map(|r| r.use_category.as_str()).collect::<FxHashSet<_>>().len()
    }

    pub fn has_literature(&self) -> bool {
        self.literature.is_some()
    }

    /// Report → study links (`None` when no literature column was bound)
    pub fn literature_links(&self) -> Option<&[LiteratureLink]> {
        self.literature.as_deref()
    }

    /// Studies citing one report
    pub fn studies_of(&self, report: usize) -> BTreeSet<&str> {
        self.literature
            .iter()
            .flatten()
            .filter(|link| link.report == report)
            .map(|link| link.study.as_str())
            .collect()
    }

    /// Informant-level presence: (informant, taxon, use) → {0,1}
    pub fn presence(&self) -> InformantIncidence {
        InformantIncidence {
            triples: self.reports
                .iter()
                .map(|r| (r.informant.clone(), r.taxon.clone(), r.use_category.clone()))
                .collect(),
        }
    }

    /// Taxon-level incidence: (taxon, use) → {0,1}
    pub fn incidence(&self) -> IncidenceTable {
        IncidenceTable {
            pairs: self.reports
                .iter()
                .map(|r| (r.taxon.clone(), r.use_category.clone()))
                .collect(),
        }
    }

    /// Long-form frame with the bound column names
    ///
    /// Literature sets are rejoined with `"; "` when a literature column is bound.
    pub fn to_dataframe(&self, bindings: &ColumnBindings) -> Result<DataFrame> {
        let informants: Vec<&str> = self.reports.iter().map(|r| r.informant.as_str()).collect();
        let taxa: Vec<&str> = self.reports.iter().map(|r| r.taxon.as_str()).collect();
        let uses: Vec<&str> = self.reports.iter().map(|r| r.use_category.as_str()).collect();

        let mut columns = vec![
            Column::new(bindings.informant_column.as_str().into(), informants),
            Column::new(bindings.taxon_column.as_str().into(), taxa),
            Column::new(bindings.use_label().into(), uses),
        ];

        if let (Some(name), Some(links)) = (&bindings.literature_column, &self.literature) {
            let mut per_report: Vec<Vec<&str>> = vec![Vec::new(); self.reports.len()];
            for link in links {
                per_report[link.report].push(link.study.as_str());
            }
            let joined: Vec<String> = per_report.iter().map(|studies| studies.join("; ")).collect();
            columns.push(Column::new(name.as_str().into(), joined));
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Taxon × use presence table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceTable {
    pairs: BTreeSet<(String, String)>,
}

impl IncidenceTable {
    /// 1 if any informant reported `use_category` for `taxon`, else 0
    pub fn value(&self, taxon: &str, use_category: &str) -> u8 {
        u8::from(self.contains(taxon, use_category))
    }

    pub fn contains(&self, taxon: &str, use_category: &str) -> bool {
        self.pairs.contains(&(taxon.to_string(), use_category.to_string()))
    }

    /// Number of (taxon, use) pairs with value 1
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(t, u)| (t.as_str(), u.as_str()))
    }

    /// Distinct use categories per taxon, keyed in taxon order
    pub fn uses_per_taxon(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for (taxon, _) in &self.pairs {
            *counts.entry(taxon.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn use_categories(&self) -> BTreeSet<&str> {
        self.pairs.iter().map(|(_, u)| u.as_str()).collect()
    }

    /// Wide frame: one row per taxon, one 0/1 column per use category
    pub fn to_dataframe(&self, taxon_column: &str) -> Result<DataFrame> {
        let taxa: Vec<&str> = self.uses_per_taxon().into_keys().collect();
        let mut columns = vec![Column::new(taxon_column.into(), taxa.clone())];

        for use_category in self.use_categories() {
            let flags: Vec<i32> = taxa
                .iter()
                .map(|taxon| i32::from(self.value(taxon, use_category)))
                .collect();
            columns.push(Column::new(use_category.into(), flags));
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Informant × taxon × use presence table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformantIncidence {
    triples: BTreeSet<(String, String, String)>,
}

impl InformantIncidence {
    pub fn value(&self, informant: &str, taxon: &str, use_category: &str) -> u8 {
        let key = (informant.to_string(), taxon.to_string(), use_category.to_string());
        u8::from(self.triples.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Pivot back to the binary-wide shape: (informant, taxon) rows, one 0/1 column per use
    pub fn to_binary_wide(&self, bindings: &ColumnBindings) -> Result<DataFrame> {
        let rows: BTreeSet<(&str, &str)> = self.triples
            .iter()
            .map(|(i, t, _)| (i.as_str(), t.as_str()))
            .collect();
        let uses: BTreeSet<&str> = self.triples.iter().map(|(_, _, u)| u.as_str()).collect();

        let informants: Vec<&str> = rows.iter().map(|(i, _)| *i).collect();
        let taxa: Vec<&str> = rows.iter().map(|(_, t)| *t).collect();

        let mut columns = vec![
            Column::new(bindings.informant_column.as_str().into(), informants),
            Column::new(bindings.taxon_column.as_str().into(), taxa),
        ];

        for use_category in uses {
            let flags: Vec<i32> = rows
                .iter()
                .map(|(informant, taxon)| i32::from(self.value(informant, taxon, use_category)))
                .collect();
            columns.push(Column::new(use_category.into(), flags));
        }

        Ok(DataFrame::new(columns)?)
    }
}
