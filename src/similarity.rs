//! Jaccard similarity across literature-tagged subsets of the survey
//!
//! Each study identifier found in the literature column defines a set of
//! (taxon, use) pairs: every use report tagged with that study contributes
//! its pair. A report with several tags contributes to each of them.
//!
//! J(A, B) = |A ∩ B| / |A ∪ B|, with J(∅, ∅) = 0.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use crate::error::{EthnoError, Result};
use crate::matrix::CanonicalMatrix;

/// Set of (taxon, use) pairs reported under one study
pub type PairSet<'a> = BTreeSet<(&'a str, &'a str)>;

/// One study compared with the whole survey
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySimilarity {
    pub study: String,
    /// (taxon, use) pairs tagged with this study
    pub pairs: usize,
    pub similarity: f64,
}

/// One unordered study pair (first < second)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyPairSimilarity {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

/// Jaccard index of two sets
pub fn jaccard_similarity<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Partition the survey's (taxon, use) pairs by study identifier
///
/// # Errors
/// - `EmptyData` for an empty matrix
/// - `NoLiteratureData` when no literature column was bound or no report
///   carries a tag
pub fn study_sets(matrix: &CanonicalMatrix) -> Result<BTreeMap<&str, PairSet<'_>>> {
    matrix.ensure_not_empty()?;

    let links = matrix.literature_links().ok_or_else(|| {
        EthnoError::NoLiteratureData("no literature column is bound".to_string())
    })?;

    let reports = matrix.reports();
    let mut studies: BTreeMap<&str, PairSet<'_>> = BTreeMap::new();
    for link in links {
        // Link indices are checked against the reports when the matrix is built
        let report = &reports[link.report];
        studies
            .entry(link.study.as_str())
            .or_default()
            .insert((report.taxon.as_str(), report.use_category.as_str()));
    }

    if studies.is_empty() {
        return Err(EthnoError::NoLiteratureData(
            "no use report carries a literature tag".to_string(),
        ));
    }

    Ok(studies)
}

/// Every study against the pooled survey reference set
///
/// Sorted by similarity descending, then study ascending.
pub fn jaccard(matrix: &CanonicalMatrix) -> Result<Vec<StudySimilarity>> {
    let studies = study_sets(matrix)?;
    let reference: PairSet<'_> = matrix
        .reports()
        .iter()
        .map(|r| (r.taxon.as_str(), r.use_category.as_str()))
        .collect();

    let mut rows: Vec<StudySimilarity> = studies
        .iter()
        .map(|(study, pairs)| StudySimilarity {
            study: study.to_string(),
            pairs: pairs.len(),
            similarity: jaccard_similarity(pairs, &reference),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.study.cmp(&b.study))
    });

    Ok(rows)
}

/// Every unordered pair of studies
///
/// Sorted by similarity descending, then first and second study ascending.
/// A single tagged study yields an empty table.
pub fn jaccard_pairwise(matrix: &CanonicalMatrix) -> Result<Vec<StudyPairSimilarity>> {
    let studies: Vec<(&str, PairSet<'_>)> = study_sets(matrix)?.into_iter().collect();

    let mut rows = Vec::with_capacity(studies.len() * studies.len().saturating_sub(1) / 2);
    for (i, (first, a)) in studies.iter().enumerate() {
        for (second, b) in &studies[i + 1..] {
            rows.push(StudyPairSimilarity {
                first: first.to_string(),
                second: second.to_string(),
                similarity: jaccard_similarity(a, b),
            });
        }
    }

    rows.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.first.cmp(&b.first))
            .then_with(|| a.second.cmp(&b.second))
    });

    Ok(rows)
}
