//! Literature tag parsing
//!
//! A literature cell lists the studies that also record a use report, as a
//! `;`-separated string (e.g. `"Smith 2001; Doe 2015"`).

use smallvec::SmallVec;

/// Per-report study identifiers; most reports cite only a handful of studies
pub type LiteratureTags = SmallVec<[String; 4]>;

/// Split a literature cell into trimmed, deduplicated study identifiers
///
/// Empty segments are dropped and first-seen order is kept. `None` (a missing
/// cell) yields an empty set.
pub fn parse_literature(cell: Option<&str>) -> LiteratureTags {
    let mut tags = LiteratureTags::new();

    let Some(raw) = cell else {
        return tags;
    };

    for study in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        if !tags.iter().any(|existing| existing == study) {
            tags.push(study.to_string());
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literature_trims_and_splits() {
        let tags = parse_literature(Some(" Smith 2001 ;Doe 2015;  "));
        assert_eq!(tags.as_slice(), &["Smith 2001".to_string(), "Doe 2015".to_string()]);
    }

    #[test]
    fn test_parse_literature_deduplicates() {
        let tags = parse_literature(Some("A;B;A; B"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_parse_literature_missing_cell() {
        assert!(parse_literature(None).is_empty());
        assert!(parse_literature(Some("")).is_empty());
        assert!(parse_literature(Some(" ; ;")).is_empty());
    }
}
