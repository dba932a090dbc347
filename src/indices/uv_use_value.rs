//! USE VALUE (UV)
//!
//! Tracks cultural importance per taxon: UV = UR(taxon) / I, numerically equal
//! to CI.

use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use super::ci_cultural_importance::calculate_ci;
use super::TaxonScore;

/// Calculate UV for every taxon, sorted descending (ties by taxon)
pub fn calculate_uv(matrix: &CanonicalMatrix) -> Result<Vec<TaxonScore>> {
    calculate_ci(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::UseReport;

    #[test]
    fn test_uv_matches_ci() {
        let matrix = CanonicalMatrix::new(
            vec![
                UseReport::new("A", "sp_a", "Fever"),
                UseReport::new("A", "sp_a", "Cough"),
                UseReport::new("B", "sp_b", "Fever"),
            ],
            None,
        ).unwrap();

        let uv = calculate_uv(&matrix).unwrap();
        let ci = calculate_ci(&matrix).unwrap();
        assert_eq!(uv, ci);
        assert_eq!(uv[0].value, 1.0);
        assert_eq!(uv[1].value, 0.5);
    }
}
