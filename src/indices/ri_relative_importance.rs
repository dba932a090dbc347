//! RELATIVE IMPORTANCE (RI)
//!
//! RI = (RFC(max) + RNU(max)) / 2 where each component is rescaled to its own
//! maximum across taxa:
//!   RFC(max) = RFC / max(RFC)
//!   RNU(max) = NU / max(NU)
//!
//! The taxon with the largest RFC (or NU) therefore scores 1.0 on that
//! component, and RI lies in (0, 1].

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::matrix::CanonicalMatrix;
use crate::utils::relative_to_max;
use super::nu_number_of_uses::calculate_nu;
use super::rfc_relative_frequency::calculate_rfc;
use super::{sort_scores, TaxonCount, TaxonScore};

/// Calculate RI for every taxon, sorted descending (ties by taxon)
pub fn calculate_ri(matrix: &CanonicalMatrix) -> Result<Vec<TaxonScore>> {
    let rfc = calculate_rfc(matrix)?;
    let nu = calculate_nu(matrix)?;
    Ok(ri_from_components(&rfc, &nu))
}

/// Combine already computed RFC and NU columns
///
/// Taxa missing from the NU column contribute 0 for that component.
pub fn ri_from_components(rfc: &[TaxonScore], nu: &[TaxonCount]) -> Vec<TaxonScore> {
    let nu_by_taxon: FxHashMap<&str, usize> = nu
        .iter()
        .map(|row| (row.taxon.as_str(), row.value))
        .collect();

    let rfc_values: Vec<f64> = rfc.iter().map(|row| row.value).collect();
    let nu_values: Vec<f64> = rfc
        .iter()
        .map(|row| nu_by_taxon.get(row.taxon.as_str()).copied().unwrap_or(0) as f64)
        .collect();

    let rfc_rel = relative_to_max(&rfc_values);
    let nu_rel = relative_to_max(&nu_values);

    let mut rows: Vec<TaxonScore> = rfc
        .iter()
        .zip(rfc_rel.iter().zip(nu_rel.iter()))
        .map(|(row, (r, n))| TaxonScore::new(&row.taxon, (r + n) / 2.0))
        .collect();

    sort_scores(&mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::UseReport;
    use approx::assert_relative_eq;

    #[test]
    fn test_ri_worked_example() {
        let matrix = CanonicalMatrix::new(
            vec![
                UseReport::new("A", "Species1", "Headache"),
                UseReport::new("B", "Species2", "Fever"),
                UseReport::new("C", "Species1", "Headache"),
                UseReport::new("A", "Species3", "Cough"),
                UseReport::new("B", "Species1", "Headache"),
                UseReport::new("C", "Species2", "Fever"),
            ],
            None,
        ).unwrap();

        let ri = calculate_ri(&matrix).unwrap();
        let taxa: Vec<&str> = ri.iter().map(|r| r.taxon.as_str()).collect();
        assert_eq!(taxa, vec!["Species1", "Species2", "Species3"]);
        assert_relative_eq!(ri[0].value, 1.0);
        assert_relative_eq!(ri[1].value, 0.8333333333333333, epsilon = 1e-12);
        assert_relative_eq!(ri[2].value, 0.6666666666666666, epsilon = 1e-12);
    }

    #[test]
    fn test_ri_components_reach_one_at_max() {
        let rfc = vec![TaxonScore::new("sp_a", 0.5), TaxonScore::new("sp_b", 0.25)];
        let nu = vec![TaxonCount::new("sp_b", 4), TaxonCount::new("sp_a", 1)];

        let ri = ri_from_components(&rfc, &nu);
        // sp_a: (1.0 + 0.25) / 2, sp_b: (0.5 + 1.0) / 2
        assert_eq!(ri[0].taxon, "sp_b");
        assert_relative_eq!(ri[0].value, 0.75);
        assert_relative_eq!(ri[1].value, 0.625);
    }
}
