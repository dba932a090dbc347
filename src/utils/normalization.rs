//! Relative-maximum normalization
//!
//! Composite indices (RI) rescale each component by its own maximum across
//! taxa, so the taxon holding the maximum raw value scores exactly 1.0.

/// Divide every value by the column maximum
///
/// A column whose maximum is not positive (all zero, or empty) maps to zeros.
pub fn relative_to_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !(max > 0.0) {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| v / max).collect()
}

/// `numerator / denominator` as f64, 0.0 when the denominator is zero
pub fn share(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
