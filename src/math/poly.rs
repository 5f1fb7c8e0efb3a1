//! Degree-2 monomial expansion.
//!
//! Expands a base feature vector `[x1, .., xd]` into every monomial of total
//! degree ≤ 2:
//!
//! ```text
//! [1, x1, .., xd, x1·x1, x1·x2, .., x1·xd, x2·x2, .., xd·xd]
//! ```
//!
//! Constant term first, then the base features, then the ordered pairwise
//! products with `i ≤ j` (squares included). Fitting and prediction must
//! expand identically, so both call [`expand_degree2`] and the ordering lives
//! only here.

/// Number of monomials of total degree ≤ 2 over `dim` base features.
pub const fn expanded_len(dim: usize) -> usize {
    1 + dim + dim * (dim + 1) / 2
}

/// Expand a base vector into the fixed degree-2 monomial ordering.
pub fn expand_degree2(base: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(expanded_len(base.len()));
    out.push(1.0);
    out.extend_from_slice(base);
    for i in 0..base.len() {
        for j in i..base.len() {
            out.push(base[i] * base[j]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_feature_expansion_is_explicit() {
        let out = expand_degree2(&[3.0, 5.0]);
        assert_eq!(out, vec![1.0, 3.0, 5.0, 9.0, 15.0, 25.0]);
    }

    #[test]
    fn expanded_len_matches_expansion() {
        for dim in 0..12 {
            let base: Vec<f64> = (0..dim).map(|i| i as f64 + 1.0).collect();
            assert_eq!(expand_degree2(&base).len(), expanded_len(dim));
        }
    }

    #[test]
    fn readiness_dimensionality_expands_to_55() {
        // 1 constant + 9 linear + 45 products.
        assert_eq!(expanded_len(9), 55);
    }

    #[test]
    fn squares_sit_on_the_diagonal_positions() {
        let base = [2.0, 4.0, 8.0];
        let out = expand_degree2(&base);
        // [1, 2, 4, 8, 4, 8, 16, 16, 32, 64]
        assert_eq!(out[4], 4.0);
        assert_eq!(out[7], 16.0);
        assert_eq!(out[9], 64.0);
    }
}
