//! Fitted least-squares models.
//!
//! A [`LinearModel`] owns its coefficients together with the feature map used
//! at fit time, so prediction can never apply a different expansion than the
//! one the coefficients were solved against. Refitting builds a fresh model;
//! there is no incremental update.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::error::ScoreError;
use crate::math::{expand_degree2, expanded_len, solve_least_squares};

/// How raw feature vectors become design-matrix rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMap {
    /// Intercept column followed by the raw features.
    Identity,
    /// Every monomial of total degree ≤ 2 (constant term included).
    Poly2,
}

impl FeatureMap {
    fn design_row(self, base: &[f64]) -> Vec<f64> {
        match self {
            FeatureMap::Identity => {
                let mut row = Vec::with_capacity(base.len() + 1);
                row.push(1.0);
                row.extend_from_slice(base);
                row
            }
            FeatureMap::Poly2 => expand_degree2(base),
        }
    }

    fn design_len(self, dim: usize) -> usize {
        match self {
            FeatureMap::Identity => dim + 1,
            FeatureMap::Poly2 => expanded_len(dim),
        }
    }
}

/// A fitted model: feature map, expected input dimensionality, coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    map: FeatureMap,
    base_dim: usize,
    coeffs: Vec<f64>,
}

impl LinearModel {
    /// Fit by ordinary least squares on raw (unexpanded) feature rows.
    pub fn fit(rows: &[Vec<f64>], labels: &[f64], map: FeatureMap) -> Result<Self, ScoreError> {
        if rows.is_empty() {
            return Err(ScoreError::computation("cannot fit on an empty dataset"));
        }
        if rows.len() != labels.len() {
            return Err(ScoreError::computation(format!(
                "feature/label count mismatch: {} rows vs {} labels",
                rows.len(),
                labels.len()
            )));
        }
        let base_dim = rows[0].len();
        if base_dim == 0 {
            return Err(ScoreError::computation("feature rows are empty"));
        }
        if rows.iter().any(|r| r.len() != base_dim) {
            return Err(ScoreError::computation("ragged feature rows"));
        }

        let n_cols = map.design_len(base_dim);
        let design: Vec<Vec<f64>> = rows.par_iter().map(|r| map.design_row(r)).collect();

        // Column equilibration. The degree-2 map puts raw euro amounts next to
        // squared euro amounts, spanning ~12 orders of magnitude; scaling each
        // column to unit max keeps the SVD cutoff meaningful. Coefficients are
        // unscaled afterwards so callers never see the scaling.
        let mut scale = vec![0.0_f64; n_cols];
        for row in &design {
            for (j, v) in row.iter().enumerate() {
                scale[j] = scale[j].max(v.abs());
            }
        }
        for s in &mut scale {
            if !(*s > 0.0 && s.is_finite()) {
                *s = 1.0;
            }
        }

        let mut x = DMatrix::<f64>::zeros(rows.len(), n_cols);
        for (i, row) in design.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                x[(i, j)] = v / scale[j];
            }
        }
        let y = DVector::from_row_slice(labels);

        let beta = solve_least_squares(&x, &y).ok_or_else(|| {
            ScoreError::computation("least-squares solve failed on the training matrix")
        })?;

        let coeffs: Vec<f64> = beta
            .iter()
            .zip(scale.iter())
            .map(|(b, s)| b / s)
            .collect();

        Ok(Self {
            map,
            base_dim,
            coeffs,
        })
    }

    /// Predict the label for one raw feature vector.
    ///
    /// The vector must have exactly the dimensionality the model was fitted
    /// on; anything else means the caller built features in a different order
    /// or for a different task.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ScoreError> {
        if features.len() != self.base_dim {
            return Err(ScoreError::computation(format!(
                "feature vector has {} entries, model was fitted on {}",
                features.len(),
                self.base_dim
            )));
        }
        let row = self.map.design_row(features);
        Ok(row
            .iter()
            .zip(self.coeffs.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Coefficient of determination against a labelled dataset.
    pub fn r_squared(&self, rows: &[Vec<f64>], labels: &[f64]) -> Result<f64, ScoreError> {
        if rows.len() != labels.len() || rows.is_empty() {
            return Err(ScoreError::computation("r² needs a non-empty labelled set"));
        }
        let mean = labels.iter().sum::<f64>() / labels.len() as f64;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (row, &label) in rows.iter().zip(labels.iter()) {
            let fitted = self.predict(row)?;
            ss_res += (label - fitted) * (label - fitted);
            ss_tot += (label - mean) * (label - mean);
        }
        if ss_tot <= 0.0 {
            // Constant labels: either a perfect fit or no variance to explain.
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - ss_res / ss_tot)
    }

    /// Fitted coefficients in design-row order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }
}
