//! Measured histogram types with associated covariance matrices.

use std::collections::BTreeMap;

use nx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Reserved covariance name for an explicitly stored statistical covariance.
pub const STAT_COV_NAME: &str = "stat_cov_matrix";

/// A 1D measured distribution with per-bin statistical variances and named
/// covariance matrices, as exported from the upstream framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasuredHistogram {
    /// Histogram name.
    pub name: String,
    /// Histogram title.
    pub title: String,
    /// Bin edges (length = n_bins + 1).
    pub bin_edges: Vec<f64>,
    /// Bin contents (length = n_bins, excluding under/overflow).
    pub bin_content: Vec<f64>,
    /// Per-bin statistical variance (length = n_bins).
    pub stat_variance: Vec<f64>,
    /// Named covariance matrices, each n_bins x n_bins row-major.
    ///
    /// The reserved name [`STAT_COV_NAME`] holds a full statistical
    /// covariance; every other entry is a systematic contribution.
    #[serde(default)]
    pub covariances: BTreeMap<String, Vec<Vec<f64>>>,
}

impl MeasuredHistogram {
    /// Number of bins (excluding under/overflow).
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Check internal length agreement and covariance squareness.
    pub fn validate(&self) -> Result<()> {
        let n = self.n_bins();
        if self.bin_edges.len() != n + 1 {
            return Err(Error::Validation(format!(
                "histogram '{}': {} edges for {} bins",
                self.name,
                self.bin_edges.len(),
                n
            )));
        }
        if self.stat_variance.len() != n {
            return Err(Error::Validation(format!(
                "histogram '{}': {} stat variances for {} bins",
                self.name,
                self.stat_variance.len(),
                n
            )));
        }
        for (cov_name, m) in &self.covariances {
            if m.len() != n || m.iter().any(|row| row.len() != n) {
                return Err(Error::Validation(format!(
                    "histogram '{}': covariance '{}' is not {}x{}",
                    self.name, cov_name, n, n
                )));
            }
        }
        Ok(())
    }

    /// Statistical covariance matrix.
    ///
    /// Uses the stored [`STAT_COV_NAME`] matrix when present, otherwise the
    /// diagonal of the per-bin statistical variances.
    pub fn stat_error_matrix(&self) -> Vec<Vec<f64>> {
        if let Some(m) = self.covariances.get(STAT_COV_NAME) {
            return m.clone();
        }
        let n = self.n_bins();
        let mut m = vec![vec![0.0; n]; n];
        for (i, &v) in self.stat_variance.iter().enumerate() {
            m[i][i] = v;
        }
        m
    }

    /// Named systematic covariance matrix.
    ///
    /// An absent name yields an all-zero matrix, matching the permissive
    /// lookup of the source framework that callers rely on.
    pub fn sys_error_matrix(&self, name: &str) -> Vec<Vec<f64>> {
        let n = self.n_bins();
        self.covariances.get(name).cloned().unwrap_or_else(|| vec![vec![0.0; n]; n])
    }

    /// Total covariance: element-wise sum of all systematic matrices, plus
    /// the statistical matrix when `include_stat`.
    pub fn total_error_matrix(&self, include_stat: bool) -> Vec<Vec<f64>> {
        let n = self.n_bins();
        let mut total = vec![vec![0.0; n]; n];
        for (cov_name, m) in &self.covariances {
            if cov_name == STAT_COV_NAME {
                continue;
            }
            for i in 0..n {
                for j in 0..n {
                    total[i][j] += m[i][j];
                }
            }
        }
        if include_stat {
            let stat = self.stat_error_matrix();
            for i in 0..n {
                for j in 0..n {
                    total[i][j] += stat[i][j];
                }
            }
        }
        total
    }

    /// Clone under a new name.
    pub fn clone_named(&self, name: impl Into<String>) -> Self {
        let mut h = self.clone();
        h.name = name.into();
        h
    }

    /// Rescale the per-bin statistical variance by `factor` and record the
    /// added variance on the diagonal of the covariance matrix stored under
    /// `cov_name` (created if absent).
    pub fn modify_statistical_unc(&mut self, factor: f64, cov_name: &str) {
        let n = self.n_bins();
        let cov = self.covariances.entry(cov_name.to_string()).or_insert_with(|| vec![vec![0.0; n]; n]);
        for (i, v) in self.stat_variance.iter_mut().enumerate() {
            let added = (factor - 1.0) * *v;
            cov[i][i] += added;
            *v *= factor;
        }
    }

    /// Scale contents by `factor`; variances and covariances by `factor`^2.
    pub fn scale(&mut self, factor: f64) {
        self.scale_per_bin(&vec![factor; self.n_bins()]);
    }

    /// Scale contents by `factor / bin_width` per bin ("width" scaling);
    /// covariance entry (i, j) scales by the product of the two bin factors.
    pub fn scale_by_width(&mut self, factor: f64) {
        let factors: Vec<f64> = (0..self.n_bins())
            .map(|i| factor / (self.bin_edges[i + 1] - self.bin_edges[i]))
            .collect();
        self.scale_per_bin(&factors);
    }

    fn scale_per_bin(&mut self, factors: &[f64]) {
        for (c, &f) in self.bin_content.iter_mut().zip(factors) {
            *c *= f;
        }
        for (v, &f) in self.stat_variance.iter_mut().zip(factors) {
            *v *= f * f;
        }
        for m in self.covariances.values_mut() {
            for (row, &fi) in m.iter_mut().zip(factors) {
                for (e, &fj) in row.iter_mut().zip(factors) {
                    *e *= fi * fj;
                }
            }
        }
    }
}

/// A 2D histogram (counts only, no covariance bookkeeping).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram2 {
    /// Histogram name.
    pub name: String,
    /// Histogram title.
    pub title: String,
    /// X bin edges (length = n_bins_x + 1).
    pub x_edges: Vec<f64>,
    /// Y bin edges (length = n_bins_y + 1).
    pub y_edges: Vec<f64>,
    /// Contents as `contents[iy][ix]`.
    pub contents: Vec<Vec<f64>>,
}

impl Histogram2 {
    /// Number of x bins.
    pub fn n_bins_x(&self) -> usize {
        self.x_edges.len().saturating_sub(1)
    }

    /// Number of y bins.
    pub fn n_bins_y(&self) -> usize {
        self.y_edges.len().saturating_sub(1)
    }

    /// Check edge/content length agreement.
    pub fn validate(&self) -> Result<()> {
        let (nx, ny) = (self.n_bins_x(), self.n_bins_y());
        if nx == 0 || ny == 0 {
            return Err(Error::Validation(format!(
                "histogram '{}': edges must define at least 1 bin per axis",
                self.name
            )));
        }
        if self.contents.len() != ny || self.contents.iter().any(|row| row.len() != nx) {
            return Err(Error::Validation(format!(
                "histogram '{}': contents are not {}x{}",
                self.name, ny, nx
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bin_hist() -> MeasuredHistogram {
        let mut covariances = BTreeMap::new();
        covariances.insert("flux_cov".to_string(), vec![vec![4.0, 1.0], vec![1.0, 4.0]]);
        MeasuredHistogram {
            name: "h".into(),
            title: "h".into(),
            bin_edges: vec![0.0, 1.0, 3.0],
            bin_content: vec![10.0, 20.0],
            stat_variance: vec![2.0, 3.0],
            covariances,
        }
    }

    #[test]
    fn stat_matrix_from_variances() {
        let h = two_bin_hist();
        let m = h.stat_error_matrix();
        assert_eq!(m, vec![vec![2.0, 0.0], vec![0.0, 3.0]]);
    }

    #[test]
    fn stat_matrix_prefers_stored() {
        let mut h = two_bin_hist();
        h.covariances
            .insert(STAT_COV_NAME.to_string(), vec![vec![2.0, 0.5], vec![0.5, 3.0]]);
        let m = h.stat_error_matrix();
        assert_eq!(m[0][1], 0.5);
    }

    #[test]
    fn missing_sys_matrix_is_zero() {
        let h = two_bin_hist();
        let m = h.sys_error_matrix("unfolding_cov_matrix_q2");
        assert_eq!(m, vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn total_excludes_stored_stat() {
        let mut h = two_bin_hist();
        h.covariances
            .insert(STAT_COV_NAME.to_string(), vec![vec![9.0, 9.0], vec![9.0, 9.0]]);
        let sys_only = h.total_error_matrix(false);
        assert_eq!(sys_only, vec![vec![4.0, 1.0], vec![1.0, 4.0]]);
        let with_stat = h.total_error_matrix(true);
        assert_eq!(with_stat[0][0], 13.0);
    }

    #[test]
    fn modify_statistical_unc_records_added_variance() {
        let mut h = two_bin_hist();
        h.modify_statistical_unc(7.8, "unfolding_cov_matrix_mixtpi");
        let unfold = &h.covariances["unfolding_cov_matrix_mixtpi"];
        assert!((unfold[0][0] - 6.8 * 2.0).abs() < 1e-12);
        assert!((unfold[1][1] - 6.8 * 3.0).abs() < 1e-12);
        assert_eq!(unfold[0][1], 0.0);
        assert!((h.stat_variance[0] - 7.8 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn scale_by_width_scales_covariances_bilinearly() {
        let mut h = two_bin_hist();
        // Bin widths 1.0 and 2.0 with factor 4 -> per-bin factors 4 and 2.
        h.scale_by_width(4.0);
        assert_eq!(h.bin_content, vec![40.0, 40.0]);
        let cov = &h.covariances["flux_cov"];
        assert!((cov[0][0] - 4.0 * 16.0).abs() < 1e-12);
        assert!((cov[0][1] - 1.0 * 8.0).abs() < 1e-12);
        assert!((cov[1][1] - 4.0 * 4.0).abs() < 1e-12);
        assert!((h.stat_variance[0] - 2.0 * 16.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_ragged_covariance() {
        let mut h = two_bin_hist();
        h.covariances.insert("bad".into(), vec![vec![1.0], vec![1.0, 2.0]]);
        assert!(h.validate().is_err());
    }

    #[test]
    fn hist2_validate() {
        let h2 = Histogram2 {
            name: "m".into(),
            title: "m".into(),
            x_edges: vec![0.0, 1.0, 2.0],
            y_edges: vec![0.0, 1.0],
            contents: vec![vec![1.0, 2.0]],
        };
        assert!(h2.validate().is_ok());
        assert_eq!(h2.n_bins_x(), 2);
        assert_eq!(h2.n_bins_y(), 1);
    }
}
