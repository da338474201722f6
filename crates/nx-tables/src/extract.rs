//! Covariance extraction: bin-edge labels and stat/sys sub-matrices for one
//! prepared cross-section histogram.

use nx_hist::MeasuredHistogram;

use crate::variable::VariableSpec;

/// Extracted covariance information for one variable.
#[derive(Debug, Clone)]
pub struct CovarianceInfo {
    /// Formatted bin-edge labels, one per kept bin.
    pub bin_labels: Vec<String>,
    /// Statistical covariance (kept bins only).
    pub stat: Vec<Vec<f64>>,
    /// Systematic covariance (kept bins only).
    pub sys: Vec<Vec<f64>>,
}

/// Name of the unfolding covariance matrix attached to a variable's
/// cross-section histogram.
pub fn unfolding_cov_name(var_key: &str) -> String {
    format!("unfolding_cov_matrix_{var_key}")
}

/// Extract bin-edge labels and the statistical/systematic covariance
/// sub-blocks from a prepared cross-section histogram.
///
/// For every kept bin pair `(i, j)`:
/// - statistical = stat + unfolding covariance when `apply_unfolding`,
///   otherwise the raw statistical entry;
/// - systematic = total systematic covariance minus the unfolding
///   covariance, always.
///
/// Edge labels are scaled down by `units_corr` and formatted with the
/// variable's decimal precision. A configured bin range restricts the output
/// to the corresponding sub-block.
pub fn extract_covariance(
    hist: &MeasuredHistogram,
    var: &VariableSpec,
    units_corr: f64,
    apply_unfolding: bool,
) -> CovarianceInfo {
    let stat_cov = hist.stat_error_matrix();
    let unfold_cov = hist.sys_error_matrix(&unfolding_cov_name(&var.key));
    let sys_cov = hist.total_error_matrix(false);

    let n_bins = hist.n_bins();
    let kept: Vec<usize> = (1..=n_bins).filter(|&b| var.keeps_bin(b)).collect();

    let bin_labels = kept
        .iter()
        .map(|&b| {
            let low = hist.bin_edges[b - 1] / units_corr;
            let high = hist.bin_edges[b] / units_corr;
            var.edge_label(low, high)
        })
        .collect();

    let mut stat = Vec::with_capacity(kept.len());
    let mut sys = Vec::with_capacity(kept.len());
    for &bx in &kept {
        let mut stat_row = Vec::with_capacity(kept.len());
        let mut sys_row = Vec::with_capacity(kept.len());
        for &by in &kept {
            let (i, j) = (bx - 1, by - 1);
            let stat_val = if apply_unfolding {
                stat_cov[i][j] + unfold_cov[i][j]
            } else {
                stat_cov[i][j]
            };
            stat_row.push(stat_val);
            sys_row.push(sys_cov[i][j] - unfold_cov[i][j]);
        }
        stat.push(stat_row);
        sys.push(sys_row);
    }

    CovarianceInfo { bin_labels, stat, sys }
}
