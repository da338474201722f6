//! Warping-study artifact assembly from a histogram bundle.

use nx_core::{Error, Result};
use nx_hist::HistFile;
use nx_tables::AnalysisConfig;
use nx_viz::{Chi2Map, WarpingArtifact};

const CHI2_MAP: &str = "Chi2_Iteration_Dists/h_chi2_modelData_trueData_iter_chi2";
const AVG_CHI2: &str = "Chi2_Iteration_Dists/m_avg_chi2_modelData_trueData_iter_chi2";
const TRUNCATED_CHI2: &str =
    "Chi2_Iteration_Dists/m_avg_chi2_modelData_trueData_iter_chi2_truncated";
const MEDIAN_CHI2: &str = "Chi2_Iteration_Dists/h_median_chi2_modelData_trueData_iter_chi2";
const MC_TRUTH: &str = "Input_Hists/h_mc_truth";

/// Assemble the plot artifact for one warping scenario.
///
/// The ndf reference comes from the truth histogram's total bin count. A
/// bundle without the 2-D chi2 map still renders (curves only).
pub fn build_artifact(
    file: &HistFile,
    cfg: &AnalysisConfig,
    variable: &str,
    warp: &str,
) -> Result<WarpingArtifact> {
    let avg = file.get_histogram(AVG_CHI2)?;
    let truncated = file.get_histogram(TRUNCATED_CHI2)?;
    let median = file.get_histogram(MEDIAN_CHI2)?;

    let truth = file.get_histogram2(MC_TRUTH)?;
    let ndf = (truth.n_bins_x() * truth.n_bins_y()) as f64;

    let chi2_map = match file.get_histogram2(CHI2_MAP) {
        Ok(h) => Some(Chi2Map { x_edges: h.x_edges, y_edges: h.y_edges, counts: h.contents }),
        Err(Error::NotFound(name)) => {
            tracing::warn!(%name, "chi2 distribution map missing, rendering curves only");
            None
        }
        Err(e) => return Err(e),
    };

    WarpingArtifact::new(
        variable,
        &cfg.variable_title(variable),
        warp,
        &cfg.warp_title(warp),
        avg.bin_edges,
        avg.bin_content,
        truncated.bin_content,
        median.bin_content,
        ndf,
        chi2_map,
    )
}

/// Output file name for one rendered scenario.
pub fn output_file_name(plist: &str, date: &str, variable: &str, warp: &str, ext: &str) -> String {
    format!("Warping_{plist}_{date}_{variable}_{warp}.{ext}")
}
