//! Warping-study plot artifacts.
//!
//! A warping study unfolds a deliberately perturbed model many times and
//! tracks the chi2 between unfolded and true distributions per iteration.
//! The artifact carries everything the renderer overlays on one canvas:
//! the per-universe chi2 distribution map, the average / truncated-average /
//! median chi2 curves, and the ndf reference value.

use nx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// 2D chi2 distribution: iteration on x, chi2 value on y, universe counts
/// as cell contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chi2Map {
    /// Iteration bin edges (length = n_x + 1).
    pub x_edges: Vec<f64>,
    /// Chi2 bin edges (length = n_y + 1).
    pub y_edges: Vec<f64>,
    /// Universe counts as `counts[iy][ix]`.
    pub counts: Vec<Vec<f64>>,
}

impl Chi2Map {
    /// Validate edge/content length agreement.
    pub fn validate(&self) -> Result<()> {
        let nx = self.x_edges.len().saturating_sub(1);
        let ny = self.y_edges.len().saturating_sub(1);
        if nx == 0 || ny == 0 {
            return Err(Error::Validation("chi2 map edges must define at least 1 bin".into()));
        }
        if self.counts.len() != ny || self.counts.iter().any(|row| row.len() != nx) {
            return Err(Error::Validation(format!(
                "chi2 map counts are not {ny}x{nx}"
            )));
        }
        Ok(())
    }

    /// Largest cell count (0 for an empty map).
    pub fn max_count(&self) -> f64 {
        self.counts.iter().flatten().copied().fold(0.0, f64::max)
    }
}

/// Plot-friendly artifact for one warping scenario of one variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpingArtifact {
    /// Variable key (e.g. "mixtpi").
    pub variable: String,
    /// Variable display title (e.g. "T_π").
    pub variable_title: String,
    /// Warp scenario key (e.g. "NOMINAL").
    pub warp: String,
    /// Warp display title (e.g. "Closure test").
    pub warp_title: String,
    /// Iteration bin edges (length = n_iterations + 1).
    pub iteration_edges: Vec<f64>,
    /// Average chi2 per iteration bin.
    pub avg_chi2: Vec<f64>,
    /// Truncated-average chi2 per iteration bin.
    pub truncated_chi2: Vec<f64>,
    /// Median chi2 per iteration bin.
    pub median_chi2: Vec<f64>,
    /// Number of degrees of freedom (reference line).
    pub ndf: f64,
    /// Per-universe chi2 distribution map, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chi2_map: Option<Chi2Map>,
}

impl WarpingArtifact {
    /// Build an artifact, validating curve lengths against the iteration
    /// binning and the optional map.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        variable: &str,
        variable_title: &str,
        warp: &str,
        warp_title: &str,
        iteration_edges: Vec<f64>,
        avg_chi2: Vec<f64>,
        truncated_chi2: Vec<f64>,
        median_chi2: Vec<f64>,
        ndf: f64,
        chi2_map: Option<Chi2Map>,
    ) -> Result<Self> {
        let n_iter = iteration_edges.len().saturating_sub(1);
        if n_iter == 0 {
            return Err(Error::Validation("iteration edges must define at least 1 bin".into()));
        }
        for (name, curve) in [
            ("avg_chi2", &avg_chi2),
            ("truncated_chi2", &truncated_chi2),
            ("median_chi2", &median_chi2),
        ] {
            if curve.len() != n_iter {
                return Err(Error::Validation(format!(
                    "{name} length {} != {n_iter} iteration bins",
                    curve.len()
                )));
            }
        }
        if !(ndf.is_finite() && ndf > 0.0) {
            return Err(Error::Validation(format!("ndf must be positive, got {ndf}")));
        }
        if let Some(map) = &chi2_map {
            map.validate()?;
        }

        Ok(Self {
            variable: variable.to_string(),
            variable_title: variable_title.to_string(),
            warp: warp.to_string(),
            warp_title: warp_title.to_string(),
            iteration_edges,
            avg_chi2,
            truncated_chi2,
            median_chi2,
            ndf,
            chi2_map,
        })
    }

    /// Plot title combining variable and warp display titles.
    pub fn title(&self) -> String {
        format!("{} {}", self.variable_title, self.warp_title)
    }
}
