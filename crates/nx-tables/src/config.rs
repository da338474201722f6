//! Immutable analysis configuration.
//!
//! Everything the original analysis kept as module-level tables (variable
//! descriptors, unit corrections, unfolding factors, display titles) lives
//! in one serde-loadable structure passed explicitly into extraction and
//! emission.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use nx_core::Result;
use serde::{Deserialize, Serialize};

use crate::variable::VariableSpec;

/// Unit/bin-width scale applied to cross-section histograms before
/// extraction (absolute cross-section units of 1e-42 cm^2).
pub const XSEC_UNIT_SCALE: f64 = 1e42;

/// Full configuration for one table/plot production run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Target material name used in captions and labels.
    pub target_name: String,
    /// Normalization denominator name used in captions (e.g. "nucleon").
    pub norm_type: String,
    /// Ordered variable descriptors; table order follows this order.
    pub variables: Vec<VariableSpec>,
    /// Unit-conversion scalar per variable key (default 1).
    #[serde(default)]
    pub units_corrections: BTreeMap<String, f64>,
    /// Literature unfolding factor per variable key; absent keys get no
    /// statistical-uncertainty correction.
    #[serde(default)]
    pub unfolding_factors: BTreeMap<String, f64>,
    /// Plot display title per variable key.
    #[serde(default)]
    pub variable_titles: BTreeMap<String, String>,
    /// Plot display title per warp-scenario key.
    #[serde(default)]
    pub warp_titles: BTreeMap<String, String>,
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Unit-conversion scalar for a variable (1 when unconfigured).
    pub fn units_correction(&self, key: &str) -> f64 {
        self.units_corrections.get(key).copied().unwrap_or(1.0)
    }

    /// Unfolding factor for a variable, when configured.
    pub fn unfolding_factor(&self, key: &str) -> Option<f64> {
        self.unfolding_factors.get(key).copied()
    }

    /// Plot display title for a variable (falls back to the key).
    pub fn variable_title(&self, key: &str) -> String {
        self.variable_titles.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Plot display title for a warp scenario (falls back to the key).
    pub fn warp_title(&self, key: &str) -> String {
        self.warp_titles.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    /// Built-in configuration of the charged-pion analysis.
    pub fn charged_pion() -> Self {
        let variables = vec![
            var("mixtpi", r"$T_{\pi}$", r"\MeV", 0, false),
            var("pmu", r"$p_{\mu}$", r"\GeVc", 1, false),
            var("ptmu", r"$p_{\mu,T}$", r"\GeVc", 2, true),
            var("pzmu", r"$p_{\mu,||}$", r"\GeVc", 0, false),
            var("q2", r"$Q^2$", r"\GeVsqcsq", 3, true),
            var("thetamu_deg", r"$\theta_{\mu}$", "degree", 0, false),
        ];

        let units_corrections = BTreeMap::from(
            [
                ("mixtpi", 1.0),
                ("q2", 1e6),
                ("ptmu", 1e3),
                ("pmu", 1e3),
                ("pzmu", 1e3),
                ("enu", 1e3),
                ("thetamu_deg", 1.0),
                ("wexp", 1.0),
            ]
            .map(|(k, v)| (k.to_string(), v)),
        );

        let unfolding_factors = BTreeMap::from(
            [("mixtpi", 7.8), ("q2", 6.9), ("mixthetapi_deg", 10.2), ("ptmu", 7.9)]
                .map(|(k, v)| (k.to_string(), v)),
        );

        let variable_titles = BTreeMap::from(
            [
                ("mixtpi", "T_\u{03c0}"),
                ("pzmu", "p_\u{03bc}^z"),
                ("ptmu", "p_\u{03bc}^T"),
                ("thetapi_deg", "\u{03b8}_\u{03c0}"),
                ("pmu", "p_\u{03bc}"),
                ("q2", "Q\u{00b2}"),
                ("thetamu_deg", "\u{03b8}_\u{03bc}"),
                ("wexp", "W_exp"),
                ("mixthetapi_deg", "\u{03b8}_\u{03c0}"),
                ("enu", "E_\u{03bd}"),
            ]
            .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        let warp_titles = BTreeMap::from(
            [
                ("WARP2", "Warp = Anisotropic \u{0394} decay"),
                ("WARP3", "Warp = MK"),
                ("WARP4", "Warp = +20% M_A^RES"),
                ("WARP5", "Warp = T_\u{03c0} reweight"),
                ("NOMINAL", "Closure test"),
            ]
            .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        Self {
            target_name: "scintillator".into(),
            norm_type: "nucleon".into(),
            variables,
            units_corrections,
            unfolding_factors,
            variable_titles,
            warp_titles,
        }
    }
}

fn var(key: &str, title: &str, unit: &str, edge_decimals: usize, landscape: bool) -> VariableSpec {
    VariableSpec {
        key: key.into(),
        title: title.into(),
        unit: unit.into(),
        edge_decimals,
        bin_range: None,
        landscape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_tables() {
        let cfg = AnalysisConfig::charged_pion();
        assert_eq!(cfg.variables[0].key, "mixtpi");
        assert_eq!(cfg.units_correction("q2"), 1e6);
        assert_eq!(cfg.units_correction("unknown"), 1.0);
        assert_eq!(cfg.unfolding_factor("ptmu"), Some(7.9));
        assert_eq!(cfg.unfolding_factor("pmu"), None);
        assert_eq!(cfg.warp_title("NOMINAL"), "Closure test");
        assert_eq!(cfg.variable_title("nosuch"), "nosuch");
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = AnalysisConfig::charged_pion();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        let back = AnalysisConfig::from_json_file(f.path()).unwrap();
        assert_eq!(back.variables.len(), cfg.variables.len());
        assert_eq!(back.unfolding_factor("mixtpi"), Some(7.8));
    }
}
