//! Top-level document assembly: one statistical and one systematic table per
//! configured variable, glued into a complete LaTeX document.

use nx_core::Result;
use nx_hist::HistFile;

use crate::config::{AnalysisConfig, XSEC_UNIT_SCALE};
use crate::extract::{extract_covariance, unfolding_cov_name};
use crate::latex::{write_covariance_table, CovKind, LATEX_PREFIX, LATEX_SUFFIX};
use crate::variable::VariableSpec;

/// Produce the full `CovarianceTables.tex` document text.
///
/// Variables whose cross-section histogram is absent from the bundle are
/// skipped with a warning; the bundle itself failing to open is the caller's
/// abort condition.
pub fn covariance_tables_document(file: &HistFile, cfg: &AnalysisConfig) -> Result<String> {
    let mut tables: Vec<String> = Vec::new();

    for var in &cfg.variables {
        tracing::info!(variable = %var.key, "processing variable");

        let hist_name = format!("cross_section_{}", var.key);
        let h_xsec = match file.get_histogram(&hist_name) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(variable = %var.key, %e, "cannot find cross-section histogram");
                continue;
            }
        };

        let mut xsec = h_xsec.clone_named(format!("xsec_{}_scaled", var.key));

        let apply_unfolding = match cfg.unfolding_factor(&var.key) {
            Some(factor) => {
                xsec.modify_statistical_unc(factor, &unfolding_cov_name(&var.key));
                true
            }
            None => false,
        };

        let units_corr = cfg.units_correction(&var.key);
        xsec.scale_by_width(XSEC_UNIT_SCALE * units_corr);

        let cov_info = extract_covariance(&xsec, var, units_corr, apply_unfolding);

        write_covariance_table(
            &mut tables,
            &caption(cfg, var, CovKind::Statistical),
            &format!("tbl:statcov_{}_{}", var.key, cfg.target_name),
            &cov_info,
            var,
            CovKind::Statistical,
        );
        tables.push(String::new());

        write_covariance_table(
            &mut tables,
            &caption(cfg, var, CovKind::Systematic),
            &format!("tbl:syscov_{}_{}", var.key, cfg.target_name),
            &cov_info,
            var,
            CovKind::Systematic,
        );
        tables.push(String::new());
    }

    let mut out = String::new();
    for line in LATEX_PREFIX.iter().copied().map(str::to_string).chain(tables).chain(
        LATEX_SUFFIX.iter().copied().map(str::to_string),
    ) {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn caption(cfg: &AnalysisConfig, var: &VariableSpec, kind: CovKind) -> String {
    let kind_name = match kind {
        CovKind::Statistical => "Statistical",
        CovKind::Systematic => "Systematic",
    };
    format!(
        "{kind_name} covariance matrix of measured cross section as function of {var}, \
         in units of $10^{{-84}}$ $(\\cmsq/{unit}/\\mathrm{{{norm}}})^2$",
        var = var.title,
        unit = var.unit,
        norm = cfg.norm_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn bundle_json() -> String {
        // Two-bin mixtpi cross section with a flux systematic; no histogram
        // for any other configured variable.
        r#"{
            "objects": {
                "cross_section_mixtpi": {
                    "type": "hist1",
                    "name": "cross_section_mixtpi",
                    "title": "",
                    "bin_edges": [0.0, 35.0, 100.0],
                    "bin_content": [1.0e-42, 2.0e-42],
                    "stat_variance": [1.0e-84, 3.0e-84],
                    "covariances": {
                        "flux_cov": [[1.0e-84, 2.0e-84], [2.0e-84, 3.0e-84]]
                    }
                }
            }
        }"#
        .to_string()
    }

    fn open_bundle(text: &str) -> HistFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        HistFile::open(f.path()).unwrap()
    }

    #[test]
    fn document_has_preamble_and_suffix() {
        let file = open_bundle(&bundle_json());
        let cfg = AnalysisConfig::charged_pion();
        let doc = covariance_tables_document(&file, &cfg).unwrap();
        assert!(doc.starts_with(r"\documentclass[11pt]{article}"));
        assert!(doc.trim_end().ends_with(r"\end{document}"));
    }

    #[test]
    fn absent_variables_are_skipped() {
        let file = open_bundle(&bundle_json());
        let cfg = AnalysisConfig::charged_pion();
        let doc = covariance_tables_document(&file, &cfg).unwrap();
        // Only mixtpi is in the bundle: one stat + one sys table.
        assert_eq!(doc.matches(r"\begin{table}").count(), 2);
        assert!(doc.contains("tbl:statcov_mixtpi_scintillator"));
        assert!(doc.contains("tbl:syscov_mixtpi_scintillator"));
        assert!(!doc.contains("tbl:statcov_pmu"));
    }

    #[test]
    fn end_to_end_table_shape() {
        let file = open_bundle(&bundle_json());
        let mut cfg = AnalysisConfig::charged_pion();
        cfg.variables.retain(|v| v.key == "mixtpi");
        // Strip the unfolding correction so the stat matrix is the raw one.
        cfg.unfolding_factors.clear();
        let doc = covariance_tables_document(&file, &cfg).unwrap();

        assert!(doc.contains(r"\begin{tabular}{c||cc}"));
        let body_rows: Vec<&str> = doc
            .lines()
            .filter(|l| l.trim_start().starts_with("0-35") || l.trim_start().starts_with("35-100"))
            .collect();
        // Header label column plus two data cells on each of the two rows
        // of each table (stat and sys).
        for row in &body_rows {
            assert_eq!(row.matches(" & ").count(), 2);
        }
        // Last body row of each tabular has no terminator.
        assert!(body_rows.iter().any(|r| !r.ends_with(r"\\")));
    }

    #[test]
    fn unfolding_factor_inflates_stat_table() {
        let file = open_bundle(&bundle_json());
        let mut cfg = AnalysisConfig::charged_pion();
        cfg.variables.retain(|v| v.key == "mixtpi");

        let with = covariance_tables_document(&file, &cfg).unwrap();
        cfg.unfolding_factors.clear();
        let without = covariance_tables_document(&file, &cfg).unwrap();
        assert_ne!(with, without);
    }
}
