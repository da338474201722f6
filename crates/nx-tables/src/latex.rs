//! LaTeX covariance-table emission.
//!
//! Tables are appended line-by-line to a caller-owned buffer and later glued
//! between a fixed document preamble and suffix, so the output compiles
//! standalone.

use crate::extract::CovarianceInfo;
use crate::variable::VariableSpec;

/// Fixed document preamble.
pub const LATEX_PREFIX: &[&str] = &[
    r"\documentclass[11pt]{article}",
    r"\usepackage{graphicx}",
    r"\usepackage{adjustbox}",
    r"\usepackage{lscape}",
    r"\usepackage{amsmath}",
    r"\usepackage{xspace}",
    r"\begin{document}",
    r"\setlength\tabcolsep{0.5em}",
    r"\include{xsec_preamble}",
];

/// Fixed document suffix.
pub const LATEX_SUFFIX: &[&str] = &[r"\end{document}"];

/// Which extracted matrix a table renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CovKind {
    /// Statistical covariance.
    Statistical,
    /// Systematic covariance.
    Systematic,
}

/// Format one matrix cell at three decimals, stripping the sign from values
/// whose rounded representation is exactly zero ("-0.000" renders "0.000").
pub fn format_cell(value: f64) -> String {
    let formatted = format!("{value:.3}");
    if formatted.starts_with("-0.") && formatted.parse::<f64>().map(|v| v == 0.0).unwrap_or(false) {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Append one covariance table to `lines`.
///
/// Emits the fixed skeleton: optional landscape wrapper, caption,
/// adjustbox, tabular with one `c` column per bin after the `c||` label
/// column, header row of edge labels, then one body row per bin. The last
/// body row carries no `\\` terminator.
pub fn write_covariance_table(
    lines: &mut Vec<String>,
    caption: &str,
    label: &str,
    info: &CovarianceInfo,
    var: &VariableSpec,
    kind: CovKind,
) {
    if var.landscape {
        lines.push(r"\pagebreak".to_string());
        lines.push(r"\begin{landscape}".to_string());
    }

    lines.push(r"\begin{table}".to_string());
    lines.push(r"  \centering".to_string());
    lines.push(r"  \renewcommand{\arraystretch}{1.15}".to_string());
    lines.push(format!(r"  \caption{{{caption}}}"));

    if var.landscape {
        lines.push(r"  \begin{adjustbox}{max width=1.3\textheight}".to_string());
    } else {
        lines.push(r"  \begin{adjustbox}{max width=\textwidth}".to_string());
    }

    let mut colformat = String::from("c||");
    let mut header = vec![format!("Bin edges ({})", var.unit)];
    for bin_label in &info.bin_labels {
        colformat.push('c');
        header.push(bin_label.clone());
    }

    lines.push(format!(r"    \begin{{tabular}}{{{colformat}}}"));
    lines.push(format!(r"      {}\\", header.join(" & ")));
    lines.push(r"      \hline".to_string());
    lines.push(r"      \hline".to_string());

    let matrix = match kind {
        CovKind::Statistical => &info.stat,
        CovKind::Systematic => &info.sys,
    };

    for (i, row) in matrix.iter().enumerate() {
        let mut line = info.bin_labels[i].clone();
        for &element in row {
            line.push_str(" & ");
            line.push_str(&format_cell(element));
        }
        if i != matrix.len() - 1 {
            lines.push(format!(r"      {line}\\"));
        } else {
            lines.push(format!("      {line}"));
        }
    }

    lines.push(r"    \end{tabular}".to_string());
    lines.push(r"  \end{adjustbox}".to_string());
    lines.push(format!(r"  \label{{{label}}}"));
    lines.push(r"\end{table}".to_string());

    if var.landscape {
        lines.push(r"\end{landscape}".to_string());
        lines.push(r"\clearpage".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_2x2() -> CovarianceInfo {
        CovarianceInfo {
            bin_labels: vec!["0.0-35.0".into(), "35.0-100.0".into()],
            stat: vec![vec![1.0, 2.0], vec![2.0, 3.0]],
            sys: vec![vec![0.5, -0.0004], vec![-0.0004, 0.5]],
        }
    }

    fn var(landscape: bool) -> VariableSpec {
        VariableSpec {
            key: "mixtpi".into(),
            title: r"$T_{\pi}$".into(),
            unit: r"\MeV".into(),
            edge_decimals: 1,
            bin_range: None,
            landscape,
        }
    }

    #[test]
    fn negative_zero_sign_stripped() {
        assert_eq!(format_cell(-0.0004), "0.000");
        assert_eq!(format_cell(-0.0006), "-0.001");
        assert_eq!(format_cell(0.0004), "0.000");
        assert_eq!(format_cell(-1.2341), "-1.234");
    }

    #[test]
    fn column_spec_one_c_per_data_column() {
        let mut lines = Vec::new();
        write_covariance_table(
            &mut lines,
            "caption",
            "tbl:x",
            &info_2x2(),
            &var(false),
            CovKind::Statistical,
        );
        let tabular = lines.iter().find(|l| l.contains(r"\begin{tabular}")).unwrap();
        assert!(tabular.contains("{c||cc}"));
    }

    #[test]
    fn body_rows_and_last_row_terminator() {
        let mut lines = Vec::new();
        write_covariance_table(
            &mut lines,
            "caption",
            "tbl:x",
            &info_2x2(),
            &var(false),
            CovKind::Statistical,
        );
        let body: Vec<&String> =
            lines.iter().filter(|l| l.starts_with("      0.0-") || l.starts_with("      35.0-")).collect();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].matches(" & ").count(), 2);
        assert!(body[0].ends_with(r"\\"));
        assert!(!body[1].ends_with(r"\\"));
        assert_eq!(*body[1], "      35.0-100.0 & 2.000 & 3.000");
    }

    #[test]
    fn systematic_selector_renders_sys_matrix() {
        let mut lines = Vec::new();
        write_covariance_table(
            &mut lines,
            "caption",
            "tbl:x",
            &info_2x2(),
            &var(false),
            CovKind::Systematic,
        );
        // -0.0004 rounds to -0.000 and must lose the sign.
        assert!(lines.iter().any(|l| l.contains("0.500 & 0.000")));
    }

    #[test]
    fn landscape_wrapping() {
        let mut lines = Vec::new();
        write_covariance_table(
            &mut lines,
            "caption",
            "tbl:x",
            &info_2x2(),
            &var(true),
            CovKind::Statistical,
        );
        assert_eq!(lines[0], r"\pagebreak");
        assert_eq!(lines[1], r"\begin{landscape}");
        assert!(lines.iter().any(|l| l.contains(r"max width=1.3\textheight")));
        assert_eq!(lines[lines.len() - 2], r"\end{landscape}");
        assert_eq!(lines[lines.len() - 1], r"\clearpage");
    }

    #[test]
    fn header_row_has_unit_and_labels() {
        let mut lines = Vec::new();
        write_covariance_table(
            &mut lines,
            "caption",
            "tbl:x",
            &info_2x2(),
            &var(false),
            CovKind::Statistical,
        );
        let header = lines.iter().find(|l| l.contains("Bin edges")).unwrap();
        assert_eq!(header, &r"      Bin edges (\MeV) & 0.0-35.0 & 35.0-100.0\\");
    }
}
