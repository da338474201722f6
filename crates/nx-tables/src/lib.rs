//! # nx-tables
//!
//! Covariance-matrix extraction and LaTeX table emission for the
//! cross-section measurement: per-variable statistical and systematic
//! covariance tables assembled into one compilable document.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod extract;
pub mod latex;
pub mod report;
pub mod variable;

pub use config::AnalysisConfig;
pub use extract::{extract_covariance, CovarianceInfo};
pub use latex::{write_covariance_table, CovKind, LATEX_PREFIX, LATEX_SUFFIX};
pub use report::covariance_tables_document;
pub use variable::{BinRange, VariableSpec};
