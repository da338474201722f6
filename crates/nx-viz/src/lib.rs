//! # nx-viz
//!
//! Visualization data artifacts for NuXsec.
//!
//! This crate is intentionally dependency-light and focuses on serializable
//! plot-friendly structures (arrays instead of nested objects).

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Warping-study artifacts (chi2 vs unfolding iteration).
pub mod warping;

pub use warping::{Chi2Map, WarpingArtifact};
