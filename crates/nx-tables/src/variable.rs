//! Variable descriptors: static presentation configuration per observable.

use serde::{Deserialize, Serialize};

/// Contiguous inclusive restriction on 1-based bin indices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BinRange {
    /// First bin kept (1-based).
    pub first: usize,
    /// Last bin kept (1-based); `None` means no upper limit.
    pub last: Option<usize>,
}

impl BinRange {
    /// Whether a 1-based bin index falls inside the range.
    pub fn contains(&self, bin: usize) -> bool {
        bin >= self.first && self.last.is_none_or(|last| bin <= last)
    }
}

/// Presentation descriptor for one measured variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Variable key used in object names (e.g. "mixtpi").
    pub key: String,
    /// LaTeX display title (e.g. `$T_{\pi}$`).
    pub title: String,
    /// LaTeX unit macro or text (e.g. `\MeV`).
    pub unit: String,
    /// Decimal places for bin-edge labels.
    pub edge_decimals: usize,
    /// Optional bin-index restriction.
    #[serde(default)]
    pub bin_range: Option<BinRange>,
    /// Emit the tables inside a landscape environment.
    #[serde(default)]
    pub landscape: bool,
}

impl VariableSpec {
    /// Whether a 1-based bin index survives the restriction (all bins do
    /// when no restriction is configured).
    pub fn keeps_bin(&self, bin: usize) -> bool {
        self.bin_range.is_none_or(|r| r.contains(bin))
    }

    /// Format one bin-edge label from already unit-converted edges.
    pub fn edge_label(&self, low: f64, high: f64) -> String {
        format!("{:.p$}-{:.p$}", low, high, p = self.edge_decimals)
    }
}
