//! # nx-hist
//!
//! Histogram bundle reader for NuXsec.
//!
//! A bundle is a JSON file of named histogram objects exported from the
//! upstream analysis framework. Names may contain `/` separators mirroring
//! the source file's directory layout.
//!
//! ## Example
//!
//! ```no_run
//! use nx_hist::HistFile;
//!
//! let f = HistFile::open("DataXSecInputs.json").unwrap();
//! for key in f.list_keys() {
//!     println!("{} ({})", key.name, key.kind);
//! }
//! let h = f.get_histogram("cross_section_mixtpi").unwrap();
//! println!("bins: {}", h.n_bins());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod histogram;

pub use bundle::{BundleObject, HistFile, KeyInfo};
pub use histogram::{Histogram2, MeasuredHistogram, STAT_COV_NAME};
pub use nx_core::{Error, Result};
