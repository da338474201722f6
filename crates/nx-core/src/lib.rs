//! # nx-core
//!
//! Shared error type and crate-wide constants for NuXsec.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Error, Result};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
