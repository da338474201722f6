//! Bundle file parsing and top-level retrieval-by-name interface.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use nx_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::histogram::{Histogram2, MeasuredHistogram};

/// One named object stored in a histogram bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BundleObject {
    /// 1D measured histogram with covariance matrices.
    Hist1(MeasuredHistogram),
    /// 2D histogram.
    Hist2(Histogram2),
}

impl BundleObject {
    /// Object kind string for key listings.
    pub fn kind(&self) -> &'static str {
        match self {
            BundleObject::Hist1(_) => "hist1",
            BundleObject::Hist2(_) => "hist2",
        }
    }
}

#[derive(Debug, Deserialize)]
struct BundleData {
    objects: BTreeMap<String, BundleObject>,
}

/// Public info about a named object in a bundle.
#[derive(Debug, Clone)]
pub struct KeyInfo {
    /// Object name (may contain `/` separators).
    pub name: String,
    /// Object kind ("hist1" or "hist2").
    pub kind: &'static str,
}

/// A histogram bundle opened for reading.
pub struct HistFile {
    /// Path for diagnostics.
    path: PathBuf,
    objects: BTreeMap<String, BundleObject>,
}

impl HistFile {
    /// Open and parse a bundle, validating every contained object.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)?;
        let data: BundleData = serde_json::from_str(&text)?;
        for (name, obj) in &data.objects {
            match obj {
                BundleObject::Hist1(h) => h.validate(),
                BundleObject::Hist2(h) => h.validate(),
            }
            .map_err(|e| Error::Validation(format!("{}: {e}", name)))?;
        }
        Ok(Self { path, objects: data.objects })
    }

    /// Path this bundle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all named objects.
    pub fn list_keys(&self) -> Vec<KeyInfo> {
        self.objects
            .iter()
            .map(|(name, obj)| KeyInfo { name: name.clone(), kind: obj.kind() })
            .collect()
    }

    /// Retrieve a 1D measured histogram by name.
    pub fn get_histogram(&self, name: &str) -> Result<MeasuredHistogram> {
        match self.objects.get(name) {
            Some(BundleObject::Hist1(h)) => Ok(h.clone()),
            Some(BundleObject::Hist2(_)) => {
                Err(Error::Validation(format!("object '{name}' is a 2D histogram")))
            }
            None => Err(Error::NotFound(name.to_string())),
        }
    }

    /// Retrieve a 2D histogram by name.
    pub fn get_histogram2(&self, name: &str) -> Result<Histogram2> {
        match self.objects.get(name) {
            Some(BundleObject::Hist2(h)) => Ok(h.clone()),
            Some(BundleObject::Hist1(_)) => {
                Err(Error::Validation(format!("object '{name}' is a 1D histogram")))
            }
            None => Err(Error::NotFound(name.to_string())),
        }
    }
}
