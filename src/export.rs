//! File names for persisted enhancement results.
//!
//! The export adapter writes two PNGs per result: the enhanced image and its
//! histogram chart. Names follow `{stem}_{technique}[_{gamma}].png` and
//! `{stem}_{technique}[_{gamma}]_hist.png`, with gamma printed to two decimals.
//! Creating the directory and encoding the files is left to the adapter.

use std::path::{Path, PathBuf};

use crate::engine::Technique;
use crate::filters::gamma::Gamma;

/// Output names for one enhancement result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNames {
    pub image: String,
    pub histogram: String,
}

impl ExportNames {
    /// Names for `source` (a file name or path) enhanced with `technique`.
    ///
    /// Returns `None` for [`Technique::Identity`]: an unenhanced image is
    /// not exported.
    pub fn new(source: &str, technique: Technique, gamma: Option<Gamma>) -> Option<Self> {
        if technique == Technique::Identity {
            return None;
        }
        let stem = Path::new(source)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string());

        let suffix = match (technique, gamma) {
            (Technique::GammaCorrection, Some(gamma)) => format!("{}_{}", technique.name(), gamma),
            _ => technique.name().to_string(),
        };

        Some(Self {
            image: format!("{stem}_{suffix}.png"),
            histogram: format!("{stem}_{suffix}_hist.png"),
        })
    }

    /// Both names joined onto `dir`, image first.
    pub fn paths_in(&self, dir: &Path) -> (PathBuf, PathBuf) {
        (dir.join(&self.image), dir.join(&self.histogram))
    }
}
