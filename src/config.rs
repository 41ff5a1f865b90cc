//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::histogram::DEFAULT_PIXEL_LIMIT;

/// Default quiescence window before a parameter change is applied.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Default directory exports are placed in.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Tunables shared by a [`Session`](crate::session::Session) and its host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Images with more pixels than this get a sampled histogram.
    pub histogram_pixel_limit: usize,
    /// Quiescence window for coalescing parameter changes.
    pub debounce_window: Duration,
    /// Directory export file names are joined onto.
    pub output_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            histogram_pixel_limit: DEFAULT_PIXEL_LIMIT,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl EngineConfig {
    pub fn with_histogram_pixel_limit(mut self, limit: usize) -> Self {
        self.histogram_pixel_limit = limit;
        self
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
