//! Per-image enhancement state.
//!
//! A [`Session`] owns the `original` array for the currently loaded image, the
//! `processed` array derived from it, and the LUT cache whose lifetime is tied
//! to that image. Loading a new image replaces `original`, clears the cache and
//! resets the technique to [`Technique::Identity`]. Every enhancement replaces
//! `processed` wholesale; nothing is mutated in place.

use std::path::Path;
use std::sync::Arc;

use crate::cache::LutCache;
use crate::config::EngineConfig;
use crate::engine::{enhance, EnhanceParams, Technique};
use crate::error::{EnhanceError, Result};
use crate::export::ExportNames;
use crate::histogram::Histogram;
use crate::image::{ImageSource, IntensityArray};

struct Loaded {
    name: String,
    original: Arc<IntensityArray>,
    processed: Arc<IntensityArray>,
}

/// Current image, its enhancement and the LUT cache.
pub struct Session {
    config: EngineConfig,
    cache: Arc<LutCache>,
    loaded: Option<Loaded>,
    technique: Technique,
    params: EnhanceParams,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: Arc::new(LutCache::new()),
            loaded: None,
            technique: Technique::Identity,
            params: EnhanceParams::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared handle to the cache, for running enhancements off-thread.
    pub fn cache(&self) -> Arc<LutCache> {
        Arc::clone(&self.cache)
    }

    /// Replace the current image with `image`, known to the user as `name`.
    pub fn load(&mut self, name: impl Into<String>, image: IntensityArray) {
        let name = name.into();
        tracing::info!(
            %name,
            width = image.width(),
            height = image.height(),
            "Loaded image"
        );
        self.cache.clear();
        let original = Arc::new(image);
        self.loaded = Some(Loaded {
            name,
            processed: Arc::new(original.as_ref().clone()),
            original,
        });
        self.technique = Technique::Identity;
        self.params = EnhanceParams::default();
    }

    /// Decode `path` through `source` and load it.
    ///
    /// On failure the previously loaded image, if any, is kept.
    pub fn load_from<S: ImageSource + ?Sized>(&mut self, source: &S, path: &Path) -> Result<()> {
        let image = source.load(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load(name, image);
        Ok(())
    }

    /// Re-run the enhancement with a new technique and parameters.
    ///
    /// Invalid parameters leave the current `processed` array untouched.
    pub fn apply(&mut self, technique: Technique, params: EnhanceParams) -> Result<Arc<IntensityArray>> {
        let loaded = self.loaded.as_mut().ok_or(EnhanceError::EmptyImage)?;
        let processed = Arc::new(enhance(&loaded.original, technique, &params, &self.cache)?);
        tracing::debug!(%technique, gamma = ?params.gamma, "Enhancement applied");
        loaded.processed = Arc::clone(&processed);
        self.technique = technique;
        self.params = params;
        Ok(processed)
    }

    /// Go back to showing the original.
    pub fn reset(&mut self) -> Result<Arc<IntensityArray>> {
        self.apply(Technique::Identity, EnhanceParams::default())
    }

    pub fn technique(&self) -> Technique {
        self.technique
    }

    pub fn params(&self) -> EnhanceParams {
        self.params
    }

    pub fn name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.name.as_str())
    }

    pub fn original(&self) -> Option<Arc<IntensityArray>> {
        self.loaded.as_ref().map(|l| Arc::clone(&l.original))
    }

    pub fn processed(&self) -> Option<Arc<IntensityArray>> {
        self.loaded.as_ref().map(|l| Arc::clone(&l.processed))
    }

    pub fn original_histogram(&self) -> Result<Histogram> {
        let loaded = self.loaded.as_ref().ok_or(EnhanceError::EmptyImage)?;
        Ok(Histogram::compute(&loaded.original, self.config.histogram_pixel_limit))
    }

    pub fn processed_histogram(&self) -> Result<Histogram> {
        let loaded = self.loaded.as_ref().ok_or(EnhanceError::EmptyImage)?;
        Ok(Histogram::compute(&loaded.processed, self.config.histogram_pixel_limit))
    }

    /// Export file names for the current result.
    ///
    /// `None` when nothing is loaded or no enhancement is active.
    pub fn export_names(&self) -> Option<ExportNames> {
        let loaded = self.loaded.as_ref()?;
        let gamma = self.params.gamma_for(self.technique).ok().flatten();
        ExportNames::new(&loaded.name, self.technique, gamma)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
