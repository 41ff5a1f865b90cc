//! Enhance Studio engine
//!
//! Grayscale image enhancement for visual inspection, with Python bindings
//! via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are single-channel 8-bit arrays of shape `(height, width)`, wrapped
//! in [`IntensityArray`]. Every operation returns a new array.
//!
//! ## Techniques
//! - **Identity**: value copy of the input
//! - **Histogram equalization**: global CDF remapping
//! - **Gamma correction**: `(i / 255) ^ (1 / gamma) * 255` through a cached LUT
//!
//! ## Histograms
//! 256-bin distributions, computed exactly up to a pixel budget
//! (250,000 by default) and over a uniform sample beyond it.

pub mod cache;
pub mod config;
pub mod debounce;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod filters;
pub mod histogram;
pub mod image;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cache::{LutCache, LutKey};
pub use config::EngineConfig;
pub use debounce::Debouncer;
pub use display::{fit_within, Placement};
pub use engine::{enhance, EnhanceParams, Technique};
pub use error::{EnhanceError, Result};
pub use export::ExportNames;
pub use filters::gamma::Gamma;
pub use filters::lut::Lut;
pub use histogram::{Histogram, DEFAULT_PIXEL_LIMIT};
pub use image::{ImageSource, IntensityArray};
pub use session::Session;

/// Process-wide LUT cache used by the language bindings.
#[cfg(any(feature = "python", feature = "wasm"))]
pub(crate) fn shared_cache() -> &'static LutCache {
    static CACHE: std::sync::OnceLock<LutCache> = std::sync::OnceLock::new();
    CACHE.get_or_init(LutCache::new)
}

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::prelude::*;

    use crate::display::fit_within;
    use crate::engine::{enhance as enhance_impl, EnhanceParams, Technique};
    use crate::export::ExportNames;
    use crate::histogram::{Histogram, DEFAULT_PIXEL_LIMIT};
    use crate::image::IntensityArray;
    use crate::shared_cache;

    fn parse_request(technique: &str, gamma: Option<f32>) -> PyResult<(Technique, EnhanceParams)> {
        let technique: Technique = technique.parse()?;
        let params = EnhanceParams { gamma };
        params.validate_for(technique)?;
        Ok((technique, params))
    }

    // ========================================================================
    // Enhancement
    // ========================================================================

    /// Enhance a 2D grayscale u8 image.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width)
    /// * `technique` - "none", "hist_eq" or "gamma"
    /// * `gamma` - Gamma value (0.1-5.0), required for "gamma"
    ///
    /// # Returns
    /// New enhanced image of the same shape
    #[pyfunction]
    #[pyo3(signature = (image, technique, gamma=None))]
    pub fn enhance<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        technique: &str,
        gamma: Option<f32>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let (technique, params) = parse_request(technique, gamma)?;
        let input = IntensityArray::from_view(image.as_array())?;
        let result = py.allow_threads(|| enhance_impl(&input, technique, &params, shared_cache()))?;
        Ok(result.into_inner().into_pyarray(py))
    }

    /// Compute the 256-bin histogram of a 2D grayscale u8 image.
    ///
    /// Images above `pixel_limit` pixels are sampled without replacement.
    ///
    /// # Returns
    /// Tuple of (counts, sampled)
    #[pyfunction]
    #[pyo3(signature = (image, pixel_limit=DEFAULT_PIXEL_LIMIT))]
    pub fn histogram<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        pixel_limit: usize,
    ) -> PyResult<(Vec<u64>, bool)> {
        let input = IntensityArray::from_view(image.as_array())?;
        let hist = py.allow_threads(|| Histogram::compute(&input, pixel_limit));
        Ok((hist.counts().to_vec(), hist.sampled()))
    }

    /// Aspect-preserving fit of an image into a viewport.
    ///
    /// # Returns
    /// (width, height, offset_x, offset_y), or None if nothing should render
    #[pyfunction]
    pub fn fit_to_viewport(
        width: usize,
        height: usize,
        viewport_width: usize,
        viewport_height: usize,
    ) -> Option<(usize, usize, usize, usize)> {
        fit_within((width, height), (viewport_width, viewport_height))
            .map(|p| (p.width, p.height, p.offset_x, p.offset_y))
    }

    /// Output file names (image, histogram) for an enhanced image.
    ///
    /// Returns None for "none", which is never exported.
    #[pyfunction]
    #[pyo3(signature = (source, technique, gamma=None))]
    pub fn export_names(
        source: &str,
        technique: &str,
        gamma: Option<f32>,
    ) -> PyResult<Option<(String, String)>> {
        let (technique, params) = parse_request(technique, gamma)?;
        let gamma = params.gamma_for(technique)?;
        Ok(ExportNames::new(source, technique, gamma).map(|n| (n.image, n.histogram)))
    }

    /// Drop all cached gamma tables (call when a new image is loaded).
    #[pyfunction]
    pub fn clear_lut_cache() {
        shared_cache().clear();
    }

    /// Enhance Studio extension module
    #[pymodule]
    pub fn enhance_studio(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(enhance, m)?)?;
        m.add_function(wrap_pyfunction!(histogram, m)?)?;
        m.add_function(wrap_pyfunction!(fit_to_viewport, m)?)?;
        m.add_function(wrap_pyfunction!(export_names, m)?)?;
        m.add_function(wrap_pyfunction!(clear_lut_cache, m)?)?;
        m.add("DEFAULT_PIXEL_LIMIT", DEFAULT_PIXEL_LIMIT)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::enhance_studio;
