//! WebAssembly exports for the enhancement engine.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat row-major grayscale byte buffers
//! (length = width * height).

use wasm_bindgen::prelude::*;

use crate::display::fit_within;
use crate::engine::{enhance, EnhanceParams, Technique};
use crate::histogram::Histogram;
use crate::image::IntensityArray;
use crate::shared_cache;

// ============================================================================
// Enhancement
// ============================================================================

/// Enhance a grayscale image.
///
/// # Arguments
/// * `data` - Flat array of grayscale bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `technique` - "none", "hist_eq" or "gamma"
/// * `gamma` - Gamma value (0.1-5.0), required for "gamma"
///
/// # Returns
/// Flat array of enhanced grayscale bytes
#[wasm_bindgen]
pub fn enhance_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    technique: &str,
    gamma: Option<f32>,
) -> Result<Vec<u8>, JsValue> {
    let technique: Technique = technique.parse()?;
    let params = EnhanceParams { gamma };
    params.validate_for(technique)?;

    let input = IntensityArray::from_raw(width, height, data.to_vec())?;
    let result = enhance(&input, technique, &params, shared_cache())?;
    Ok(result.to_vec())
}

/// Drop all cached gamma tables.
#[wasm_bindgen]
pub fn clear_lut_cache_wasm() {
    shared_cache().clear();
}

// ============================================================================
// Histogram
// ============================================================================

/// Compute the 256-bin histogram of a grayscale image.
///
/// # Returns
/// 257 values: the 256 bin counts followed by 1 if the counts were sampled,
/// 0 otherwise
#[wasm_bindgen]
pub fn histogram_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    pixel_limit: usize,
) -> Result<Vec<u32>, JsValue> {
    let input = IntensityArray::from_raw(width, height, data.to_vec())?;
    let hist = Histogram::compute(&input, pixel_limit);

    let mut out: Vec<u32> = hist.counts().iter().map(|&c| c as u32).collect();
    out.push(u32::from(hist.sampled()));
    Ok(out)
}

// ============================================================================
// Display
// ============================================================================

/// Aspect-preserving fit into a viewport.
///
/// # Returns
/// [width, height, offset_x, offset_y], or an empty array if nothing should
/// render
#[wasm_bindgen]
pub fn fit_to_viewport_wasm(
    width: usize,
    height: usize,
    viewport_width: usize,
    viewport_height: usize,
) -> Vec<u32> {
    fit_within((width, height), (viewport_width, viewport_height))
        .map(|p| {
            [p.width, p.height, p.offset_x, p.offset_y]
                .iter()
                .map(|&v| v as u32)
                .collect()
        })
        .unwrap_or_default()
}
