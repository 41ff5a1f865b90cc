//! Enhancement entry point.
//!
//! [`enhance`] maps an input [`IntensityArray`] to a brand-new output array
//! under one [`Technique`]. The only side effect is populating the
//! [`LutCache`] when gamma correction runs.

use std::fmt;
use std::str::FromStr;

use crate::cache::{LutCache, LutKey};
use crate::error::{EnhanceError, Result};
use crate::filters::equalize::equalize;
use crate::filters::gamma::{gamma_lut, Gamma};
use crate::image::IntensityArray;

/// Which enhancement to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Technique {
    /// Value copy of the input.
    #[default]
    Identity,
    /// Global histogram equalization.
    HistogramEqualization,
    /// Power-law mapping through a cached LUT.
    GammaCorrection,
}

impl Technique {
    /// Short name used in output file names: `none`, `hist_eq` or `gamma`.
    pub fn name(self) -> &'static str {
        match self {
            Technique::Identity => "none",
            Technique::HistogramEqualization => "hist_eq",
            Technique::GammaCorrection => "gamma",
        }
    }

    pub fn requires_gamma(self) -> bool {
        matches!(self, Technique::GammaCorrection)
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Technique {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "identity" => Ok(Technique::Identity),
            "hist_eq" | "histogram_equalization" => Ok(Technique::HistogramEqualization),
            "gamma" | "gamma_correction" => Ok(Technique::GammaCorrection),
            other => Err(EnhanceError::invalid(format!(
                "unknown technique '{other}', expected one of: none, hist_eq, gamma"
            ))),
        }
    }
}

/// Parameters accompanying a [`Technique`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnhanceParams {
    /// Required for [`Technique::GammaCorrection`], ignored otherwise.
    pub gamma: Option<f32>,
}

impl EnhanceParams {
    pub fn with_gamma(gamma: f32) -> Self {
        Self { gamma: Some(gamma) }
    }

    /// Check that these parameters are usable with `technique`.
    ///
    /// Parameter surfaces call this before invoking the engine so a gamma
    /// request without a gamma value never reaches it.
    pub fn validate_for(&self, technique: Technique) -> Result<()> {
        self.gamma_for(technique).map(|_| ())
    }

    /// The validated gamma, if `technique` uses one.
    pub fn gamma_for(&self, technique: Technique) -> Result<Option<Gamma>> {
        if !technique.requires_gamma() {
            return Ok(None);
        }
        let value = self.gamma.ok_or_else(|| {
            EnhanceError::invalid("the gamma technique requires a gamma value")
        })?;
        Gamma::new(value).map(Some)
    }
}

/// Produce a new array from `image` under `technique`.
///
/// Deterministic: the same input and parameters give bit-identical output,
/// whether or not the gamma table was already cached.
pub fn enhance(
    image: &IntensityArray,
    technique: Technique,
    params: &EnhanceParams,
    cache: &LutCache,
) -> Result<IntensityArray> {
    let gamma = params.gamma_for(technique)?;
    tracing::trace!(
        %technique,
        width = image.width(),
        height = image.height(),
        "Applying enhancement"
    );

    let output = match (technique, gamma) {
        (Technique::Identity, _) => image.clone(),
        (Technique::HistogramEqualization, _) => equalize(image),
        (Technique::GammaCorrection, Some(gamma)) => {
            let lut = cache.get_or_build(LutKey::from(gamma), || gamma_lut(gamma));
            lut.apply(image)
        }
        (Technique::GammaCorrection, None) => {
            return Err(EnhanceError::invalid("the gamma technique requires a gamma value"))
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> IntensityArray {
        let samples = (0..width * height).map(|i| (i * 255 / (width * height - 1)) as u8).collect();
        IntensityArray::from_raw(width, height, samples).unwrap()
    }

    #[test]
    fn test_identity_copies_storage() {
        let img = IntensityArray::filled(8, 8, 100).unwrap();
        let cache = LutCache::new();

        let out = enhance(&img, Technique::Identity, &EnhanceParams::default(), &cache).unwrap();

        assert_eq!(out, img);
        assert_ne!(out.view().as_ptr(), img.view().as_ptr());

        let mut raw = out.into_inner();
        raw[[0, 0]] = 0;
        assert_eq!(img.get(0, 0), Some(100));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_constant_image_identity_and_histogram() {
        let img = IntensityArray::filled(8, 8, 100).unwrap();

        let out = enhance(&img, Technique::Identity, &EnhanceParams::default(), &LutCache::new()).unwrap();
        let hist = crate::histogram::Histogram::compute(&out, crate::histogram::DEFAULT_PIXEL_LIMIT);

        assert_eq!(out.dimensions(), (8, 8));
        assert!(out.view().iter().all(|&v| v == 100));
        assert_eq!(hist.count(100), 64);
        assert_eq!(hist.total(), 64);
        assert!(!hist.sampled());
    }

    #[test]
    fn test_gamma_requires_value() {
        let img = gradient(4, 4);
        let cache = LutCache::new();

        let err = enhance(&img, Technique::GammaCorrection, &EnhanceParams::default(), &cache)
            .unwrap_err();

        assert!(matches!(err, EnhanceError::InvalidParameter(_)));
        assert!(EnhanceParams::default().validate_for(Technique::GammaCorrection).is_err());
        assert!(EnhanceParams::default().validate_for(Technique::HistogramEqualization).is_ok());
    }

    #[test]
    fn test_invalid_gamma_builds_nothing() {
        let img = gradient(4, 4);
        let cache = LutCache::new();

        for bad in [0.0, -2.0, 5.5] {
            let res = enhance(&img, Technique::GammaCorrection, &EnhanceParams::with_gamma(bad), &cache);
            assert!(matches!(res, Err(EnhanceError::InvalidParameter(_))));
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_gamma_warm_matches_cold() {
        let img = gradient(16, 16);
        let params = EnhanceParams::with_gamma(2.2);

        let warm_cache = LutCache::new();
        let first = enhance(&img, Technique::GammaCorrection, &params, &warm_cache).unwrap();
        let second = enhance(&img, Technique::GammaCorrection, &params, &warm_cache).unwrap();
        let cold = enhance(&img, Technique::GammaCorrection, &params, &LutCache::new()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, cold);
        assert_eq!(warm_cache.len(), 1);
    }

    #[test]
    fn test_near_duplicate_gammas_share_entry() {
        let img = gradient(4, 4);
        let cache = LutCache::new();

        let a = enhance(&img, Technique::GammaCorrection, &EnhanceParams::with_gamma(1.501), &cache).unwrap();
        let b = enhance(&img, Technique::GammaCorrection, &EnhanceParams::with_gamma(1.499), &cache).unwrap();

        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(LutKey::Gamma(150)));
    }

    #[test]
    fn test_unit_gamma_leaves_image_unchanged() {
        let img = gradient(16, 16);
        let cache = LutCache::new();

        let out = enhance(&img, Technique::GammaCorrection, &EnhanceParams::with_gamma(1.0), &cache).unwrap();

        assert_eq!(out, img);
    }

    #[test]
    fn test_gamma_direction() {
        let img = IntensityArray::filled(2, 2, 128).unwrap();
        let cache = LutCache::new();

        let lifted = enhance(&img, Technique::GammaCorrection, &EnhanceParams::with_gamma(2.0), &cache).unwrap();
        let lowered = enhance(&img, Technique::GammaCorrection, &EnhanceParams::with_gamma(0.5), &cache).unwrap();

        assert!((lifted.get(0, 0).unwrap() as i32 - 181).abs() <= 2);
        assert!((lowered.get(0, 0).unwrap() as i32 - 64).abs() <= 2);
    }

    #[test]
    fn test_equalization_ignores_cache_and_gamma() {
        let img = IntensityArray::from_raw(4, 1, vec![100, 100, 120, 120]).unwrap();
        let cache = LutCache::new();
        let params = EnhanceParams::with_gamma(99.0);

        let out = enhance(&img, Technique::HistogramEqualization, &params, &cache).unwrap();

        assert_eq!(out.to_vec(), vec![0, 0, 255, 255]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_technique_names_round_trip() {
        for technique in [
            Technique::Identity,
            Technique::HistogramEqualization,
            Technique::GammaCorrection,
        ] {
            assert_eq!(technique.name().parse::<Technique>().unwrap(), technique);
        }
        assert_eq!("Identity".parse::<Technique>().unwrap(), Technique::Identity);
        assert!("clahe".parse::<Technique>().is_err());
    }
}
