//! 256-bin intensity histograms with bounded cost.
//!
//! Images up to `pixel_limit` pixels are counted exactly. Larger images are
//! counted over a uniform random sample of exactly `pixel_limit` pixels drawn
//! without replacement, so the cost stays O(pixel_limit) whatever the
//! resolution. The result carries a `sampled` flag so presentation layers can
//! label it as approximate; sampled counts differ from call to call.

use rand::Rng;
use rayon::prelude::*;

use crate::image::IntensityArray;

/// Pixel budget above which histograms are sampled.
pub const DEFAULT_PIXEL_LIMIT: usize = 250_000;

/// Number of intensity bins.
pub const BINS: usize = 256;

/// Frequency of each intensity value `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; BINS],
    sampled: bool,
}

impl Histogram {
    /// Histogram of `image`, sampled if it holds more than `pixel_limit` pixels.
    pub fn compute(image: &IntensityArray, pixel_limit: usize) -> Self {
        Self::compute_with_rng(image, pixel_limit, &mut rand::thread_rng())
    }

    /// Same as [`Histogram::compute`] with a caller-supplied random source.
    pub fn compute_with_rng<R: Rng + ?Sized>(
        image: &IntensityArray,
        pixel_limit: usize,
        rng: &mut R,
    ) -> Self {
        let pixel_count = image.pixel_count();
        if pixel_count <= pixel_limit {
            return Self::exact(image);
        }

        tracing::debug!(
            pixel_count,
            pixel_limit,
            "Histogram: sampling pixels without replacement"
        );

        let mut counts = [0u64; BINS];
        for index in rand::seq::index::sample(rng, pixel_count, pixel_limit).iter() {
            counts[image.sample_at(index) as usize] += 1;
        }
        Self {
            counts,
            sampled: true,
        }
    }

    /// Exact histogram over every pixel of `image`.
    pub fn exact(image: &IntensityArray) -> Self {
        let view = image.view();
        let counts = (0..image.height())
            .into_par_iter()
            .fold(
                || [0u64; BINS],
                |mut acc, y| {
                    for &v in view.row(y) {
                        acc[v as usize] += 1;
                    }
                    acc
                },
            )
            .reduce(
                || [0u64; BINS],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b.iter()) {
                        *x += y;
                    }
                    a
                },
            );
        Self {
            counts,
            sampled: false,
        }
    }

    pub fn counts(&self) -> &[u64; BINS] {
        &self.counts
    }

    pub fn count(&self, intensity: u8) -> u64 {
        self.counts[intensity as usize]
    }

    /// True if the counts come from a sub-sample rather than every pixel.
    pub fn sampled(&self) -> bool {
        self.sampled
    }

    /// Sum of all bins: the pixel count when exact, the pixel limit when sampled.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Most populated bin and its count. Ties resolve to the darkest bin.
    pub fn peak(&self) -> (u8, u64) {
        let mut best = (0u8, self.counts[0]);
        for (i, &c) in self.counts.iter().enumerate().skip(1) {
            if c > best.1 {
                best = (i as u8, c);
            }
        }
        best
    }

    /// Chart title, marked when the counts are approximate.
    pub fn title(&self, base: &str) -> String {
        if self.sampled {
            format!("{base} (Sampled)")
        } else {
            base.to_string()
        }
    }
}
