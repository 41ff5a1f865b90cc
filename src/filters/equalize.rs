//! Global histogram equalization.
//!
//! For cumulative histogram `H` and pixel count `N`, input intensity `i` maps to
//! `round((H(i) - H_min) / (N - H_min) * 255)` where `H_min` is the count of the
//! darkest populated bin. Bins below that one map to 0. An image holding a
//! single intensity has nothing to spread and is returned unchanged.

use crate::filters::lut::Lut;
use crate::histogram::Histogram;
use crate::image::IntensityArray;

/// Equalization table for the distribution in `histogram`.
///
/// The histogram should be exact; a sampled one yields an approximate table.
pub fn equalization_lut(histogram: &Histogram) -> Lut {
    let counts = histogram.counts();
    let total = histogram.total();

    let first = match counts.iter().position(|&c| c > 0) {
        Some(first) => first,
        None => return Lut::identity(),
    };
    let h_min = counts[first];
    if h_min == total {
        return Lut::identity();
    }

    let scale = 255.0 / (total - h_min) as f64;
    let mut table = [0u8; 256];
    let mut cumulative = 0u64;
    for i in (first + 1)..256 {
        cumulative += counts[i];
        table[i] = (cumulative as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }
    Lut::from_table(table)
}

/// Equalize `image` over its full intensity distribution.
pub fn equalize(image: &IntensityArray) -> IntensityArray {
    let histogram = Histogram::exact(image);
    equalization_lut(&histogram).apply(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_level_image_stretches_to_full_range() {
        let img = IntensityArray::from_raw(4, 1, vec![100, 100, 120, 120]).unwrap();

        let result = equalize(&img);

        assert_eq!(result.to_vec(), vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_constant_image_unchanged() {
        let img = IntensityArray::filled(8, 8, 77).unwrap();
        assert_eq!(equalize(&img), img);
    }

    #[test]
    fn test_matches_reference_formula() {
        // counts: 10 -> 1, 20 -> 2, 30 -> 1; N = 4, H_min = 1
        let img = IntensityArray::from_raw(2, 2, vec![10, 20, 20, 30]).unwrap();
        let lut = equalization_lut(&Histogram::exact(&img));

        assert_eq!(lut.map(10), 0);
        // (3 - 1) / 3 * 255 = 170
        assert_eq!(lut.map(20), 170);
        assert_eq!(lut.map(30), 255);
        // Empty bins between populated ones hold the previous level
        assert_eq!(lut.map(25), 170);
        assert_eq!(lut.map(5), 0);
    }

    #[test]
    fn test_mapping_is_monotonic() {
        let samples: Vec<u8> = (0..4096u32).map(|i| ((i * 37 + i / 7) % 180) as u8 + 40).collect();
        let img = IntensityArray::from_raw(64, 64, samples).unwrap();

        let lut = equalization_lut(&Histogram::exact(&img));

        assert!(lut.is_monotonic());
        assert_eq!(lut.map(255), 255);
    }

    #[test]
    fn test_preserves_rank_order() {
        let img = IntensityArray::from_raw(5, 1, vec![3, 200, 50, 50, 90]).unwrap();

        let result = equalize(&img).to_vec();

        assert!(result[0] <= result[2]);
        assert_eq!(result[2], result[3]);
        assert!(result[3] <= result[4]);
        assert!(result[4] <= result[1]);
        assert_eq!(result[1], 255);
    }
}
