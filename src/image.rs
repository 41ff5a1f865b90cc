//! Grayscale intensity arrays.
//!
//! ## Layout
//!
//! Samples are stored as an ndarray `Array2<u8>` with shape `(height, width)`,
//! the same row-major convention the filters use for `(height, width, channels)`
//! images. An [`IntensityArray`] is never empty and exposes no mutable access:
//! every transform builds a new array.

use std::path::Path;

use ndarray::{Array2, ArrayView2};

use crate::error::{EnhanceError, Result};

/// Immutable 2D grid of 8-bit grayscale samples, `width, height >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityArray {
    data: Array2<u8>,
}

impl IntensityArray {
    /// Wrap an owned `(height, width)` array.
    ///
    /// Fails with [`EnhanceError::EmptyImage`] if either dimension is zero.
    pub fn new(data: Array2<u8>) -> Result<Self> {
        let (height, width) = data.dim();
        if height == 0 || width == 0 {
            return Err(EnhanceError::EmptyImage);
        }
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { data })
    }

    /// Copy samples out of a borrowed view (e.g. a numpy buffer).
    pub fn from_view(view: ArrayView2<u8>) -> Result<Self> {
        Self::new(view.to_owned())
    }

    /// Build from a flat row-major buffer of `width * height` samples.
    pub fn from_raw(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EnhanceError::EmptyImage);
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            EnhanceError::invalid(format!("image dimensions {width}x{height} overflow"))
        })?;
        if samples.len() != expected {
            return Err(EnhanceError::ShapeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        let data = Array2::from_shape_vec((height, width), samples).map_err(|_| {
            EnhanceError::ShapeMismatch {
                expected,
                actual: expected,
            }
        })?;
        Ok(Self { data })
    }

    /// Array of the given size with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self> {
        Self::new(Array2::from_elem((height, width), value))
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.data.get((y, x)).copied()
    }

    /// Sample at a flat row-major index.
    pub(crate) fn sample_at(&self, index: usize) -> u8 {
        let width = self.width();
        self.data[[index / width, index % width]]
    }

    /// New array of the same shape with every sample passed through `f`.
    pub(crate) fn map_parallel<F>(&self, f: F) -> Self
    where
        F: Fn(u8) -> u8 + Sync + Send,
    {
        let mut data = self.data.clone();
        data.par_mapv_inplace(f);
        Self { data }
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<u8> {
        self.data
    }

    /// Flat row-major copy of the samples.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}

/// Supplies decoded grayscale images to a [`Session`](crate::session::Session).
///
/// Implemented by the host application on top of whatever decoder it uses.
/// Failures are reported as [`EnhanceError::ImageDecode`].
pub trait ImageSource {
    fn load(&self, path: &Path) -> Result<IntensityArray>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(matches!(
            IntensityArray::new(Array2::<u8>::zeros((0, 4))),
            Err(EnhanceError::EmptyImage)
        ));
        assert!(matches!(
            IntensityArray::from_raw(3, 0, vec![]),
            Err(EnhanceError::EmptyImage)
        ));
        assert!(matches!(
            IntensityArray::filled(0, 0, 7),
            Err(EnhanceError::EmptyImage)
        ));
    }

    #[test]
    fn test_from_raw_shape_mismatch() {
        let err = IntensityArray::from_raw(3, 2, vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            EnhanceError::ShapeMismatch { expected: 6, actual: 5 }
        ));
    }

    #[test]
    fn test_from_raw_overflowing_dimensions() {
        let err = IntensityArray::from_raw(usize::MAX, 2, vec![0; 4]).unwrap_err();
        assert!(matches!(err, EnhanceError::InvalidParameter(_)));
    }

    #[test]
    fn test_dimensions_and_indexing() {
        let img = IntensityArray::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.pixel_count(), 6);
        assert_eq!(img.get(2, 0), Some(3));
        assert_eq!(img.get(0, 1), Some(4));
        assert_eq!(img.get(3, 0), None);
        assert_eq!(img.sample_at(4), 5);
        assert_eq!(img.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_non_standard_layout_is_normalized() {
        let transposed = array![[1u8, 2, 3], [4, 5, 6]].reversed_axes();
        let img = IntensityArray::new(transposed).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.to_vec(), vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(img.sample_at(3), 5);
    }
}
