//! 256-entry intensity lookup tables.

use crate::image::IntensityArray;

/// Mapping from input intensity `0..=255` to output intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    table: [u8; 256],
}

impl Lut {
    pub fn from_table(table: [u8; 256]) -> Self {
        Self { table }
    }

    /// Build a table by evaluating `f` for every input intensity.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = f(i as u8);
        }
        Self { table }
    }

    pub fn identity() -> Self {
        Self::from_fn(|i| i)
    }

    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    pub fn as_table(&self) -> &[u8; 256] {
        &self.table
    }

    /// True if `i1 < i2` implies `map(i1) <= map(i2)` for every pair.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }

    /// Remap every sample of `image` into a new array.
    pub fn apply(&self, image: &IntensityArray) -> IntensityArray {
        image.map_parallel(|v| self.table[v as usize])
    }
}
