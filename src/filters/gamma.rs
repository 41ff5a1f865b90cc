//! Power-law (gamma) correction.
//!
//! The transfer function is `o = round((i / 255) ^ (1 / gamma) * 255)`, so
//! `gamma > 1` lifts mid-tones and `gamma < 1` pulls them down; `gamma = 1`
//! is the identity.
//!
//! Gamma values are rounded to two decimals on construction. Two slider
//! positions that round to the same hundredth share one table.

use std::fmt;

use crate::error::{EnhanceError, Result};
use crate::filters::lut::Lut;

/// Smallest accepted gamma.
pub const GAMMA_MIN: f32 = 0.1;
/// Largest accepted gamma.
pub const GAMMA_MAX: f32 = 5.0;

/// A validated gamma value, stored as fixed-point hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gamma {
    hundredths: u16,
}

impl Gamma {
    /// Validate `value` against `[GAMMA_MIN, GAMMA_MAX]` and round it to two
    /// decimals.
    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(EnhanceError::invalid(format!(
                "gamma must be a finite number, got {value}"
            )));
        }
        if value <= 0.0 || !(GAMMA_MIN..=GAMMA_MAX).contains(&value) {
            return Err(EnhanceError::invalid(format!(
                "gamma must be within [{GAMMA_MIN}, {GAMMA_MAX}], got {value}"
            )));
        }
        let hundredths = (f64::from(value) * 100.0).round() as u16;
        Ok(Self { hundredths })
    }

    /// Fixed-point value in hundredths, e.g. `150` for `1.50`.
    pub fn hundredths(self) -> u16 {
        self.hundredths
    }

    /// The rounded gamma value.
    pub fn value(self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

/// Build the 256-entry correction table for `gamma`.
///
/// Depends on the parameter only, never on image content.
pub fn gamma_lut(gamma: Gamma) -> Lut {
    let inv_gamma = 1.0 / gamma.value();
    Lut::from_fn(|i| {
        let normalized = f64::from(i) / 255.0;
        let corrected = normalized.powf(inv_gamma) * 255.0;
        corrected.round().clamp(0.0, 255.0) as u8
    })
}
