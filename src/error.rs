//! Error type shared by every engine operation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced synchronously by the engine.
///
/// Histogram sampling never produces an error; it is reported through
/// [`Histogram::sampled`](crate::histogram::Histogram::sampled) instead.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Image is empty")]
    EmptyImage,

    #[error("Sample buffer holds {actual} values, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Failed to decode image {path}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },
}

impl EnhanceError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EnhanceError::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EnhanceError>;

#[cfg(feature = "python")]
impl From<EnhanceError> for pyo3::PyErr {
    fn from(e: EnhanceError) -> Self {
        match e {
            EnhanceError::ImageDecode { .. } => pyo3::exceptions::PyIOError::new_err(e.to_string()),
            _ => pyo3::exceptions::PyValueError::new_err(e.to_string()),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<EnhanceError> for wasm_bindgen::JsValue {
    fn from(e: EnhanceError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
