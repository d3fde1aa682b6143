//! Error types for vista-rs.

use thiserror::Error;

use crate::bounds::Bounds;

/// The main error type for vista-rs operations.
///
/// Every variant describes a caller mistake detected at the point of input.
/// Nothing here is transient, so nothing is worth retrying.
#[derive(Error, Debug)]
pub enum VistaError {
    /// A scalar parameter is outside its allowed interval.
    #[error("{name} must be a finite value in [{min}, {max}], got {value}")]
    Range {
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A part geometry has (near) zero extent along some axis.
    #[error("custom axes part must be 3D, got bounds: {bounds}")]
    NotThreeDimensional { bounds: Bounds },

    /// A named geometry kind is not recognized.
    #[error("geometry '{kind}' is not supported, must be one of: {valid}")]
    UnsupportedGeometryKind { kind: String, valid: String },

    /// A dataset cannot be used as part geometry.
    #[error("invalid geometry input: {0}")]
    InvalidGeometryInput(String),

    /// Malformed input that is not a simple range violation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An index does not refer to an existing element.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A named block was not found in a composite.
    #[error("block '{0}' not found")]
    BlockNotFound(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// JSON configuration error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for vista-rs operations.
pub type Result<T> = std::result::Result<T, VistaError>;

/// Checks that `value` is finite and lies in `[min, max]`.
///
/// NaN and infinities are always rejected, whatever the bounds.
pub fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<f32> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(VistaError::Range {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Checks that `value` is finite and non-negative.
pub fn check_non_negative(name: &str, value: f32) -> Result<f32> {
    check_range(name, value, 0.0, f32::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_accepts_endpoints() {
        assert!(check_range("frame width", 0.0, 0.0, 1.0).is_ok());
        assert!(check_range("frame width", 1.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_check_range_rejects_nan() {
        assert!(check_range("frame width", f32::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_infinity_is_not_non_negative() {
        for value in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            assert!(matches!(
                check_non_negative("tolerance", value),
                Err(VistaError::Range { .. })
            ));
        }
        assert_eq!(check_non_negative("tolerance", f32::MAX).unwrap(), f32::MAX);
        assert!(check_range("explode factor", f32::INFINITY, f32::MIN, f32::INFINITY).is_err());
    }

    #[test]
    fn test_range_message_names_value_and_interval() {
        let err = check_non_negative("shaft radius", -1.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("shaft radius"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("inf"));
    }
}
