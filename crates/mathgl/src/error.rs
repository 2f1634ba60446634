//! The error type shared by all fallible operations.

use thiserror::Error;

use crate::ScalarKind;

/// Result type alias used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by [`Scalar`], [`Vector`] and [`Matrix`] operations.
///
/// No operation in this crate signals failure by returning a zero-valued or empty object; every
/// precondition violation is reported through one of these variants.
///
/// [`Scalar`]: crate::Scalar
/// [`Vector`]: crate::Vector
/// [`Matrix`]: crate::Matrix
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operands (or an element and its container) hold different scalar kinds.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: ScalarKind,
        found: ScalarKind,
    },

    /// Vector lengths or matrix shapes are incompatible for the requested operation.
    #[error("dimension mismatch in `{op}`: {left} vs. {right}")]
    DimensionMismatch {
        op: &'static str,
        left: String,
        right: String,
    },

    /// An element index was outside of the valid range.
    #[error("index {index} out of bounds (bound is {bound})")]
    OutOfBounds { index: String, bound: String },

    /// The matrix determinant is too close to zero to invert the matrix.
    #[error("matrix is singular (determinant {det})")]
    Singular { det: f64 },

    /// The operation is not defined for an object of this shape.
    #[error("`{op}` does not support shape {shape}")]
    UnsupportedShape { op: &'static str, shape: String },

    /// The operation is not defined for values of this kind.
    #[error("`{op}` is not supported for {kind} values")]
    UnsupportedKind { op: &'static str, kind: ScalarKind },

    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// [`batch_multiply`][crate::batch_multiply] was called without any operands.
    #[error("cannot multiply an empty batch")]
    EmptyBatch,
}

impl Error {
    pub(crate) fn kind_mismatch(expected: ScalarKind, found: ScalarKind) -> Self {
        Self::KindMismatch { expected, found }
    }

    pub(crate) fn dimension_mismatch(
        op: &'static str,
        left: impl ToString,
        right: impl ToString,
    ) -> Self {
        Self::DimensionMismatch {
            op,
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub(crate) fn unsupported_shape(op: &'static str, shape: impl ToString) -> Self {
        Self::UnsupportedShape {
            op,
            shape: shape.to_string(),
        }
    }

    pub(crate) fn out_of_bounds(index: impl ToString, bound: impl ToString) -> Self {
        Self::OutOfBounds {
            index: index.to_string(),
            bound: bound.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::kind_mismatch(ScalarKind::F32, ScalarKind::I32).to_string(),
            "kind mismatch: expected float32, found int32"
        );
        assert_eq!(
            Error::dimension_mismatch("mul", "2x3", "2x3").to_string(),
            "dimension mismatch in `mul`: 2x3 vs. 2x3"
        );
        assert_eq!(
            Error::unsupported_shape("as_vector", "3x3").to_string(),
            "`as_vector` does not support shape 3x3"
        );
    }
}
