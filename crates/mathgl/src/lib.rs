//! Dynamically-sized vectors and matrices for graphics code.
//!
//! # Overview
//!
//! All numbers are stored as [`Scalar`]s: a tagged union of [`i32`], [`u32`], [`f32`] and [`f64`].
//! A [`Vector`] or [`Matrix`] has a single [`ScalarKind`] shared by all of its elements, and every
//! operation checks that the kinds and dimensions of its operands are compatible. Mismatches are
//! reported as an [`Error`] instead of panicking or silently producing a zero value.
//!
//! Matrices are stored in row-major order and may have any number of rows and columns. Shapes that
//! graphics APIs accept as uniforms (up to 4x4) can be extracted as fixed-size native arrays with
//! [`Matrix::as_array`], [`Matrix::as_col_major_array`] and [`Matrix::to_bytes`].
//!
//! Long chains of multiplications (eg. model, view and projection transforms) can be evaluated with
//! [`batch_multiply`], which splits the chain and multiplies both halves concurrently.
//!
//! # Goals & Non-Goals
//!
//! - Integer arithmetic wraps on overflow, like release-mode Rust.
//! - Determinants and inverses are computed in [`f64`], regardless of the element kind.
//! - Large matrices are out of scope: the determinant of matrices larger than 4x4 uses cofactor
//!   expansion, which takes *O(n!)* time.
//! - There is no SIMD or GPU acceleration.
//!
//! # Examples
//!
//! ```
//! # use mathgl::*;
//! let translate = Matrix::from_slice(4, 4, &[
//!     1.0f32, 0.0, 0.0, 2.0,
//!     0.0, 1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0, 0.0,
//!     0.0, 0.0, 0.0, 1.0,
//! ])?;
//! let point = Vector::from_slice(&[1.0f32, 1.0, 1.0, 1.0]);
//! let moved = translate.mul(&point)?.as_vector()?;
//! assert_eq!(moved, Vector::from_slice(&[3.0f32, 1.0, 1.0, 1.0]));
//!
//! let uniform: [f32; 16] = translate.as_col_major_array()?;
//! assert_eq!(uniform[12], 2.0);
//! # Ok::<_, Error>(())
//! ```

pub mod approx;
mod batch;
mod error;
mod matrix;
mod scalar;
mod traits;
mod vector;

pub use batch::*;
pub use error::{Error, Result};
pub use matrix::*;
pub use scalar::{Scalar, ScalarKind};
pub use traits::*;
pub use vector::*;
