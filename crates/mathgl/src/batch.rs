//! Chained multiplication of many vectors and matrices.

use std::env::{self, VarError};

use once_cell::sync::Lazy;

use crate::{Error, Matrix, Result, ScalarKind, Vector};

/// A borrowed multiplication operand: either a [`Vector`] or a [`Matrix`].
///
/// Both `&Vector` and `&Matrix` convert into an [`Operand`], so methods taking
/// `impl Into<Operand>` accept either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Vector(&'a Vector),
    Matrix(&'a Matrix),
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(vec: &'a Vector) -> Self {
        Self::Vector(vec)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(mat: &'a Matrix) -> Self {
        Self::Matrix(mat)
    }
}

impl<'a> Operand<'a> {
    pub fn kind(self) -> ScalarKind {
        match self {
            Operand::Vector(vec) => vec.kind(),
            Operand::Matrix(mat) => mat.kind(),
        }
    }

    /// Converts the operand to a matrix, turning vectors into row matrices.
    pub fn to_matrix(self) -> Matrix {
        match self {
            Operand::Vector(vec) => vec.as_matrix(true),
            Operand::Matrix(mat) => mat.clone(),
        }
    }

    /// Multiplies `self` with `rhs`, using [`Vector::mul`] or [`Matrix::mul`].
    pub fn mul(self, rhs: Operand<'_>) -> Result<Matrix> {
        match self {
            Operand::Vector(vec) => vec.mul(rhs),
            Operand::Matrix(mat) => mat.mul(rhs),
        }
    }
}

/// Controls how [`batch_multiply_with`] evaluates a chain of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Whether halves of the chain are multiplied concurrently.
    pub parallel: bool,
    /// Chains (and sub-chains) shorter than this are always multiplied on the calling thread.
    pub min_parallel_len: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_len: Self::MIN_PARALLEL_LEN,
        }
    }
}

const PARALLEL_VAR: &str = "MATHGL_BATCH_PARALLEL";
const MIN_PARALLEL_VAR: &str = "MATHGL_BATCH_MIN_PARALLEL";

static ENV_CONFIG: Lazy<BatchConfig> = Lazy::new(BatchConfig::from_env);

impl BatchConfig {
    /// Chains of 2 or fewer operands are a single multiplication, so splitting them is pointless.
    const MIN_PARALLEL_LEN: usize = 3;

    /// Returns a configuration that never spawns concurrent tasks.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the minimum sub-chain length for concurrent evaluation (values below 3 are raised
    /// to 3).
    pub fn with_min_parallel_len(self, min_parallel_len: usize) -> Self {
        Self {
            min_parallel_len: min_parallel_len.max(Self::MIN_PARALLEL_LEN),
            ..self
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// - `MATHGL_BATCH_PARALLEL` can be set to `1`, `true` or `on` to enable concurrent
    ///   evaluation, and to `0`, `false` or `off` to disable it.
    /// - `MATHGL_BATCH_MIN_PARALLEL` sets [`BatchConfig::min_parallel_len`].
    ///
    /// Unset variables use the [`Default`] values. Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(PARALLEL_VAR), env::var(MIN_PARALLEL_VAR))
    }

    fn from_vars(
        parallel: Result<String, VarError>,
        min_parallel_len: Result<String, VarError>,
    ) -> Self {
        let default = Self::default();
        let parallel = match parallel {
            Ok(v) if v == "1" || v == "true" || v == "on" => true,
            Ok(v) if v == "0" || v == "false" || v == "off" => false,
            Ok(v) => {
                log::warn!("invalid value set for `{PARALLEL_VAR}` variable: '{v}'; ignoring");
                default.parallel
            }
            Err(VarError::NotPresent) => default.parallel,
            Err(VarError::NotUnicode(s)) => {
                log::warn!(
                    "invalid value set for `{PARALLEL_VAR}` variable: {}; ignoring",
                    s.to_string_lossy()
                );
                default.parallel
            }
        };
        let min_parallel_len = match min_parallel_len {
            Ok(v) => match v.trim().parse::<usize>() {
                Ok(len) if len >= Self::MIN_PARALLEL_LEN => len,
                _ => {
                    log::warn!(
                        "invalid value set for `{MIN_PARALLEL_VAR}` variable: '{v}' \
                        (expected an integer >= {}); ignoring",
                        Self::MIN_PARALLEL_LEN
                    );
                    default.min_parallel_len
                }
            },
            Err(VarError::NotPresent) => default.min_parallel_len,
            Err(VarError::NotUnicode(s)) => {
                log::warn!(
                    "invalid value set for `{MIN_PARALLEL_VAR}` variable: {}; ignoring",
                    s.to_string_lossy()
                );
                default.min_parallel_len
            }
        };

        Self {
            parallel,
            min_parallel_len,
        }
    }
}

/// Multiplies a chain of operands from left to right.
///
/// The chain is split in half recursively, and both halves are multiplied concurrently on the
/// [`rayon`] thread pool before their results are combined. Since matrix multiplication is
/// associative, this yields the same result as multiplying sequentially, but operand order is
/// always preserved.
///
/// - A single [`Vector`] yields a row matrix, and a single [`Matrix`] yields a copy.
/// - A [`Vector`] is only meaningful as the first operand, where it acts as a row vector.
///
/// Evaluation is configured by the `MATHGL_BATCH_*` environment variables (see
/// [`BatchConfig::from_env`]), which are read once per process. Use [`batch_multiply_with`] to
/// pass a configuration explicitly.
///
/// # Errors
///
/// Returns [`Error::EmptyBatch`] if `operands` is empty, and the first error produced by any of
/// the multiplications otherwise.
///
/// # Examples
///
/// ```
/// # use mathgl::*;
/// let scale = Matrix::from_slice(2, 2, &[2, 0, 0, 2]).unwrap();
/// let swap = Matrix::from_slice(2, 2, &[0, 1, 1, 0]).unwrap();
/// let v = Vector::from_slice(&[1, 2]);
///
/// let out = batch_multiply(&[(&v).into(), (&scale).into(), (&swap).into()]).unwrap();
/// assert_eq!(out, Matrix::from_slice(1, 2, &[4, 2]).unwrap());
///
/// assert_eq!(batch_multiply(&[]), Err(Error::EmptyBatch));
/// ```
pub fn batch_multiply(operands: &[Operand<'_>]) -> Result<Matrix> {
    batch_multiply_with(&ENV_CONFIG, operands)
}

/// Like [`batch_multiply`], but uses `config` instead of the environment configuration.
pub fn batch_multiply_with(config: &BatchConfig, operands: &[Operand<'_>]) -> Result<Matrix> {
    match operands {
        [] => Err(Error::EmptyBatch),
        [single] => Ok(single.to_matrix()),
        [lhs, rhs] => lhs.mul(*rhs),
        _ => {
            let (left, right) = operands.split_at(operands.len() / 2);
            let (left, right) = if config.parallel && operands.len() >= config.min_parallel_len {
                log::trace!(
                    "multiplying {} + {} operands concurrently",
                    left.len(),
                    right.len()
                );
                rayon::join(
                    || batch_multiply_with(config, left),
                    || batch_multiply_with(config, right),
                )
            } else {
                (
                    batch_multiply_with(config, left),
                    batch_multiply_with(config, right),
                )
            };
            left?.mul(&right?)
        }
    }
}
