//! Determinants, minors and inverses.

use itertools::iproduct;

use crate::{Error, Matrix, Result, Scalar};

/// Determinants with a magnitude below this value are treated as 0 by [`Matrix::inverse`] and
/// [`Matrix::orthogonal_inverse`].
pub const SINGULAR_EPSILON: f64 = 1e-7;

impl Matrix {
    /// Computes the determinant of a square matrix.
    ///
    /// Matrices up to 4x4 use closed-form expansions. Larger matrices fall back to recursive
    /// Laplace expansion, which takes *O(n!)* time and is only suitable for small `n`.
    ///
    /// The empty (0x0) matrix has a determinant of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let m = Matrix::from_slice(2, 2, &[2, 0, 0, 3]).unwrap();
    /// assert_eq!(m.det(), Ok(6.0));
    ///
    /// assert!(Matrix::new(2, 3, ScalarKind::F32).det().is_err());
    /// ```
    pub fn det(&self) -> Result<f64> {
        self.check_square("det")?;
        if self.rows > 4 {
            log::debug!(
                "computing determinant of {} matrix by cofactor expansion",
                self.shape()
            );
        }
        Ok(self.det_unchecked())
    }

    fn det_unchecked(&self) -> f64 {
        let d = |i: usize| self.elements[i].as_f64();
        match self.rows {
            0 => 1.0,
            1 => d(0),
            2 => d(0) * d(3) - d(1) * d(2),
            3 => {
                d(0) * (d(4) * d(8) - d(5) * d(7)) - d(1) * (d(3) * d(8) - d(5) * d(6))
                    + d(2) * (d(3) * d(7) - d(4) * d(6))
            }
            4 => {
                d(0) * (d(5) * (d(10) * d(15) - d(14) * d(11))
                    - d(6) * (d(9) * d(15) - d(13) * d(11))
                    + d(7) * (d(9) * d(14) - d(13) * d(10)))
                    - d(1)
                        * (d(4) * (d(10) * d(15) - d(14) * d(11))
                            - d(6) * (d(8) * d(15) - d(12) * d(11))
                            + d(7) * (d(8) * d(14) - d(12) * d(10)))
                    + d(2)
                        * (d(4) * (d(9) * d(15) - d(13) * d(11))
                            - d(5) * (d(8) * d(15) - d(12) * d(11))
                            + d(7) * (d(8) * d(13) - d(12) * d(9)))
                    - d(3)
                        * (d(4) * (d(9) * d(14) - d(13) * d(10))
                            - d(5) * (d(8) * d(14) - d(12) * d(10))
                            + d(6) * (d(8) * d(13) - d(12) * d(9)))
            }
            n => (0..n)
                .map(|row| d(row * n) * self.cofactor_unchecked(row, 0))
                .sum(),
        }
    }

    /// Returns the submatrix obtained by removing row `row` and column `col`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let m = Matrix::from_slice(3, 3, &[
    ///     1, 2, 3,
    ///     4, 5, 6,
    ///     7, 8, 9,
    /// ]).unwrap();
    /// assert_eq!(m.minor_matrix(1, 0), Matrix::from_slice(2, 2, &[2, 3, 8, 9]));
    /// ```
    pub fn minor_matrix(&self, row: usize, col: usize) -> Result<Matrix> {
        if self.is_empty() {
            return Err(Error::dimension_mismatch(
                "minor_matrix",
                self.shape(),
                format_args!("({row}, {col})"),
            ));
        }
        if row >= self.rows || col >= self.cols {
            return Err(Error::out_of_bounds(
                format_args!("({row}, {col})"),
                self.shape(),
            ));
        }
        Ok(self.minor_unchecked(row, col))
    }

    fn minor_unchecked(&self, row: usize, col: usize) -> Matrix {
        let elements = iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(i, j)| i != row && j != col)
            .map(|(i, j)| self.elements[i * self.cols + j])
            .collect();
        Matrix::from_raw(self.rows - 1, self.cols - 1, self.kind, elements)
    }

    /// Returns the cofactor `(-1)^(row + col) * det(minor(row, col))` of a square matrix.
    pub fn cofactor(&self, row: usize, col: usize) -> Result<f64> {
        self.check_square("cofactor")?;
        self.minor_matrix(row, col)?;
        Ok(self.cofactor_unchecked(row, col))
    }

    fn cofactor_unchecked(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor_unchecked(row, col).det_unchecked()
    }

    /// Computes the inverse of a square matrix as its adjugate divided by its determinant.
    ///
    /// Integer matrices are inverted in [`f64`] and the result is truncated to the matrix kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Singular`] when the magnitude of the determinant is below
    /// [`SINGULAR_EPSILON`], and [`Error::DimensionMismatch`] for non-square matrices.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let m = Matrix::from_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]).unwrap();
    /// let inv = m.inverse().unwrap();
    /// assert_approx_eq!(inv.mul(&m).unwrap(), Matrix::identity(2, ScalarKind::F64)).abs(1e-12);
    ///
    /// let singular = Matrix::from_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]).unwrap();
    /// assert_eq!(singular.inverse(), Err(Error::Singular { det: 0.0 }));
    /// ```
    pub fn inverse(&self) -> Result<Matrix> {
        let det = self.nonsingular_det()?;
        let elements = iproduct!(0..self.rows, 0..self.cols)
            .map(|(i, j)| Scalar::new(self.cofactor_unchecked(j, i) / det, self.kind))
            .collect();
        Ok(Matrix::from_raw(self.rows, self.cols, self.kind, elements))
    }

    /// Computes `transpose() / det()`.
    ///
    /// This equals the inverse only for rotation matrices (orthogonal matrices with a determinant
    /// of 1), where it is considerably cheaper than [`Matrix::inverse`]. Other matrices yield a
    /// meaningless result.
    ///
    /// # Errors
    ///
    /// Same as [`Matrix::inverse`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let (s, c) = 0.5f64.sin_cos();
    /// let rot = Matrix::from_slice(2, 2, &[c, -s, s, c]).unwrap();
    /// let inv = rot.orthogonal_inverse().unwrap();
    /// assert_approx_eq!(inv.mul(&rot).unwrap(), Matrix::identity(2, ScalarKind::F64)).abs(1e-12);
    /// ```
    pub fn orthogonal_inverse(&self) -> Result<Matrix> {
        let det = self.nonsingular_det()?;
        Ok(self.transpose().float_scale(1.0 / det))
    }

    fn nonsingular_det(&self) -> Result<f64> {
        let det = self.det()?;
        if det.abs() < SINGULAR_EPSILON {
            log::debug!("{} matrix is singular (det = {det})", self.shape());
            return Err(Error::Singular { det });
        }
        Ok(det)
    }

    fn check_square(&self, op: &'static str) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(
                op,
                format_args!("{} rows", self.rows),
                format_args!("{} cols", self.cols),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, ScalarKind};

    use super::*;

    fn f64s(n: usize, elements: &[f64]) -> Matrix {
        Matrix::from_slice(n, n, elements).unwrap()
    }

    #[test]
    fn small_dets() {
        assert_eq!(Matrix::new(0, 0, ScalarKind::F64).det(), Ok(1.0));
        assert_eq!(f64s(1, &[-2.5]).det(), Ok(-2.5));
        assert_eq!(Matrix::identity(4, ScalarKind::F32).det(), Ok(1.0));
        assert_eq!(Matrix::identity(7, ScalarKind::U32).det(), Ok(1.0));
    }

    #[rustfmt::skip]
    #[test]
    fn closed_forms_match_expansion() {
        let m3 = f64s(3, &[
            2.0, -3.0, 1.0,
            2.0, 0.0, -1.0,
            1.0, 4.0, 5.0,
        ]);
        assert_eq!(m3.det(), Ok(49.0));

        let m4 = f64s(4, &[
            1.0, 0.0, 2.0, -1.0,
            3.0, 0.0, 0.0, 5.0,
            2.0, 1.0, 4.0, -3.0,
            1.0, 0.0, 5.0, 0.0,
        ]);
        assert_eq!(m4.det(), Ok(30.0));

        // Expanding along the first column via cofactors must agree with the closed forms.
        for m in [&m3, &m4] {
            let n = m.rows();
            let expanded: f64 = (0..n)
                .map(|i| m[(i, 0)].as_f64() * m.cofactor(i, 0).unwrap())
                .sum();
            assert_eq!(m.det(), Ok(expanded));
        }
    }

    #[test]
    fn block_diagonal_det() {
        // det(diag(m4, 2, 3)) = det(m4) * 6
        let m4 = [
            1.0, 0.0, 2.0, -1.0, //
            3.0, 0.0, 0.0, 5.0, //
            2.0, 1.0, 4.0, -3.0, //
            1.0, 0.0, 5.0, 0.0,
        ];
        let m = Matrix::from_fn(6, 6, ScalarKind::F64, |i, j| match (i, j) {
            (0..=3, 0..=3) => Scalar::F64(m4[i * 4 + j]),
            (4, 4) => Scalar::F64(2.0),
            (5, 5) => Scalar::F64(3.0),
            _ => Scalar::F64(0.0),
        })
        .unwrap();
        assert_approx_eq!(Scalar::F64(m.det().unwrap()), Scalar::F64(180.0)).abs(1e-9);
    }

    #[test]
    fn non_square() {
        let m = Matrix::new(2, 3, ScalarKind::I32);
        assert!(matches!(m.det(), Err(Error::DimensionMismatch { op: "det", .. })));
        assert!(matches!(m.inverse(), Err(Error::DimensionMismatch { .. })));
        assert!(m.cofactor(0, 0).is_err());
    }

    #[rustfmt::skip]
    #[test]
    fn minor_matrix() {
        let m = Matrix::from_slice(3, 4, &[
            0, 1, 2, 3,
            4, 5, 6, 7,
            8, 9, 10, 11,
        ]).unwrap();
        assert_eq!(m.minor_matrix(0, 0), Matrix::from_slice(2, 3, &[5, 6, 7, 9, 10, 11]));
        assert_eq!(m.minor_matrix(2, 3), Matrix::from_slice(2, 3, &[0, 1, 2, 4, 5, 6]));
        assert_eq!(m.minor_matrix(1, 2), Matrix::from_slice(2, 3, &[0, 1, 3, 8, 9, 11]));

        assert!(matches!(m.minor_matrix(3, 0), Err(Error::OutOfBounds { .. })));
        assert!(matches!(m.minor_matrix(0, 4), Err(Error::OutOfBounds { .. })));
        assert!(matches!(
            Matrix::new(0, 0, ScalarKind::I32).minor_matrix(0, 0),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn cofactor_signs() {
        let m = f64s(2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.cofactor(0, 0), Ok(4.0));
        assert_eq!(m.cofactor(0, 1), Ok(-3.0));
        assert_eq!(m.cofactor(1, 0), Ok(-2.0));
        assert_eq!(m.cofactor(1, 1), Ok(1.0));
    }

    #[rustfmt::skip]
    #[test]
    fn inverse() {
        let m = f64s(3, &[
            2.0, -3.0, 1.0,
            2.0, 0.0, -1.0,
            1.0, 4.0, 5.0,
        ]);
        let inv = m.inverse().unwrap();
        let id = Matrix::identity(3, ScalarKind::F64);
        assert_approx_eq!(inv.mul(&m).unwrap(), id).abs(1e-12);
        assert_approx_eq!(m.mul(&inv).unwrap(), id).abs(1e-12);

        assert_eq!(f64s(1, &[4.0]).inverse(), Ok(f64s(1, &[0.25])));
    }

    #[test]
    fn integer_inverse_truncates() {
        let m = Matrix::from_slice(2, 2, &[2, 0, 0, 4]).unwrap();
        assert_eq!(m.inverse(), Matrix::from_slice(2, 2, &[0, 0, 0, 0]));
        let m = Matrix::from_slice(2, 2, &[1, 1, 0, 1]).unwrap();
        assert_eq!(m.inverse(), Matrix::from_slice(2, 2, &[1, -1, 0, 1]));
    }

    #[test]
    fn singular() {
        let m = f64s(2, &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(m.inverse(), Err(Error::Singular { det: 0.0 }));
        assert_eq!(m.orthogonal_inverse(), Err(Error::Singular { det: 0.0 }));

        let tiny = f64s(2, &[1e-4, 0.0, 0.0, 1e-4]);
        assert!(matches!(tiny.inverse(), Err(Error::Singular { .. })));
    }

    #[test]
    fn orthogonal_inverse_of_rotation() {
        let (s, c) = 1.2f32.sin_cos();
        #[rustfmt::skip]
        let rot = Matrix::from_slice(3, 3, &[
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        ]).unwrap();
        let inv = rot.orthogonal_inverse().unwrap();
        assert_approx_eq!(inv, rot.transpose()).abs(1e-6);
        assert_approx_eq!(inv.mul(&rot).unwrap(), Matrix::identity(3, ScalarKind::F32)).abs(1e-6);
    }

    #[test]
    fn orthogonal_inverse_differs_for_general_matrices() {
        let m = f64s(2, &[2.0, 0.0, 0.0, 2.0]);
        assert_eq!(m.orthogonal_inverse(), Ok(f64s(2, &[0.5, 0.0, 0.0, 0.5])));
        assert_eq!(m.inverse(), Ok(f64s(2, &[0.5, 0.0, 0.0, 0.5])));

        let m = f64s(2, &[1.0, 1.0, 0.0, 1.0]);
        assert_ne!(m.orthogonal_inverse(), m.inverse());
    }
}
