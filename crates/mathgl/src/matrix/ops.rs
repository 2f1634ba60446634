use std::ops::Index;

use crate::{approx::ApproxEq, Matrix, Scalar};

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols,
        );
        &self.elements[row * self.cols + col]
    }
}

impl ApproxEq for Matrix {
    type Tolerance = f64;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.same_layout(other) && self.as_slice().abs_diff_eq(other.as_slice(), abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.same_layout(other) && self.as_slice().rel_diff_eq(other.as_slice(), rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.same_layout(other) && self.as_slice().ulps_diff_eq(other.as_slice(), ulps_tolerance)
    }
}

impl Matrix {
    fn same_layout(&self, other: &Matrix) -> bool {
        self.kind == other.kind && self.rows == other.rows && self.cols == other.cols
    }
}
