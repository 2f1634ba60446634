//! Implementations of `std::ops` and comparison traits.

use std::ops::Index;

use crate::{approx::ApproxEq, Scalar};

use super::Vector;

impl Index<usize> for Vector {
    type Output = Scalar;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl PartialEq<[Scalar]> for Vector {
    fn eq(&self, other: &[Scalar]) -> bool {
        self.elements == other
    }
}

impl<const N: usize> PartialEq<[Scalar; N]> for Vector {
    fn eq(&self, other: &[Scalar; N]) -> bool {
        self.elements == other
    }
}

/// Vectors of different kinds or sizes are never approximately equal.
impl ApproxEq for Vector {
    type Tolerance = f64;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.kind == other.kind
            && self.size() == other.size()
            && self.as_slice().abs_diff_eq(other.as_slice(), abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.kind == other.kind
            && self.size() == other.size()
            && self.as_slice().rel_diff_eq(other.as_slice(), rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.kind == other.kind
            && self.size() == other.size()
            && self.as_slice().ulps_diff_eq(other.as_slice(), ulps_tolerance)
    }
}
