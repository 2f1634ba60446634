use crate::Scalar;

use super::ApproxEq;

macro_rules! float_impl {
    ($($ty:ty),+) => {
        $(
            impl ApproxEq for $ty {
                type Tolerance = Self;

                fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self) -> bool {
                    if !self.is_finite() || !other.is_finite() {
                        // inf == inf, -inf == -inf, inf != -inf
                        return self == other;
                    }
                    (self - other).abs() <= abs_tolerance
                }

                fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self) -> bool {
                    if !self.is_finite() || !other.is_finite() {
                        return self == other;
                    }
                    let largest = self.abs().max(other.abs());
                    (self - other).abs() <= largest * rel_tolerance
                }

                fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
                    if self.is_sign_negative() != other.is_sign_negative() {
                        return self == other; // -0.0 == +0.0
                    }
                    if self.is_nan() || other.is_nan() {
                        return false;
                    }
                    let diff = self.to_bits().abs_diff(other.to_bits());
                    diff <= ulps_tolerance.into()
                }
            }
        )+
    };
}
float_impl!(f32, f64);

impl ApproxEq for Scalar {
    type Tolerance = f64;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: f64) -> bool {
        match (*self, *other) {
            (Scalar::F32(a), Scalar::F32(b)) => a.abs_diff_eq(&b, abs_tolerance as f32),
            (a, b) if a.kind() == b.kind() => a.as_f64().abs_diff_eq(&b.as_f64(), abs_tolerance),
            _ => false,
        }
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: f64) -> bool {
        match (*self, *other) {
            (Scalar::F32(a), Scalar::F32(b)) => a.rel_diff_eq(&b, rel_tolerance as f32),
            (a, b) if a.kind() == b.kind() => a.as_f64().rel_diff_eq(&b.as_f64(), rel_tolerance),
            _ => false,
        }
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        match (*self, *other) {
            (Scalar::I32(a), Scalar::I32(b)) => a.abs_diff(b) <= ulps_tolerance,
            (Scalar::U32(a), Scalar::U32(b)) => a.abs_diff(b) <= ulps_tolerance,
            (Scalar::F32(a), Scalar::F32(b)) => a.ulps_diff_eq(&b, ulps_tolerance),
            (Scalar::F64(a), Scalar::F64(b)) => a.ulps_diff_eq(&b, ulps_tolerance),
            _ => false,
        }
    }
}

impl<'a, T: ApproxEq<U> + ?Sized, U: ?Sized> ApproxEq<U> for &'a T {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &U, abs_tolerance: Self::Tolerance) -> bool {
        T::abs_diff_eq(self, other, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &U, rel_tolerance: Self::Tolerance) -> bool {
        T::rel_diff_eq(self, other, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &U, ulps_tolerance: u32) -> bool {
        T::ulps_diff_eq(self, other, ulps_tolerance)
    }
}

/// Slices of different lengths are never approximately equal.
impl<T: ApproxEq<U>, U> ApproxEq<[U]> for [T] {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &[U], abs_tolerance: Self::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| T::abs_diff_eq(a, b, abs_tolerance))
    }

    fn rel_diff_eq(&self, other: &[U], rel_tolerance: Self::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| T::rel_diff_eq(a, b, rel_tolerance))
    }

    fn ulps_diff_eq(&self, other: &[U], ulps_tolerance: u32) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| T::ulps_diff_eq(a, b, ulps_tolerance))
    }
}
