//! Approximate equality for scalars, vectors and matrices.
//!
//! [`Vector`] and [`Matrix`] implement [`PartialEq`] as *exact* equality, which is rarely what
//! you want after a chain of float operations. The [`ApproxEq`] trait and the
//! [`assert_approx_eq!`][crate::assert_approx_eq] / [`assert_approx_ne!`][crate::assert_approx_ne]
//! macros provide tolerance-based comparisons instead.
//!
//! Tolerances are always given as [`f64`]. When comparing [`Scalar::F32`] values, the tolerance is
//! converted to [`f32`] first. Integer scalars are compared by their numeric difference (and their
//! distance in representable values for ULP comparisons). Values of different [`ScalarKind`]s,
//! and vectors or matrices of different shapes, are never approximately equal.
//!
//! [`Vector`]: crate::Vector
//! [`Matrix`]: crate::Matrix
//! [`Scalar::F32`]: crate::Scalar::F32
//! [`ScalarKind`]: crate::ScalarKind

mod impls;

use std::{fmt, panic::Location};

/// Types that can be compared for *approximate equality*.
///
/// Compound types are considered equal if all of their elements are.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Type of the tolerance used for absolute and relative comparisons.
    type Tolerance: DefaultTolerances + Copy;

    /// Returns whether the absolute difference of the values is at most `abs_tolerance`.
    fn abs_diff_eq(&self, other: &Rhs, abs_tolerance: Self::Tolerance) -> bool;

    /// Returns whether the absolute difference of the values is at most the larger of the two
    /// magnitudes times `rel_tolerance`.
    fn rel_diff_eq(&self, other: &Rhs, rel_tolerance: Self::Tolerance) -> bool;

    /// Returns whether at most `ulps_tolerance` representable values lie between the values.
    ///
    /// `NaN` is never equal to anything; `-0.0` and `+0.0` are equal.
    fn ulps_diff_eq(&self, other: &Rhs, ulps_tolerance: u32) -> bool;
}

/// Default tolerances used by the assertion macros when none are configured.
pub trait DefaultTolerances {
    const DEFAULT_ABS_TOLERANCE: Self;
    const DEFAULT_REL_TOLERANCE: Self;
    const DEFAULT_ULPS_TOLERANCE: u32;
}

impl DefaultTolerances for f32 {
    const DEFAULT_ABS_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_REL_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_ULPS_TOLERANCE: u32 = 4;
}

impl DefaultTolerances for f64 {
    const DEFAULT_ABS_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_REL_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_ULPS_TOLERANCE: u32 = 4;
}

/// Assertion guard returned by [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// The assertion is checked when the guard is dropped. Before that, [`Asserter::abs`],
/// [`Asserter::rel`] and [`Asserter::ulps`] select the comparisons to perform; the values are
/// considered equal if *any* selected comparison says so. Without any of them, an absolute and a
/// relative comparison with the [`DefaultTolerances`] are performed.
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    left: &'a T,
    right: &'a T,
    kind: AssertionKind,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    abs: Option<T::Tolerance>,
    rel: Option<T::Tolerance>,
    ulps: Option<u32>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        kind: AssertionKind,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            location: Location::caller(),
            msg,
            abs: None,
            rel: None,
            ulps: None,
        }
    }

    /// Compare the absolute difference of the values against `abs`.
    pub fn abs(&mut self, abs: T::Tolerance) -> &mut Self {
        self.abs = Some(abs);
        self
    }

    /// Compare the relative difference of the values against `rel`.
    pub fn rel(&mut self, rel: T::Tolerance) -> &mut Self {
        self.rel = Some(rel);
        self
    }

    /// Compare the number of representable values between the values against `ulps`.
    pub fn ulps(&mut self, ulps: u32) -> &mut Self {
        self.ulps = Some(ulps);
        self
    }

    fn equal(&mut self) -> bool {
        let abs = self
            .abs
            .take()
            .map_or(false, |abs| T::abs_diff_eq(self.left, self.right, abs));
        let rel = self
            .rel
            .take()
            .map_or(false, |rel| T::rel_diff_eq(self.left, self.right, rel));
        let ulps = self
            .ulps
            .take()
            .map_or(false, |ulps| T::ulps_diff_eq(self.left, self.right, ulps));
        abs || rel || ulps
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    fn drop(&mut self) {
        if self.abs.is_none() && self.rel.is_none() && self.ulps.is_none() {
            self.abs = Some(T::Tolerance::DEFAULT_ABS_TOLERANCE);
            self.rel = Some(T::Tolerance::DEFAULT_REL_TOLERANCE);
        }

        let equal = self.equal();
        let failed = match self.kind {
            AssertionKind::Eq => !equal,
            AssertionKind::Ne => equal,
        };
        if failed {
            assert_failed_inner(self.left, self.right, self.kind, self.location, self.msg);
        }
    }
}

fn assert_failed_inner(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    location: &Location<'_>,
    args: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    // `#[track_caller]` has no effect on `Drop::drop`, so the location is printed manually.
    match args {
        Some(args) => panic!(
            "assertion `left {op} right` failed at {location}: {args}\n  left: {left:?}\n right: {right:?}"
        ),
        None => panic!(
            "assertion `left {op} right` failed at {location}\n  left: {left:?}\n right: {right:?}"
        ),
    }
}

#[doc(hidden)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

/// Asserts that two expressions are approximately equal (using [`ApproxEq`]).
///
/// Returns an [`Asserter`] that can be used to pick the comparison and tolerance.
///
/// # Examples
///
/// ```
/// # use mathgl::*;
/// let rot = Matrix::from_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]).unwrap();
/// let id = rot.mul(&rot.transpose()).unwrap();
/// assert_approx_eq!(id, Matrix::identity(2, ScalarKind::F64));
///
/// let v = Vector::from_slice(&[0.1f32 + 0.2, 1.0]);
/// assert_approx_eq!(v, Vector::from_slice(&[0.3f32, 1.0])).abs(1e-6);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, $crate::approx::AssertionKind::Eq, ::core::option::Option::None)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, $crate::approx::AssertionKind::Eq, ::core::option::Option::Some(::core::format_args!($($arg)+)))
    };
}

/// Asserts that two expressions are *not* approximately equal (using [`ApproxEq`]).
///
/// # Examples
///
/// ```
/// # use mathgl::*;
/// assert_approx_ne!(Scalar::F64(100.0), Scalar::F64(99.0)).abs(0.5);
/// assert_approx_ne!(Scalar::F64(1.0), Scalar::F32(1.0));
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, $crate::approx::AssertionKind::Ne, ::core::option::Option::None)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, $crate::approx::AssertionKind::Ne, ::core::option::Option::Some(::core::format_args!($($arg)+)))
    };
}

#[cfg(test)]
mod tests {
    use crate::Scalar;

    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn fail_ne() {
        assert_approx_ne!(1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn fail_eq() {
        assert_approx_eq!(Scalar::F64(1.0), Scalar::F64(2.0));
    }

    #[test]
    #[should_panic(expected = "my message")]
    fn assertion_message() {
        assert_approx_eq!(1.0, 2.0, "my message");
    }

    #[test]
    fn f32_scalars() {
        assert_approx_eq!(Scalar::F32(1.0), Scalar::F32(1.0 + f32::EPSILON)).ulps(1);
        assert_approx_ne!(Scalar::F32(1.0), Scalar::F32(1.0 + f32::EPSILON)).ulps(0);
        assert_approx_eq!(Scalar::F32(1.0), Scalar::F32(1.001)).rel(0.01);
        assert_approx_ne!(Scalar::F32(f32::NAN), Scalar::F32(f32::NAN)).abs(1.0);
    }

    #[test]
    fn integer_scalars() {
        assert_approx_eq!(Scalar::I32(-3), Scalar::I32(-3)).abs(0.0);
        assert_approx_eq!(Scalar::I32(-3), Scalar::I32(-2)).abs(1.0);
        assert_approx_eq!(Scalar::U32(10), Scalar::U32(12)).ulps(2);
        assert_approx_ne!(Scalar::U32(10), Scalar::U32(13)).ulps(2);
        assert_approx_ne!(Scalar::U32(1), Scalar::I32(1)).abs(10.0);
    }

    #[test]
    fn infinities() {
        assert_approx_eq!(Scalar::F64(f64::INFINITY), Scalar::F64(f64::INFINITY)).abs(0.0);
        assert_approx_ne!(Scalar::F64(f64::INFINITY), Scalar::F64(f64::MAX)).rel(10000.0);
        assert_approx_eq!(Scalar::F64(f64::MAX), Scalar::F64(f64::INFINITY)).ulps(1);
    }
}
