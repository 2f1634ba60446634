use std::{cmp::Ordering, fmt};

use crate::{Error, Result};

/// The numeric representation held by a [`Scalar`], [`Vector`] or [`Matrix`].
///
/// [`Vector`]: crate::Vector
/// [`Matrix`]: crate::Matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    I32,
    U32,
    F32,
    F64,
}

impl ScalarKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [ScalarKind; 4] = [Self::I32, Self::U32, Self::F32, Self::F64];

    /// Returns the additive identity of this kind.
    pub const fn zero(self) -> Scalar {
        match self {
            Self::I32 => Scalar::I32(0),
            Self::U32 => Scalar::U32(0),
            Self::F32 => Scalar::F32(0.0),
            Self::F64 => Scalar::F64(0.0),
        }
    }

    /// Returns the multiplicative identity of this kind.
    pub const fn one(self) -> Scalar {
        match self {
            Self::I32 => Scalar::I32(1),
            Self::U32 => Scalar::U32(1),
            Self::F32 => Scalar::F32(1.0),
            Self::F64 => Scalar::F64(1.0),
        }
    }

    /// Returns whether this is a floating-point kind.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I32 => "int32",
            Self::U32 => "uint32",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single numeric value of one of the four supported [`ScalarKind`]s.
///
/// Arithmetic is only defined between scalars of the same kind. Mixing kinds is reported as
/// [`Error::KindMismatch`] instead of silently converting either operand:
///
/// ```
/// # use mathgl::*;
/// let a = Scalar::from(2.0f32);
/// assert_eq!(a.mul(Scalar::from(3.0f32)), Ok(Scalar::from(6.0f32)));
/// assert!(a.add(Scalar::from(1)).is_err());
/// ```
///
/// Integer arithmetic wraps on overflow. Equality is exact and includes the kind, so
/// `Scalar::I32(1) != Scalar::F64(1.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
}

macro_rules! checked_binop {
    ($( $(#[$attr:meta])* $name:ident => $wrapping:ident, $op:tt; )+) => {
        $(
            $(#[$attr])*
            pub fn $name(self, rhs: Scalar) -> Result<Scalar> {
                match (self, rhs) {
                    (Scalar::I32(a), Scalar::I32(b)) => Ok(Scalar::I32(a.$wrapping(b))),
                    (Scalar::U32(a), Scalar::U32(b)) => Ok(Scalar::U32(a.$wrapping(b))),
                    (Scalar::F32(a), Scalar::F32(b)) => Ok(Scalar::F32(a $op b)),
                    (Scalar::F64(a), Scalar::F64(b)) => Ok(Scalar::F64(a $op b)),
                    (a, b) => Err(Error::kind_mismatch(a.kind(), b.kind())),
                }
            }
        )+
    };
}

macro_rules! conversion {
    ($( $(#[$attr:meta])* $name:ident -> $ty:ty; )+) => {
        $(
            $(#[$attr])*
            pub fn $name(self) -> $ty {
                match self {
                    Scalar::I32(v) => v as $ty,
                    Scalar::U32(v) => v as $ty,
                    Scalar::F32(v) => v as $ty,
                    Scalar::F64(v) => v as $ty,
                }
            }
        )+
    };
}

impl Scalar {
    /// Creates a scalar of the given `kind` from a raw numeric value.
    ///
    /// Conversion to the integer kinds truncates towards zero and saturates at the bounds of the
    /// target type (`NaN` becomes 0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// assert_eq!(Scalar::new(2.9, ScalarKind::I32), Scalar::I32(2));
    /// assert_eq!(Scalar::new(-1.0, ScalarKind::U32), Scalar::U32(0));
    /// assert_eq!(Scalar::new(0.5, ScalarKind::F32), Scalar::F32(0.5));
    /// ```
    pub fn new(value: f64, kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::I32 => Self::I32(value as i32),
            ScalarKind::U32 => Self::U32(value as u32),
            ScalarKind::F32 => Self::F32(value as f32),
            ScalarKind::F64 => Self::F64(value),
        }
    }

    /// Returns the representation of this scalar.
    pub const fn kind(self) -> ScalarKind {
        match self {
            Self::I32(_) => ScalarKind::I32,
            Self::U32(_) => ScalarKind::U32,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
        }
    }

    checked_binop! {
        /// Adds two scalars of the same kind.
        add => wrapping_add, +;
        /// Subtracts `rhs` from `self`. Both must have the same kind.
        sub => wrapping_sub, -;
        /// Multiplies two scalars of the same kind.
        mul => wrapping_mul, *;
    }

    /// Divides `self` by `rhs`. Both must have the same kind.
    ///
    /// Integer division truncates, and dividing an integer by zero returns
    /// [`Error::DivisionByZero`]. Float division follows IEEE 754.
    pub fn div(self, rhs: Scalar) -> Result<Scalar> {
        match (self, rhs) {
            (Scalar::I32(_), Scalar::I32(0)) | (Scalar::U32(_), Scalar::U32(0)) => {
                Err(Error::DivisionByZero)
            }
            (Scalar::I32(a), Scalar::I32(b)) => Ok(Scalar::I32(a.wrapping_div(b))),
            (Scalar::U32(a), Scalar::U32(b)) => Ok(Scalar::U32(a / b)),
            (Scalar::F32(a), Scalar::F32(b)) => Ok(Scalar::F32(a / b)),
            (Scalar::F64(a), Scalar::F64(b)) => Ok(Scalar::F64(a / b)),
            (a, b) => Err(Error::kind_mismatch(a.kind(), b.kind())),
        }
    }

    /// Negates this scalar.
    ///
    /// Negating a non-zero [`Scalar::U32`] is not representable and returns
    /// [`Error::UnsupportedKind`].
    pub fn neg(self) -> Result<Scalar> {
        match self {
            Self::I32(v) => Ok(Self::I32(v.wrapping_neg())),
            Self::U32(0) => Ok(self),
            Self::U32(_) => Err(Error::UnsupportedKind {
                op: "neg",
                kind: ScalarKind::U32,
            }),
            Self::F32(v) => Ok(Self::F32(-v)),
            Self::F64(v) => Ok(Self::F64(-v)),
        }
    }

    conversion! {
        /// Converts the value to an [`i32`], regardless of the stored kind.
        as_i32 -> i32;
        /// Converts the value to a [`u32`], regardless of the stored kind.
        as_u32 -> u32;
        /// Converts the value to an [`f32`], regardless of the stored kind.
        as_f32 -> f32;
        /// Converts the value to an [`f64`], regardless of the stored kind.
        as_f64 -> f64;
    }

    /// Returns the square root of the value, computed in [`f64`].
    pub fn sqrt(self) -> f64 {
        self.as_f64().sqrt()
    }

    /// Returns the absolute value, computed in [`f64`].
    pub fn abs_f64(self) -> f64 {
        self.as_f64().abs()
    }

    /// Multiplies the value by a float factor and converts the result back to this scalar's kind.
    ///
    /// This is how integer vectors and matrices are scaled by fractional amounts (for example
    /// during normalization): the product is truncated to the integer kind.
    pub fn mul_f64(self, factor: f64) -> Scalar {
        match self {
            Self::F32(v) => Self::F32((f64::from(v) * factor) as f32),
            _ => Self::new(self.as_f64() * factor, self.kind()),
        }
    }

    pub fn is_zero(self) -> bool {
        self == self.kind().zero()
    }
}

impl PartialOrd for Scalar {
    /// Scalars of different kinds are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::I32(a), Self::I32(b)) => a.partial_cmp(b),
            (Self::U32(a), Self::U32(b)) => a.partial_cmp(b),
            (Self::F32(a), Self::F32(b)) => a.partial_cmp(b),
            (Self::F64(a), Self::F64(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => v.fmt(f),
            Self::U32(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
        }
    }
}

/// Formats only the wrapped value with its `Debug` impl, without the variant name.
pub(crate) struct BareDebug(pub(crate) Scalar);

impl fmt::Debug for BareDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Scalar::I32(v) => v.fmt(f),
            Scalar::U32(v) => v.fmt(f),
            Scalar::F32(v) => v.fmt(f),
            Scalar::F64(v) => v.fmt(f),
        }
    }
}

macro_rules! from_native {
    ($($ty:ty => $variant:ident),+) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )+
    };
}
from_native!(i32 => I32, u32 => U32, f32 => F32, f64 => F64);
