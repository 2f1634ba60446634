use std::{array, fmt, slice};

use itertools::Itertools;

use crate::{scalar::BareDebug, Element, Error, Matrix, Operand, Result, Scalar, ScalarKind};

mod ops;

/// Vectors whose length is within this distance of zero are left unchanged by
/// [`Vector::normalize`].
pub const NORMALIZE_EPSILON: f64 = 1e-7;

/// A dynamically-sized vector whose elements all share a single [`ScalarKind`].
///
/// # Construction
///
/// - [`Vector::new`] creates an empty vector that elements can be [`push`]ed onto.
/// - [`Vector::from_scalars`] validates that every element has the declared kind.
/// - [`Vector::from_slice`] creates a vector from native Rust numbers, inferring the kind.
/// - [`Vector::zeros`] creates a vector of a given length filled with 0.
///
/// # Element Access
///
/// [`Vector`] implements [`Index<usize>`], which panics when indexing out of bounds, just like
/// slices. [`Vector::get`] and [`Vector::set`] perform checked access:
///
/// ```
/// # use mathgl::*;
/// let mut v = Vector::from_slice(&[1, 2, 3]);
/// assert_eq!(v[1], Scalar::I32(2));
/// assert_eq!(v.get(3), None);
///
/// v.set(0, Scalar::I32(7)).unwrap();
/// assert_eq!(v, Vector::from_slice(&[7, 2, 3]));
/// assert!(v.set(0, Scalar::F32(7.0)).is_err());
/// ```
///
/// # Length vs. Size
///
/// [`Vector::len`] is the *magnitude* (Euclidean length) of the vector, while [`Vector::size`] is
/// the number of elements it holds.
///
/// [`push`]: Vector::push
/// [`Index<usize>`]: std::ops::Index
#[derive(Clone, PartialEq)]
pub struct Vector {
    kind: ScalarKind,
    elements: Vec<Scalar>,
}

impl Vector {
    /// Creates an empty vector of the given kind.
    pub fn new(kind: ScalarKind) -> Self {
        Self::with_capacity(kind, 0)
    }

    /// Creates an empty vector with space for at least `capacity` elements.
    pub fn with_capacity(kind: ScalarKind, capacity: usize) -> Self {
        Self::from_raw(kind, Vec::with_capacity(capacity))
    }

    /// Creates a vector of `size` zeroes.
    pub fn zeros(kind: ScalarKind, size: usize) -> Self {
        Self::from_raw(kind, vec![kind.zero(); size])
    }

    /// Creates a vector from a list of scalars, checking that each one is of the given `kind`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let v = Vector::from_scalars(vec![Scalar::F32(1.0), Scalar::F32(2.0)], ScalarKind::F32);
    /// assert_eq!(v.unwrap().size(), 2);
    ///
    /// let err = Vector::from_scalars(vec![Scalar::F32(1.0), Scalar::I32(2)], ScalarKind::F32);
    /// assert!(err.is_err());
    /// ```
    pub fn from_scalars(elements: Vec<Scalar>, kind: ScalarKind) -> Result<Self> {
        check_kinds(&elements, kind)?;
        Ok(Self::from_raw(kind, elements))
    }

    /// Creates a vector from native numbers.
    pub fn from_slice<T: Element>(elements: &[T]) -> Self {
        Self::from_raw(T::KIND, elements.iter().map(|&e| e.into()).collect())
    }

    /// Creates a vector without validating the element kinds.
    ///
    /// Only used by operations that produce correctly-typed elements by construction.
    pub(crate) fn from_raw(kind: ScalarKind, elements: Vec<Scalar>) -> Self {
        debug_assert!(elements.iter().all(|e| e.kind() == kind));
        Self { kind, elements }
    }

    #[inline]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Returns the number of elements in this vector.
    ///
    /// This is *not* the length (magnitude) of the vector; use [`Vector::len`] for that.
    #[inline]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.elements
    }

    pub fn iter(&self) -> slice::Iter<'_, Scalar> {
        self.elements.iter()
    }

    pub fn into_scalars(self) -> Vec<Scalar> {
        self.elements
    }

    /// Returns the element at `index`, or [`None`] if out of bounds.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.elements.get(index).copied()
    }

    /// Replaces the element at `index`.
    pub fn set(&mut self, index: usize, elem: Scalar) -> Result<()> {
        self.check_kind(elem.kind())?;
        let size = self.size();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or_else(|| Error::out_of_bounds(index, size))?;
        *slot = elem;
        Ok(())
    }

    /// Appends an element to the end of the vector.
    pub fn push(&mut self, elem: Scalar) -> Result<()> {
        self.check_kind(elem.kind())?;
        self.elements.push(elem);
        Ok(())
    }

    /// Appends all `elems` to the vector.
    ///
    /// If any element has the wrong kind, an error is returned and the vector is left unchanged.
    pub fn extend_from_slice(&mut self, elems: &[Scalar]) -> Result<()> {
        check_kinds(elems, self.kind)?;
        self.elements.extend_from_slice(elems);
        Ok(())
    }

    /// Returns the only element of a 1-element vector.
    pub fn to_scalar(&self) -> Result<Scalar> {
        match self.elements.as_slice() {
            [elem] => Ok(*elem),
            _ => Err(Error::unsupported_shape(
                "to_scalar",
                format_args!("vector of size {}", self.size()),
            )),
        }
    }

    /// Converts a vector with 1 to 4 elements into an array.
    ///
    /// `T` must match the vector's kind and `N` must match its size.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let v = Vector::from_slice(&[1u32, 2]);
    /// assert_eq!(v.as_array::<u32, 2>(), Ok([1, 2]));
    /// assert!(v.as_array::<u32, 3>().is_err());
    /// assert!(v.as_array::<i32, 2>().is_err());
    /// ```
    pub fn as_array<T: Element, const N: usize>(&self) -> Result<[T; N]> {
        if !(1..=4).contains(&N) || N != self.size() {
            return Err(Error::unsupported_shape(
                "as_array",
                format_args!("vector of size {} as [_; {N}]", self.size()),
            ));
        }
        self.check_kind(T::KIND)?;
        Ok(array::from_fn(|i| T::cast(self.elements[i])))
    }

    /// Turns this vector into a row (1xN) or column (Nx1) matrix.
    pub fn as_matrix(&self, as_row: bool) -> Matrix {
        let (rows, cols) = if as_row {
            (1, self.size())
        } else {
            (self.size(), 1)
        };
        Matrix::from_raw(rows, cols, self.kind, self.elements.clone())
    }

    /// Element-wise addition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let a = Vector::from_slice(&[1, 2]);
    /// let b = Vector::from_slice(&[10, 20]);
    /// assert_eq!(a.add(&b), Ok(Vector::from_slice(&[11, 22])));
    ///
    /// let c = Vector::from_slice(&[1.0f32, 2.0]);
    /// assert!(a.add(&c).is_err());
    /// ```
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, "add", Scalar::add)
    }

    /// Element-wise subtraction.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, "sub", Scalar::sub)
    }

    /// Computes the dot product between `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let a = Vector::from_slice(&[1, 3, -5]);
    /// let b = Vector::from_slice(&[4, -2, -1]);
    /// assert_eq!(a.dot(&b), Ok(Scalar::I32(3)));
    /// ```
    pub fn dot(&self, other: &Vector) -> Result<Scalar> {
        self.check_compatible(other, "dot")?;
        self.elements
            .iter()
            .zip_eq(&other.elements)
            .try_fold(self.kind.zero(), |acc, (&a, &b)| acc.add(a.mul(b)?))
    }

    /// Computes the cross product of two 3-element vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let x = Vector::from_slice(&[1, 0, 0]);
    /// let y = Vector::from_slice(&[0, 1, 0]);
    /// assert_eq!(x.cross(&y), Ok(Vector::from_slice(&[0, 0, 1])));
    /// ```
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        self.check_compatible(other, "cross")?;
        let (a, b) = match (self.elements.as_slice(), other.elements.as_slice()) {
            (&[a0, a1, a2], &[b0, b1, b2]) => ([a0, a1, a2], [b0, b1, b2]),
            _ => {
                return Err(Error::unsupported_shape(
                    "cross",
                    format_args!("vector of size {}", self.size()),
                ))
            }
        };

        let term = |i: usize, j: usize| -> Result<Scalar> { a[i].mul(b[j])?.sub(a[j].mul(b[i])?) };
        Ok(Self::from_raw(
            self.kind,
            vec![term(1, 2)?, term(2, 0)?, term(0, 1)?],
        ))
    }

    /// Multiplies every element by `c`, which must have the vector's kind.
    pub fn scalar_mul(&self, c: Scalar) -> Result<Vector> {
        self.check_kind(c.kind())?;
        let elements = self
            .elements
            .iter()
            .map(|e| e.mul(c))
            .collect::<Result<_>>()?;
        Ok(Self::from_raw(self.kind, elements))
    }

    /// Returns the length (magnitude) of this vector.
    ///
    /// The dot product is computed in the vector's own kind (so integer vectors may wrap), and
    /// its square root in [`f64`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// assert_eq!(Vector::from_slice(&[3, 4]).len(), 5.0);
    /// ```
    pub fn len(&self) -> f64 {
        match self.dot(self) {
            Ok(dot) => dot.sqrt(),
            // a vector always matches its own kind and size
            Err(_) => unreachable!(),
        }
    }

    /// Divides this vector by its length, resulting in a unit vector.
    ///
    /// If the length is within [`NORMALIZE_EPSILON`] of zero, the vector is returned unchanged
    /// instead, since there is no meaningful direction to preserve. The same happens when the length
    /// is not finite, which integer vectors hit when their dot product wraps.
    ///
    /// Integer vectors are scaled in [`f64`] and truncated back to their kind.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let z = Vector::from_slice(&[0.0, 0.0, 4.0]).normalize();
    /// assert_eq!(z, Vector::from_slice(&[0.0, 0.0, 1.0]));
    ///
    /// let zero = Vector::zeros(ScalarKind::F32, 3);
    /// assert_eq!(zero.normalize(), zero);
    /// ```
    pub fn normalize(&self) -> Vector {
        let length = self.len();
        if !length.is_finite() || length.abs() < NORMALIZE_EPSILON {
            return self.clone();
        }
        self.float_scale(1.0 / length)
    }

    pub(crate) fn float_scale(&self, factor: f64) -> Vector {
        Self::from_raw(
            self.kind,
            self.elements.iter().map(|e| e.mul_f64(factor)).collect(),
        )
    }

    /// Computes the outer product `self * otherᵀ`, an `N`x`M` matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let a = Vector::from_slice(&[1, 2]);
    /// let b = Vector::from_slice(&[3, 4, 5]);
    /// let m = a.outer_product(&b).unwrap();
    /// assert_eq!((m.rows(), m.cols()), (2, 3));
    /// assert_eq!(m[(1, 2)], Scalar::I32(10));
    /// ```
    pub fn outer_product(&self, other: &Vector) -> Result<Matrix> {
        self.check_kind(other.kind)?;
        self.as_matrix(false).mul(&other.as_matrix(true))
    }

    /// Multiplies this vector with a vector or matrix.
    ///
    /// - A [`Vector`] operand yields the 1x1 matrix holding the *inner* (dot) product. Use
    ///   [`Vector::outer_product`] for the outer product.
    /// - A [`Matrix`] operand treats `self` as a row vector, yielding a 1xN matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let v = Vector::from_slice(&[1, 2]);
    /// assert_eq!(v.mul(&v).unwrap()[(0, 0)], Scalar::I32(5));
    ///
    /// let m = Matrix::from_slice(2, 2, &[1, 2, 3, 4]).unwrap();
    /// assert_eq!(v.mul(&m), Matrix::from_slice(1, 2, &[7, 10]));
    /// ```
    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        match rhs.into() {
            Operand::Vector(vec) => {
                let dot = self.dot(vec)?;
                Ok(Matrix::from_raw(1, 1, self.kind, vec![dot]))
            }
            Operand::Matrix(mat) => {
                self.check_kind(mat.kind())?;
                self.as_matrix(true).mul(mat)
            }
        }
    }

    /// Returns whether `self` and `other` have the same kind, size and elements.
    pub fn equal(&self, other: &Vector) -> bool {
        self == other
    }

    fn check_kind(&self, kind: ScalarKind) -> Result<()> {
        if kind == self.kind {
            Ok(())
        } else {
            Err(Error::kind_mismatch(self.kind, kind))
        }
    }

    fn check_compatible(&self, other: &Vector, op: &'static str) -> Result<()> {
        self.check_kind(other.kind)?;
        if self.size() != other.size() {
            return Err(Error::dimension_mismatch(op, self.size(), other.size()));
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Vector, op: &'static str, f: F) -> Result<Vector>
    where
        F: Fn(Scalar, Scalar) -> Result<Scalar>,
    {
        self.check_compatible(other, op)?;
        let elements = self
            .elements
            .iter()
            .zip_eq(&other.elements)
            .map(|(&a, &b)| f(a, b))
            .collect::<Result<_>>()?;
        Ok(Self::from_raw(self.kind, elements))
    }
}

pub(crate) fn check_kinds(elements: &[Scalar], kind: ScalarKind) -> Result<()> {
    match elements.iter().find(|e| e.kind() != kind) {
        Some(e) => Err(Error::kind_mismatch(kind, e.kind())),
        None => Ok(()),
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("");
        for &elem in &self.elements {
            tup.field(&BareDebug(elem));
        }
        tup.finish()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.elements.iter().format(", "))
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Scalar;
    type IntoIter = slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    fn f32s(v: &[f32]) -> Vector {
        Vector::from_slice(v)
    }

    #[test]
    fn construction() {
        let mut v = Vector::new(ScalarKind::U32);
        assert!(v.is_empty());
        v.push(Scalar::U32(1)).unwrap();
        v.extend_from_slice(&[Scalar::U32(2), Scalar::U32(3)]).unwrap();
        assert_eq!(v, Vector::from_slice(&[1u32, 2, 3]));

        assert!(v.push(Scalar::I32(4)).is_err());
        assert!(v
            .extend_from_slice(&[Scalar::U32(4), Scalar::F64(5.0)])
            .is_err());
        assert_eq!(v.size(), 3, "failed extend must not append anything");
        assert_eq!(
            v.into_scalars(),
            [Scalar::U32(1), Scalar::U32(2), Scalar::U32(3)]
        );

        assert_eq!(Vector::zeros(ScalarKind::F64, 2), Vector::from_slice(&[0.0, 0.0]));
    }

    #[test]
    fn checked_access() {
        let mut v = Vector::from_slice(&[1, 2]);
        assert_eq!(v.get(1), Some(Scalar::I32(2)));
        assert_eq!(v.get(2), None);
        assert!(matches!(
            v.set(2, Scalar::I32(0)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            v.set(0, Scalar::U32(0)),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn to_scalar() {
        assert_eq!(Vector::from_slice(&[9]).to_scalar(), Ok(Scalar::I32(9)));
        assert!(Vector::from_slice(&[9, 9]).to_scalar().is_err());
        assert!(Vector::new(ScalarKind::I32).to_scalar().is_err());
    }

    #[test]
    fn add_sub() {
        let a = f32s(&[1.0, 2.0, 3.0]);
        let b = f32s(&[0.5, 0.25, -1.0]);
        assert_eq!(a.add(&b), Ok(f32s(&[1.5, 2.25, 2.0])));
        assert_eq!(a.sub(&b), Ok(f32s(&[0.5, 1.75, 4.0])));
        assert_approx_eq!(a.add(&b).unwrap().sub(&b).unwrap(), a);
    }

    #[test]
    fn mismatches() {
        let ints = Vector::from_slice(&[1, 2, 3]);
        let floats = f32s(&[1.0, 2.0, 3.0]);
        assert_eq!(
            ints.add(&floats),
            Err(Error::KindMismatch {
                expected: ScalarKind::I32,
                found: ScalarKind::F32,
            })
        );
        assert!(matches!(
            ints.sub(&Vector::from_slice(&[1, 2])),
            Err(Error::DimensionMismatch { op: "sub", .. })
        ));
        assert!(ints.dot(&floats).is_err());
        assert!(ints.scalar_mul(Scalar::F32(2.0)).is_err());
        assert!(ints.outer_product(&floats).is_err());
    }

    #[test]
    fn cross() {
        let x = Vector::from_slice(&[1, 0, 0]);
        let y = Vector::from_slice(&[0, 1, 0]);
        let z = Vector::from_slice(&[0, 0, 1]);
        assert_eq!(x.cross(&y), Ok(z.clone()));
        assert_eq!(y.cross(&z), Ok(x.clone()));
        assert_eq!(y.cross(&x), Ok(Vector::from_slice(&[0, 0, -1])));

        let a = Vector::from_slice(&[1, 2]);
        assert!(matches!(
            a.cross(&a),
            Err(Error::UnsupportedShape { op: "cross", .. })
        ));
    }

    #[test]
    fn length() {
        assert_eq!(Vector::from_slice(&[3, 4]).len(), 5.0);
        assert_eq!(f32s(&[3.0, 4.0]).len(), 5.0);
        assert_eq!(Vector::new(ScalarKind::F64).len(), 0.0);
        assert_eq!(Vector::from_slice(&[3, 4]).size(), 2);
    }

    #[test]
    fn normalize() {
        let v = f32s(&[3.0, 0.0, 4.0]).normalize();
        assert_approx_eq!(v, f32s(&[0.6, 0.0, 0.8])).abs(1e-6);
        assert_approx_eq!(v.len(), 1.0).abs(1e-6);

        let tiny = Vector::from_slice(&[1e-9, 0.0]);
        assert_eq!(tiny.normalize(), tiny);

        // integer vectors are truncated
        assert_eq!(
            Vector::from_slice(&[0, 5]).normalize(),
            Vector::from_slice(&[0, 1])
        );

        // 50000² wraps to a negative i32
        let wrapped = Vector::from_slice(&[50000, 0]);
        assert!(wrapped.len().is_nan());
        assert_eq!(wrapped.normalize(), wrapped);
    }

    #[test]
    fn scalar_mul() {
        let v = Vector::from_slice(&[1u32, 2, 3]);
        assert_eq!(
            v.scalar_mul(Scalar::U32(3)),
            Ok(Vector::from_slice(&[3u32, 6, 9]))
        );
    }

    #[test]
    fn as_matrix() {
        let v = Vector::from_slice(&[1, 2, 3]);
        let row = v.as_matrix(true);
        let col = v.as_matrix(false);
        assert_eq!((row.rows(), row.cols()), (1, 3));
        assert_eq!((col.rows(), col.cols()), (3, 1));
        assert_eq!(row.transpose(), col);
        assert_eq!(col.as_vector(), Ok(v));
    }

    #[rustfmt::skip]
    #[test]
    fn products() {
        let a = Vector::from_slice(&[1, 2]);
        let b = Vector::from_slice(&[3, 4]);

        let inner = a.mul(&b).unwrap();
        assert_eq!(inner, Matrix::from_slice(1, 1, &[11]).unwrap());

        let outer = a.outer_product(&b).unwrap();
        assert_eq!(outer, Matrix::from_slice(2, 2, &[
            3, 4,
            6, 8,
        ]).unwrap());

        let m = Matrix::from_slice(2, 3, &[
            1, 0, 2,
            0, 1, 3,
        ]).unwrap();
        assert_eq!(a.mul(&m), Matrix::from_slice(1, 3, &[1, 2, 8]));
        assert!(Vector::from_slice(&[1, 2, 3]).mul(&m).is_err());
        assert!(f32s(&[1.0, 2.0]).mul(&m).is_err());
    }

    #[test]
    fn as_array() {
        let v = f32s(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.as_array::<f32, 4>(), Ok([1.0, 2.0, 3.0, 4.0]));
        assert!(v.as_array::<f64, 4>().is_err());

        let five = f32s(&[0.0; 5]);
        assert!(matches!(
            five.as_array::<f32, 5>(),
            Err(Error::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn fmt() {
        let v = f32s(&[0.0, 1.5]);
        assert_eq!(format!("{v}"), "(0, 1.5)");
        assert_eq!(format!("{v:?}"), "(0.0, 1.5)");
    }
}
