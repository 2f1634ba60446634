use std::{array, fmt};

use itertools::{iproduct, Itertools};

use crate::{
    scalar::BareDebug, vector::check_kinds, Element, Error, Operand, Result, Scalar, ScalarKind,
    Vector,
};

mod det;
mod ops;

pub use det::SINGULAR_EPSILON;

/// Element counts [`Matrix::as_array`] can convert to a fixed-size array.
///
/// These are all matrix shapes with 1 to 4 rows and 1 to 4 columns, which is what graphics APIs
/// accept as uniform data.
pub const SUPPORTED_ARRAY_LENS: [usize; 9] = [1, 2, 3, 4, 6, 8, 9, 12, 16];

/// A dynamically-sized, row-major matrix whose elements all share a single [`ScalarKind`].
///
/// # Construction
///
/// - [`Matrix::new`] creates an `m`x`n` matrix filled with 0.
/// - [`Matrix::identity`] creates a square identity matrix.
/// - [`Matrix::from_rows`] and [`Matrix::from_cols`] build a matrix from nested rows or columns.
/// - [`Matrix::from_row_major`] takes a flat list of elements in row-major order.
/// - [`Matrix::from_slice`] does the same with native numbers, inferring the kind.
/// - [`Matrix::from_fn`] invokes a closure with the row and column of each element.
///
/// All of them validate the element kinds and dimensions.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] for `(row, col)` tuples, which panics when out of bounds.
/// [`Matrix::get`] and [`Matrix::set`] perform checked access:
///
/// ```
/// # use mathgl::*;
/// let mut mat = Matrix::from_slice(1, 2, &[0, 1]).unwrap();
/// mat.set(0, 0, Scalar::I32(4)).unwrap();
/// assert_eq!(mat[(0, 0)], Scalar::I32(4));
/// assert_eq!(mat.get(0, 1), Some(Scalar::I32(1)));
/// assert_eq!(mat.get(0, 2), None);
/// ```
///
/// [`Index`]: std::ops::Index
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    kind: ScalarKind,
    elements: Vec<Scalar>,
}

impl Matrix {
    /// Creates a `rows`x`cols` matrix with every element set to 0.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows a `usize`, like [`vec!`] does for oversized lengths.
    /// [`Matrix::from_row_major`] and [`Matrix::from_fn`] report this as an error instead.
    pub fn new(rows: usize, cols: usize, kind: ScalarKind) -> Self {
        Self::from_raw(rows, cols, kind, vec![kind.zero(); rows * cols])
    }

    /// Creates the `size`x`size` identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let id = Matrix::identity(2, ScalarKind::U32);
    /// assert_eq!(id, Matrix::from_slice(2, 2, &[1u32, 0, 0, 1]).unwrap());
    /// ```
    pub fn identity(size: usize, kind: ScalarKind) -> Self {
        let elements = iproduct!(0..size, 0..size)
            .map(|(i, j)| if i == j { kind.one() } else { kind.zero() })
            .collect();
        Self::from_raw(size, size, kind, elements)
    }

    /// Creates a matrix from a list of rows.
    ///
    /// All rows must have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let rows = Matrix::from_rows(&[
    ///     [Scalar::I32(1), Scalar::I32(1)],
    ///     [Scalar::I32(0), Scalar::I32(1)],
    /// ], ScalarKind::I32).unwrap();
    /// let cols = Matrix::from_cols(&[
    ///     [Scalar::I32(1), Scalar::I32(0)],
    ///     [Scalar::I32(1), Scalar::I32(1)],
    /// ], ScalarKind::I32).unwrap();
    /// assert_eq!(rows, cols);
    /// ```
    pub fn from_rows<R: AsRef<[Scalar]>>(rows: &[R], kind: ScalarKind) -> Result<Self> {
        let cols = uniform_len(rows, "from_rows")?;
        let elements = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect::<Vec<_>>();
        check_kinds(&elements, kind)?;
        Ok(Self::from_raw(rows.len(), cols, kind, elements))
    }

    /// Creates a matrix from a list of columns.
    ///
    /// All columns must have the same length.
    pub fn from_cols<C: AsRef<[Scalar]>>(cols: &[C], kind: ScalarKind) -> Result<Self> {
        let rows = uniform_len(cols, "from_cols")?;
        let elements = iproduct!(0..rows, 0..cols.len())
            .map(|(row, col)| cols[col].as_ref()[row])
            .collect::<Vec<_>>();
        check_kinds(&elements, kind)?;
        Ok(Self::from_raw(rows, cols.len(), kind, elements))
    }

    /// Creates a `rows`x`cols` matrix from its elements in row-major order.
    pub fn from_row_major(
        elements: Vec<Scalar>,
        kind: ScalarKind,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        if element_count("from_row_major", rows, cols)? != elements.len() {
            return Err(Error::dimension_mismatch(
                "from_row_major",
                format_args!("{rows}x{cols}"),
                format_args!("{} elements", elements.len()),
            ));
        }
        check_kinds(&elements, kind)?;
        Ok(Self::from_raw(rows, cols, kind, elements))
    }

    /// Creates a `rows`x`cols` matrix from native numbers in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let mat = Matrix::from_slice(2, 3, &[
    ///     0.0f32, 1.0, 2.0,
    ///     3.0, 4.0, 5.0,
    /// ]).unwrap();
    /// assert_eq!(mat[(1, 0)], Scalar::F32(3.0));
    ///
    /// assert!(Matrix::from_slice(2, 2, &[1, 2, 3]).is_err());
    /// ```
    pub fn from_slice<T: Element>(rows: usize, cols: usize, elements: &[T]) -> Result<Self> {
        Self::from_row_major(
            elements.iter().map(|&e| e.into()).collect(),
            T::KIND,
            rows,
            cols,
        )
    }

    /// Creates a matrix by invoking a closure with the position (row and column) of each element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let mat = Matrix::from_fn(2, 3, ScalarKind::U32, |row, col| {
    ///     Scalar::U32((row * 10 + col) as u32)
    /// }).unwrap();
    /// assert_eq!(mat, Matrix::from_slice(2, 3, &[
    ///      0u32,  1,  2,
    ///     10, 11, 12,
    /// ]).unwrap());
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, kind: ScalarKind, mut cb: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Scalar,
    {
        element_count("from_fn", rows, cols)?;
        let elements = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| cb(row, col))
            .collect::<Vec<_>>();
        check_kinds(&elements, kind)?;
        Ok(Self::from_raw(rows, cols, kind, elements))
    }

    /// Creates a matrix without validating the element kinds.
    ///
    /// Used by operations whose result is well-typed by construction.
    pub(crate) fn from_raw(
        rows: usize,
        cols: usize,
        kind: ScalarKind,
        elements: Vec<Scalar>,
    ) -> Self {
        debug_assert_eq!(rows * cols, elements.len());
        debug_assert!(elements.iter().all(|e| e.kind() == kind));
        Self {
            rows,
            cols,
            kind,
            elements,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Returns the total number of elements (`rows * cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.elements
    }

    /// Returns a copy of the elements in row-major order.
    pub fn to_vec(&self) -> Vec<Scalar> {
        self.elements.clone()
    }

    /// Returns the shape as text, eg. `3x4`.
    pub(crate) fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    /// Returns the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Scalar> {
        if row < self.rows && col < self.cols {
            Some(self.elements[row * self.cols + col])
        } else {
            None
        }
    }

    /// Replaces the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, elem: Scalar) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::out_of_bounds(
                format_args!("({row}, {col})"),
                self.shape(),
            ));
        }
        self.check_kind(elem.kind())?;
        self.elements[row * self.cols + col] = elem;
        Ok(())
    }

    /// Returns row `row` as a vector, or [`None`] if out of bounds.
    pub fn row(&self, row: usize) -> Option<Vector> {
        (row < self.rows).then(|| {
            let start = row * self.cols;
            Vector::from_raw(self.kind, self.elements[start..start + self.cols].to_vec())
        })
    }

    /// Returns column `col` as a vector, or [`None`] if out of bounds.
    pub fn col(&self, col: usize) -> Option<Vector> {
        (col < self.cols).then(|| {
            Vector::from_raw(
                self.kind,
                self.elements.iter().skip(col).step_by(self.cols).copied().collect(),
            )
        })
    }

    /// Returns the only element of a 1x1 matrix.
    pub fn to_scalar(&self) -> Result<Scalar> {
        match self.elements.as_slice() {
            [elem] => Ok(*elem),
            _ => Err(Error::unsupported_shape("to_scalar", self.shape())),
        }
    }

    /// Converts a row (1xN) or column (Nx1) matrix to a [`Vector`].
    pub fn as_vector(&self) -> Result<Vector> {
        if self.rows != 1 && self.cols != 1 {
            return Err(Error::unsupported_shape("as_vector", self.shape()));
        }
        Ok(Vector::from_raw(self.kind, self.elements.clone()))
    }

    /// Element-wise addition.
    ///
    /// Only the element counts need to match; the result has the shape of `self`.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "add", Scalar::add)
    }

    /// Element-wise subtraction.
    ///
    /// Only the element counts need to match; the result has the shape of `self`.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "sub", Scalar::sub)
    }

    /// Multiplies every element by `c`, which must have the matrix's kind.
    pub fn scalar_mul(&self, c: Scalar) -> Result<Matrix> {
        self.check_kind(c.kind())?;
        let elements = self
            .elements
            .iter()
            .map(|e| e.mul(c))
            .collect::<Result<_>>()?;
        Ok(Self::from_raw(self.rows, self.cols, self.kind, elements))
    }

    /// Computes the matrix product of `self` with a matrix or (column) vector.
    ///
    /// - A [`Matrix`] operand must have as many rows as `self` has columns; the result has
    ///   `self.rows()` rows and `rhs.cols()` columns.
    /// - A [`Vector`] operand is treated as a column vector, so its size must equal
    ///   `self.cols()`; the result is a column matrix.
    /// - A 1x1 `self` acts as a scalar multiplier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let a = Matrix::from_slice(2, 2, &[0, 1, 2, 3]).unwrap();
    /// let v = Vector::from_slice(&[4, 5]);
    /// assert_eq!(a.mul(&v), Matrix::from_slice(2, 1, &[5, 23]));
    ///
    /// let b = Matrix::from_slice(2, 1, &[1, 1]).unwrap();
    /// assert_eq!(a.mul(&b), Matrix::from_slice(2, 1, &[1, 5]));
    /// assert!(b.mul(&a).is_err());
    /// ```
    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        match rhs.into() {
            Operand::Vector(vec) => {
                self.check_kind(vec.kind())?;
                if self.cols != vec.size() {
                    return Err(Error::dimension_mismatch(
                        "mul",
                        self.shape(),
                        format_args!("{}x1", vec.size()),
                    ));
                }
                if let [factor] = self.elements[..] {
                    return Ok(vec.scalar_mul(factor)?.as_matrix(false));
                }
                self.mul_raw(vec.as_slice(), 1)
            }
            Operand::Matrix(mat) => {
                self.check_kind(mat.kind)?;
                if self.cols != mat.rows {
                    return Err(Error::dimension_mismatch("mul", self.shape(), mat.shape()));
                }
                if let [factor] = self.elements[..] {
                    return mat.scalar_mul(factor);
                }
                self.mul_raw(&mat.elements, mat.cols)
            }
        }
    }

    /// Multiplies `self` with a row-major `self.cols`x`rhs_cols` operand.
    fn mul_raw(&self, rhs: &[Scalar], rhs_cols: usize) -> Result<Matrix> {
        let n = self.cols;
        let elements = iproduct!(0..self.rows, 0..rhs_cols)
            .map(|(i, j)| {
                (0..n).try_fold(self.kind.zero(), |acc, k| {
                    acc.add(self.elements[i * n + k].mul(rhs[k * rhs_cols + j])?)
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self::from_raw(self.rows, rhs_cols, self.kind, elements))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let mat = Matrix::from_slice(2, 3, &[
    ///     0, 1, 2,
    ///     3, 4, 5,
    /// ]).unwrap();
    /// assert_eq!(mat.transpose(), Matrix::from_slice(3, 2, &[
    ///     0, 3,
    ///     1, 4,
    ///     2, 5,
    /// ]).unwrap());
    /// ```
    pub fn transpose(&self) -> Matrix {
        let elements = iproduct!(0..self.cols, 0..self.rows)
            .map(|(col, row)| self.elements[row * self.cols + col])
            .collect();
        Self::from_raw(self.cols, self.rows, self.kind, elements)
    }

    pub(crate) fn float_scale(&self, factor: f64) -> Matrix {
        Self::from_raw(
            self.rows,
            self.cols,
            self.kind,
            self.elements.iter().map(|e| e.mul_f64(factor)).collect(),
        )
    }

    /// Converts the matrix into a fixed-size array of its elements in row-major order.
    ///
    /// This is meant to hand matrices to APIs that expect native arrays, like graphics uniforms.
    /// The element count `N` must equal `rows * cols` and be one of [`SUPPORTED_ARRAY_LENS`]
    /// (both dimensions at most 4), and `T` must match the matrix kind.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let mvp = Matrix::identity(4, ScalarKind::F32);
    /// let uniform: [f32; 16] = mvp.as_array().unwrap();
    /// assert_eq!(uniform[5], 1.0);
    ///
    /// assert!(mvp.as_array::<f64, 16>().is_err());
    /// assert!(Matrix::identity(5, ScalarKind::F32).as_array::<f32, 25>().is_err());
    /// ```
    pub fn as_array<T: Element, const N: usize>(&self) -> Result<[T; N]> {
        self.check_array_shape("as_array", N)?;
        self.check_kind(T::KIND)?;
        Ok(array::from_fn(|i| T::cast(self.elements[i])))
    }

    /// Like [`Matrix::as_array`], but returns the elements in column-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mathgl::*;
    /// let mat = Matrix::from_slice(2, 2, &[1, 2, 3, 4]).unwrap();
    /// assert_eq!(mat.as_col_major_array::<i32, 4>(), Ok([1, 3, 2, 4]));
    /// ```
    pub fn as_col_major_array<T: Element, const N: usize>(&self) -> Result<[T; N]> {
        self.check_array_shape("as_col_major_array", N)?;
        self.check_kind(T::KIND)?;
        Ok(array::from_fn(|i| {
            let (col, row) = (i / self.rows, i % self.rows);
            T::cast(self.elements[row * self.cols + col])
        }))
    }

    /// Returns the row-major elements as native-endian bytes.
    ///
    /// Accepts the same shapes as [`Matrix::as_array`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.check_array_shape("to_bytes", self.len())?;
        Ok(match self.kind {
            ScalarKind::I32 => bytes_of::<i32>(&self.elements),
            ScalarKind::U32 => bytes_of::<u32>(&self.elements),
            ScalarKind::F32 => bytes_of::<f32>(&self.elements),
            ScalarKind::F64 => bytes_of::<f64>(&self.elements),
        })
    }

    /// Returns whether `self` and `other` have the same kind, shape and elements.
    pub fn equal(&self, other: &Matrix) -> bool {
        self == other
    }

    fn check_array_shape(&self, op: &'static str, len: usize) -> Result<()> {
        let supported = (1..=4).contains(&self.rows)
            && (1..=4).contains(&self.cols)
            && len == self.len()
            && SUPPORTED_ARRAY_LENS.contains(&len);
        if supported {
            Ok(())
        } else {
            Err(Error::unsupported_shape(
                op,
                format_args!("{} as [_; {len}]", self.shape()),
            ))
        }
    }

    fn check_kind(&self, kind: ScalarKind) -> Result<()> {
        if kind == self.kind {
            Ok(())
        } else {
            Err(Error::kind_mismatch(self.kind, kind))
        }
    }

    fn zip_with<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(Scalar, Scalar) -> Result<Scalar>,
    {
        self.check_kind(other.kind)?;
        if self.len() != other.len() {
            return Err(Error::dimension_mismatch(op, self.shape(), other.shape()));
        }
        let elements = self
            .elements
            .iter()
            .zip_eq(&other.elements)
            .map(|(&a, &b)| f(a, b))
            .collect::<Result<_>>()?;
        Ok(Self::from_raw(self.rows, self.cols, self.kind, elements))
    }
}

fn element_count(op: &'static str, rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        Error::dimension_mismatch(op, format_args!("{rows}x{cols}"), "more than usize::MAX elements")
    })
}

fn uniform_len<R: AsRef<[Scalar]>>(lists: &[R], op: &'static str) -> Result<usize> {
    let len = lists.first().map_or(0, |list| list.as_ref().len());
    match lists.iter().find(|list| list.as_ref().len() != len) {
        Some(list) => Err(Error::dimension_mismatch(op, len, list.as_ref().len())),
        None => Ok(len),
    }
}

fn bytes_of<T: Element>(elements: &[Scalar]) -> Vec<u8> {
    let values = elements.iter().map(|&e| T::cast(e)).collect::<Vec<T>>();
    bytemuck::cast_slice(&values).to_vec()
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a>(&'a [Scalar]);
        impl fmt::Debug for FormatRow<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (i, &elem) in self.0.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", BareDebug(elem))?;
                }
                write!(f, "]")
            }
        }

        let mut list = f.debug_list();
        if self.cols > 0 {
            for row in self.elements.chunks(self.cols) {
                list.entry(&FormatRow(row));
            }
        }
        list.finish()
    }
}
