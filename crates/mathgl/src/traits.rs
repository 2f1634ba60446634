use crate::{Scalar, ScalarKind};

/// Native Rust types that can be stored in a [`Scalar`].
///
/// This is implemented for exactly the four supported element types ([`i32`], [`u32`], [`f32`]
/// and [`f64`]) and allows typed construction and extraction of vectors and matrices without
/// spelling out a [`ScalarKind`]:
///
/// ```
/// # use mathgl::*;
/// let v = Vector::from_slice(&[1.0f32, 2.0, 3.0]);
/// assert_eq!(v.kind(), f32::KIND);
/// assert_eq!(v.as_array::<f32, 3>(), Ok([1.0, 2.0, 3.0]));
/// ```
pub trait Element: Copy + Into<Scalar> + bytemuck::Pod + Send + Sync + 'static {
    /// The [`ScalarKind`] corresponding to `Self`.
    const KIND: ScalarKind;

    /// Converts `scalar` to `Self`, regardless of its kind (`as` semantics).
    fn cast(scalar: Scalar) -> Self;

    /// Returns the value of `scalar` if its kind is [`Self::KIND`].
    fn from_scalar(scalar: Scalar) -> Option<Self> {
        (scalar.kind() == Self::KIND).then(|| Self::cast(scalar))
    }
}

macro_rules! element {
    ($($ty:ty => $kind:ident, $cast:ident);+ $(;)?) => {
        $(
            impl Element for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                #[inline]
                fn cast(scalar: Scalar) -> Self {
                    scalar.$cast()
                }
            }
        )+
    };
}

element! {
    i32 => I32, as_i32;
    u32 => U32, as_u32;
    f32 => F32, as_f32;
    f64 => F64, as_f64;
}
