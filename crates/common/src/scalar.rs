//! Fixed-width operand values.
//!
//! The evaluator and stack memory are generic over operand width: the same
//! opcode stream is reinterpreted as 1/2/4/8-byte unsigned integers depending
//! on which bytecode instruction requested evaluation. [`Scalar`] is the
//! conversion boundary for that reinterpretation — all byte-level encoding
//! goes through it, always little-endian.

use std::fmt::{Debug, Display};

/// Pointer-width value.
///
/// Materialized addresses are base-relative stack offsets, not native
/// pointers, so the width is fixed at 64 bits on every platform.
pub type Ptr = u64;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned integer usable as a VM operand.
///
/// Implemented for `u8`, `u16`, `u32`, and `u64` only; the trait is sealed.
pub trait Scalar: sealed::Sealed + Copy + PartialEq + Debug + Display {
    /// Encoded width in bytes.
    const WIDTH: usize;
    const ZERO: Self;
    const ONE: Self;

    /// Decode from the first `WIDTH` bytes of `bytes`, little-endian.
    ///
    /// Callers must supply at least `WIDTH` bytes.
    fn from_le(bytes: &[u8]) -> Self;

    /// Encode into the first `WIDTH` bytes of `out`, little-endian.
    ///
    /// Callers must supply at least `WIDTH` bytes.
    fn write_le(self, out: &mut [u8]);

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn checked_div(self, rhs: Self) -> Option<Self>;

    fn is_zero(self) -> bool;

    /// Widen to a byte offset. Lossless for every implementor.
    fn to_offset(self) -> usize;

    /// Truncate a byte offset into this width.
    fn from_offset(offset: usize) -> Self;
}

macro_rules! impl_scalar {
    ($ty:ty) => {
        impl Scalar for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();
            const ZERO: Self = 0;
            const ONE: Self = 1;

            fn from_le(bytes: &[u8]) -> Self {
                let arr = bytes[..Self::WIDTH]
                    .try_into()
                    .expect("caller supplies at least WIDTH bytes");
                <$ty>::from_le_bytes(arr)
            }

            fn write_le(self, out: &mut [u8]) {
                out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
            }

            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }

            fn wrapping_mul(self, rhs: Self) -> Self {
                <$ty>::wrapping_mul(self, rhs)
            }

            fn checked_div(self, rhs: Self) -> Option<Self> {
                <$ty>::checked_div(self, rhs)
            }

            fn is_zero(self) -> bool {
                self == 0
            }

            fn to_offset(self) -> usize {
                self as usize
            }

            fn from_offset(offset: usize) -> Self {
                offset as $ty
            }
        }
    };
}

impl_scalar!(u8);
impl_scalar!(u16);
impl_scalar!(u32);
impl_scalar!(u64);
