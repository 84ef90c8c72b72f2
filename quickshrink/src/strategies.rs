//! Built-in candidate generators for the primitive kinds.
//!
//! Every generator emits strictly simpler values in priority order and never
//! emits the value it was given. The engine keeps the first candidate that
//! still fails, so the order below is the heuristic.

use num_traits::{CheckedNeg, PrimInt, Signed, Unsigned};

use crate::emitter::Emitter;
use crate::error::Cancelled;
use crate::shrink::Shrinkable;

/// Substituted for non-ASCII characters before trying `'a'`, to check whether
/// "not ASCII" matters rather than the exact character.
pub const NON_ASCII_PLACEHOLDER: char = 'à';

/// Boolean shrinking - only try false if true
pub fn bool_shrink(value: bool, out: &Emitter<'_, bool>) -> Result<(), Cancelled> {
    if value {
        out.emit(false)?;
    }
    Ok(())
}

/// Signed integer shrinking: `0`, the positive mirror of a negative value,
/// then values approaching the original from zero.
pub fn signed_int_shrink<T>(value: T, out: &Emitter<'_, T>) -> Result<(), Cancelled>
where
    T: PrimInt + Signed + CheckedNeg,
{
    if value.is_zero() {
        return Ok(());
    }
    out.emit(T::zero())?;
    // MIN has no positive mirror
    if value.is_negative()
        && let Some(mirror) = value.checked_neg()
    {
        out.emit(mirror)?;
    }
    halving_shrink(value, out)
}

/// Unsigned integer shrinking: `0`, then values approaching the original
/// from zero.
pub fn unsigned_int_shrink<T>(value: T, out: &Emitter<'_, T>) -> Result<(), Cancelled>
where
    T: PrimInt + Unsigned,
{
    if value.is_zero() {
        return Ok(());
    }
    out.emit(T::zero())?;
    halving_shrink(value, out)
}

/// Emit `value - offset` for `offset = value / 2, value / 4, ...` while the
/// offset is non-zero. The offset has the sign of `value`, so nothing
/// overflows.
fn halving_shrink<T: PrimInt>(value: T, out: &Emitter<'_, T>) -> Result<(), Cancelled> {
    let two = T::one() + T::one();
    let mut offset = value / two;
    while !offset.is_zero() {
        out.emit(value - offset)?;
        offset = offset / two;
    }
    Ok(())
}

/// String shrinking: the empty string, then suffixes and prefixes cut at
/// halving lengths, then one-character simplifications from left to right.
///
/// All cuts are on `char` boundaries.
pub fn string_shrink(value: &str, out: &Emitter<'_, String>) -> Result<(), Cancelled> {
    if value.is_empty() {
        return Ok(());
    }
    out.emit(String::new())?;

    let chars: Vec<char> = value.chars().collect();

    let mut cut = chars.len() / 2;
    while cut > 0 {
        out.emit(chars[cut..].iter().collect())?;
        out.emit(chars[..cut].iter().collect())?;
        cut /= 2;
    }

    for (position, &original) in chars.iter().enumerate() {
        let replaced = |replacement: char| -> String {
            chars
                .iter()
                .enumerate()
                .map(|(i, &c)| if i == position { replacement } else { c })
                .collect()
        };

        if !original.is_ascii() && original != NON_ASCII_PLACEHOLDER {
            out.emit(replaced(NON_ASCII_PLACEHOLDER))?;
        }
        if original != 'a' {
            out.emit(replaced('a'))?;
        }
        if let Some(lower) = simple_lowercase(original)
            && lower != 'a'
        {
            out.emit(replaced(lower))?;
        }
    }
    Ok(())
}

/// The simple (one-to-one) lowercase mapping of `c`, when it differs from `c`.
///
/// Where the full mapping expands to several characters, as for 'İ', the
/// first one is the simple mapping.
fn simple_lowercase(c: char) -> Option<char> {
    c.to_lowercase().next().filter(|&lower| lower != c)
}

impl Shrinkable for bool {
    fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
        bool_shrink(*self, out)
    }
}

impl Shrinkable for String {
    fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
        string_shrink(self, out)
    }
}

// Macro to implement Shrinkable for signed integer types
macro_rules! impl_shrinkable_signed_int {
    ($($t:ty),*) => {
        $(
            impl Shrinkable for $t {
                fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
                    signed_int_shrink(*self, out)
                }
            }
        )*
    };
}

// Macro to implement Shrinkable for unsigned integer types
macro_rules! impl_shrinkable_unsigned_int {
    ($($t:ty),*) => {
        $(
            impl Shrinkable for $t {
                fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
                    unsigned_int_shrink(*self, out)
                }
            }
        )*
    };
}

// Floats have no built-in candidates; shrinking them is a no-op.
macro_rules! impl_shrinkable_float {
    ($($t:ty),*) => {
        $(
            impl Shrinkable for $t {
                fn shrink(&self, _out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
                    Ok(())
                }
            }
        )*
    };
}

impl_shrinkable_signed_int!(i8, i16, i32, i64, i128, isize);
impl_shrinkable_unsigned_int!(u8, u16, u32, u64, u128, usize);
impl_shrinkable_float!(f32, f64);
