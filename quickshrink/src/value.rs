//! Runtime-typed values.
//!
//! [`Value`] lets a driver hold inputs of different types side by side, for
//! example the arguments of a failing call. How a value shrinks is fixed when
//! it is built: [`Value::shrinkable`] uses the type's own [`Shrinkable`] impl,
//! while [`Value::new`] dispatches on the concrete type to the built-in
//! generators and shrinks nothing for any other type.

use std::any::Any;
use std::fmt::{self, Debug};

use crate::emitter::Emitter;
use crate::error::Cancelled;
use crate::shrink::Shrinkable;

/// Object-safe view of a boxed value.
trait Payload: Debug + Send + Sync {
    /// The wrapped value itself, not the wrapper.
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_payload(&self) -> Box<dyn Payload>;

    fn type_name(&self) -> &'static str;

    fn eq_payload(&self, other: &dyn Payload) -> bool;

    fn candidates(&self, out: &Emitter<'_, Value>) -> Result<(), Cancelled>;
}

/// Shrinks through the built-in generator for its kind, if there is one.
#[derive(Clone)]
struct Builtin<T>(T);

/// Shrinks through its own `Shrinkable` impl.
#[derive(Clone)]
struct Custom<T>(T);

impl<T: Debug> Debug for Builtin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: Debug> Debug for Custom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! impl_payload {
    ($wrapper:ident, $($bound:path),*) => {
        impl<T> Payload for $wrapper<T>
        where
            T: Any + Clone + PartialEq + Debug + Send + Sync $(+ $bound)*,
        {
            fn as_any(&self) -> &dyn Any {
                &self.0
            }

            fn into_any(self: Box<Self>) -> Box<dyn Any> {
                Box::new(self.0)
            }

            fn clone_payload(&self) -> Box<dyn Payload> {
                Box::new(self.clone())
            }

            fn type_name(&self) -> &'static str {
                std::any::type_name::<T>()
            }

            fn eq_payload(&self, other: &dyn Payload) -> bool {
                other
                    .as_any()
                    .downcast_ref::<T>()
                    .is_some_and(|other| *other == self.0)
            }

            fn candidates(&self, out: &Emitter<'_, Value>) -> Result<(), Cancelled> {
                $wrapper::shrink_into(&self.0, out)
            }
        }
    };
}

impl_payload!(Builtin,);
impl_payload!(Custom, Shrinkable);

impl<T: Any> Builtin<T> {
    fn shrink_into(value: &T, out: &Emitter<'_, Value>) -> Result<(), Cancelled> {
        let value: &dyn Any = value;

        macro_rules! dispatch {
            ($($kind:ty),* $(,)?) => {
                $(
                    if let Some(value) = value.downcast_ref::<$kind>() {
                        return value.shrink(&out.map(Value::new::<$kind>));
                    }
                )*
            };
        }

        dispatch!(
            bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String,
        );
        Ok(())
    }
}

impl<T> Custom<T>
where
    T: Shrinkable + Any + Clone + PartialEq + Debug + Send + Sync,
{
    fn shrink_into(value: &T, out: &Emitter<'_, Value>) -> Result<(), Cancelled> {
        value.shrink(&out.map(Value::shrinkable::<T>))
    }
}

/// An opaque, runtime-typed value.
///
/// Equality is structural: two values are equal when they hold the same
/// concrete type and the payloads compare equal.
///
/// ```rust
/// use quickshrink::{Value, shrink};
///
/// let minimal = shrink(
///     |v: &Value| v.downcast_ref::<u32>().is_some_and(|n| *n < 10),
///     Value::new(5000u32),
/// );
/// assert_eq!(minimal, Value::new(10u32));
/// ```
pub struct Value {
    payload: Box<dyn Payload>,
}

impl Value {
    /// Box a value that shrinks with the built-in generator for its kind.
    ///
    /// Booleans, the primitive integer types and `String` have built-in
    /// generators. Any other type is held as is and never shrinks.
    ///
    /// A `Shrinkable` impl on `T` is not consulted here, even when one
    /// exists. Build the value with [`Value::shrinkable`] to shrink through it.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Clone + PartialEq + Debug + Send + Sync,
    {
        Self {
            payload: Box::new(Builtin(value)),
        }
    }

    /// Box a value that shrinks through its own [`Shrinkable`] impl.
    pub fn shrinkable<T>(value: T) -> Self
    where
        T: Shrinkable + Any + Clone + PartialEq + Debug + Send + Sync,
    {
        Self {
            payload: Box::new(Custom(value)),
        }
    }

    /// Whether the value holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload.as_any().is::<T>()
    }

    /// Borrow the held value as a `T`, or `None` if it holds another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_any().downcast_ref()
    }

    /// Unbox the value, or `None` if it does not hold a `T`.
    pub fn into_inner<T: Any>(self) -> Option<T> {
        self.payload.into_any().downcast::<T>().ok().map(|value| *value)
    }

    /// Name of the held type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.payload.type_name()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone_payload(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.payload.eq_payload(other.payload.as_ref())
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.payload.fmt(f)
    }
}

impl Shrinkable for Value {
    fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
        self.payload.candidates(out)
    }
}
