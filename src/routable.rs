//! The `Routable` trait and its implementations for standard types.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::shape::{Primitive, Schema, SequenceKind, Shape, TypeKey, VariantShape};
use crate::value::Value;

/// A type that can appear in a routed path.
///
/// Implementors describe their shape once, at router compilation, and
/// convert between themselves and [`Value`] at every parse and write.
/// Endpoint types are unions; their fields may use any routable type.
///
/// # Examples
///
/// ```
/// use endpoint_router::{Routable, Schema, Shape, Value, VariantShape};
///
/// #[derive(Debug, PartialEq)]
/// enum Page {
///     Home,
///     Book { isbn: String },
/// }
///
/// impl Routable for Page {
///     fn describe(schema: &mut Schema) -> Shape {
///         Shape::Union(vec![
///             VariantShape::new("Home").path("/"),
///             VariantShape::new("Book")
///                 .path("/book/{isbn}")
///                 .field(schema.field::<String>("isbn")),
///         ])
///     }
///
///     fn to_value(&self) -> Value {
///         match self {
///             Self::Home => Value::variant(0, vec![]),
///             Self::Book { isbn } => Value::variant(1, vec![isbn.to_value()]),
///         }
///     }
///
///     fn from_value(value: Value) -> Option<Self> {
///         let (tag, mut fields) = value.into_variant()?;
///         match tag {
///             0 => Some(Self::Home),
///             1 => Some(Self::Book { isbn: fields.read()? }),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Routable: Sized + 'static {
    /// Identity under which the shape is registered and codecs are cached.
    #[must_use]
    fn type_key() -> TypeKey {
        TypeKey::of::<Self>()
    }

    /// Describes the shape of this type, registering referenced types.
    fn describe(schema: &mut Schema) -> Shape;

    /// Converts to the dynamic representation.
    fn to_value(&self) -> Value;

    /// Converts from the dynamic representation.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! signed_routable {
    ($($ty:ty => $prim:ident),* $(,)?) => {$(
        impl Routable for $ty {
            fn describe(_: &mut Schema) -> Shape {
                Shape::Primitive(Primitive::$prim)
            }

            #[allow(
                clippy::cast_lossless,
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::unnecessary_cast
            )]
            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Int(n) => Self::try_from(n).ok(),
                    Value::UInt(n) => Self::try_from(n).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! unsigned_routable {
    ($($ty:ty => $prim:ident),* $(,)?) => {$(
        impl Routable for $ty {
            fn describe(_: &mut Schema) -> Shape {
                Shape::Primitive(Primitive::$prim)
            }

            #[allow(clippy::cast_lossless, clippy::cast_possible_truncation, clippy::unnecessary_cast)]
            fn to_value(&self) -> Value {
                Value::UInt(*self as u64)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::UInt(n) => Self::try_from(n).ok(),
                    Value::Int(n) => Self::try_from(n).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

signed_routable!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
unsigned_routable!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl Routable for f64 {
    fn describe(_: &mut Schema) -> Shape {
        Shape::Primitive(Primitive::F64)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl Routable for f32 {
    fn describe(_: &mut Schema) -> Shape {
        Shape::Primitive(Primitive::F32)
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f as f32),
            _ => None,
        }
    }
}

impl Routable for bool {
    fn describe(_: &mut Schema) -> Shape {
        Shape::Primitive(Primitive::Bool)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Routable for String {
    fn describe(_: &mut Schema) -> Shape {
        Shape::Primitive(Primitive::String)
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Routable for Uuid {
    fn describe(_: &mut Schema) -> Shape {
        Shape::Primitive(Primitive::Uuid)
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Uuid(id) => Some(id),
            _ => None,
        }
    }
}

fn elements<T: Routable>(value: Value) -> Option<impl Iterator<Item = Option<T>>> {
    Some(value.into_seq()?.into_iter().map(T::from_value))
}

impl<T: Routable> Routable for Vec<T> {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Sequence {
            kind: SequenceKind::List,
            element: schema.register::<T>(),
        }
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(Routable::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        elements(value)?.collect()
    }
}

impl<T: Routable> Routable for VecDeque<T> {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Sequence {
            kind: SequenceKind::List,
            element: schema.register::<T>(),
        }
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(Routable::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        elements(value)?.collect()
    }
}

impl<T: Routable> Routable for Box<[T]> {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Sequence {
            kind: SequenceKind::Array,
            element: schema.register::<T>(),
        }
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(Routable::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        elements(value)?.collect()
    }
}

impl<T: Routable> Routable for Box<T> {
    fn type_key() -> TypeKey {
        T::type_key()
    }

    fn describe(schema: &mut Schema) -> Shape {
        T::describe(schema)
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: Routable> Routable for Option<T> {
    fn describe(schema: &mut Schema) -> Shape {
        Shape::Union(vec![
            VariantShape::new("None"),
            VariantShape::new("Some").field(schema.field::<T>("value")),
        ])
    }

    fn to_value(&self) -> Value {
        match self {
            None => Value::variant(0, Vec::new()),
            Some(inner) => Value::variant(1, vec![inner.to_value()]),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        let (tag, mut fields) = value.into_variant()?;
        match tag {
            0 => Some(None),
            1 => Some(Some(fields.read()?)),
            _ => None,
        }
    }
}

macro_rules! tuple_routable {
    ($($idx:tt $name:ident),+) => {
        impl<$($name: Routable),+> Routable for ($($name,)+) {
            fn describe(schema: &mut Schema) -> Shape {
                Shape::Tuple(vec![$(schema.register::<$name>()),+])
            }

            fn to_value(&self) -> Value {
                Value::Tuple(vec![$(self.$idx.to_value()),+])
            }

            fn from_value(value: Value) -> Option<Self> {
                let mut fields = value.into_tuple()?;
                Some(($(fields.read::<$name>()?,)+))
            }
        }
    };
}

tuple_routable!(0 A);
tuple_routable!(0 A, 1 B);
tuple_routable!(0 A, 1 B, 2 C);
tuple_routable!(0 A, 1 B, 2 C, 3 D);
