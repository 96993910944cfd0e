//! Dynamic values exchanged between typed endpoints and compiled codecs.

use std::vec;

use uuid::Uuid;

use crate::page_model::PageModel;
use crate::routable::Routable;

/// A value in the shape-directed representation used by codecs.
///
/// Every [`Routable`] type converts to and from a `Value`. Records and
/// tuples become [`Value::Tuple`], arrays and lists become [`Value::Seq`],
/// and union variants become [`Value::Variant`] tagged by declaration index.
///
/// # Examples
///
/// ```
/// use endpoint_router::Value;
///
/// let value = Value::variant(1, vec![Value::from("abc"), Value::Int(3)]);
/// let (tag, mut fields) = value.into_variant().unwrap();
/// assert_eq!(tag, 1);
/// assert_eq!(fields.read::<String>().as_deref(), Some("abc"));
/// assert_eq!(fields.read::<i32>(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Text.
    String(String),
    /// Boolean.
    Bool(bool),
    /// Any signed integer width.
    Int(i64),
    /// Any unsigned integer width.
    UInt(u64),
    /// Any floating point width.
    Float(f64),
    /// A UUID.
    Uuid(Uuid),
    /// Fixed-arity record or tuple, fields in declaration order.
    Tuple(Vec<Value>),
    /// Array or list elements.
    Seq(Vec<Value>),
    /// One variant of a union.
    Variant {
        /// Declaration index of the variant.
        tag: usize,
        /// Field values in declaration order.
        fields: Vec<Value>,
    },
    /// Slot of an opaque page-model field; never read from or written to a path.
    PageModel,
}

impl Value {
    /// Creates a variant value.
    #[must_use]
    pub fn variant(tag: usize, fields: Vec<Value>) -> Self {
        Self::Variant { tag, fields }
    }

    /// Splits a variant value into its tag and a reader over its fields.
    ///
    /// Returns `None` if this is not a variant.
    #[must_use]
    pub fn into_variant(self) -> Option<(usize, FieldReader)> {
        match self {
            Self::Variant { tag, fields } => Some((tag, FieldReader::new(fields))),
            _ => None,
        }
    }

    /// Returns a reader over the fields of a tuple value.
    ///
    /// Returns `None` if this is not a tuple.
    #[must_use]
    pub fn into_tuple(self) -> Option<FieldReader> {
        match self {
            Self::Tuple(fields) => Some(FieldReader::new(fields)),
            _ => None,
        }
    }

    /// Returns the elements of a sequence value.
    #[must_use]
    pub fn into_seq(self) -> Option<Vec<Value>> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a short name of this value's kind, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Uuid(_) => "uuid",
            Self::Tuple(_) => "tuple",
            Self::Seq(_) => "sequence",
            Self::Variant { .. } => "variant",
            Self::PageModel => "page model",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Reads the fields of a tuple or variant in declaration order.
#[derive(Debug)]
pub struct FieldReader {
    fields: vec::IntoIter<Value>,
}

impl FieldReader {
    fn new(fields: Vec<Value>) -> Self {
        Self {
            fields: fields.into_iter(),
        }
    }

    /// Reads the next field as `T`.
    ///
    /// Returns `None` if the fields are exhausted or the value does not
    /// convert to `T`.
    pub fn read<T: Routable>(&mut self) -> Option<T> {
        self.fields.next().and_then(T::from_value)
    }

    /// Reads the next field as a page-model slot, producing a default model.
    pub fn read_page_model<T: Default>(&mut self) -> Option<PageModel<T>> {
        match self.fields.next()? {
            Value::PageModel => Some(PageModel::default()),
            _ => None,
        }
    }

    /// Returns the number of fields left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.fields.len()
    }
}
