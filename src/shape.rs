//! Type shapes: the schema description a router is compiled from.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::routable::Routable;

/// Identity of a described type.
///
/// Equality is by [`TypeId`]; the type name is kept for error messages.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the type identifier.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the Rust type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Base types encoded as exactly one path fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Percent-encoded text.
    String,
    /// `true` / `false`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// Hyphenated UUID.
    Uuid,
}

/// Flavor of a repeated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Boxed slice.
    Array,
    /// Growable list.
    List,
}

/// Structural description of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A single-fragment base type.
    Primitive(Primitive),
    /// Positional fields.
    Tuple(Vec<TypeKey>),
    /// Named fields in declaration order.
    Record(Vec<FieldShape>),
    /// Variable-length sequence of one element type.
    Sequence {
        /// Array or list.
        kind: SequenceKind,
        /// Element type.
        element: TypeKey,
    },
    /// Tagged union of variants.
    Union(Vec<VariantShape>),
    /// A type that cannot be represented in a path.
    Opaque,
}

/// What a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A value of the given type, matched against the path.
    Value(TypeKey),
    /// An opaque page model, excluded from the path.
    PageModel,
}

/// A named field of a record or union variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    name: String,
    kind: FieldKind,
}

impl FieldShape {
    /// Creates a value field of type `ty`.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeKey) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Value(ty),
        }
    }

    /// Creates an opaque page-model field.
    #[must_use]
    pub fn page_model(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::PageModel,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns what the field holds.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns true for a page-model field.
    #[must_use]
    pub const fn is_page_model(&self) -> bool {
        matches!(self.kind, FieldKind::PageModel)
    }
}

/// One variant of a union, with its optional path annotation.
///
/// # Examples
///
/// ```
/// use endpoint_router::{Schema, VariantShape};
///
/// let mut schema = Schema::new();
/// let book = VariantShape::new("Book")
///     .path("/book/{isbn}")
///     .field(schema.field::<String>("isbn"));
/// assert_eq!(book.fields().len(), 1);
/// assert_eq!(book.annotation(), Some("/book/{isbn}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantShape {
    name: String,
    path: Option<String>,
    fields: Vec<FieldShape>,
}

impl VariantShape {
    /// Creates a variant without fields or annotation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            fields: Vec::new(),
        }
    }

    /// Declares the path template for this variant.
    #[must_use]
    pub fn path(mut self, template: impl Into<String>) -> Self {
        self.path = Some(template.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a page-model field.
    #[must_use]
    pub fn page_model(self, name: impl Into<String>) -> Self {
        self.field(FieldShape::page_model(name))
    }

    /// Returns the variant name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared path template, if any.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

/// Registry of type shapes reachable from a root type.
///
/// Registration inserts a pending entry before describing the type, so a
/// type may refer to itself directly or through other types.
#[derive(Debug, Default)]
pub struct Schema {
    shapes: HashMap<TypeKey, Option<Shape>>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Describes `T` and everything it references, returning the schema and
    /// the key of `T`.
    #[must_use]
    pub fn of<T: Routable>() -> (Self, TypeKey) {
        let mut schema = Self::new();
        let key = schema.register::<T>();
        (schema, key)
    }

    /// Registers `T`, describing it on first sight, and returns its key.
    pub fn register<T: Routable>(&mut self) -> TypeKey {
        let key = T::type_key();
        if !self.shapes.contains_key(&key) {
            self.shapes.insert(key, None);
            let shape = T::describe(self);
            self.shapes.insert(key, Some(shape));
        }
        key
    }

    /// Registers `T` and returns a value field of that type.
    pub fn field<T: Routable>(&mut self, name: impl Into<String>) -> FieldShape {
        let ty = self.register::<T>();
        FieldShape::new(name, ty)
    }

    /// Returns the shape of a registered type.
    #[must_use]
    pub fn shape(&self, key: TypeKey) -> Option<&Shape> {
        self.shapes.get(&key).and_then(Option::as_ref)
    }

    /// Returns the number of described types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if no type has been described.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
