//! Bidirectional typed URL router.
//!
//! Given an endpoint type, a tagged union whose variants are the navigable
//! locations of an application, this crate derives once per type a parser
//! from URL paths to endpoint values and a writer from endpoint values back
//! to paths.
//!
//! # Overview
//!
//! Each variant declares a path template made of literal fragments,
//! `{name}` placeholders and at most one trailing `{*name}` placeholder:
//!
//! ```text
//! /                      Home
//! /book/{isbn}           Book { isbn: String }
//! /files/{owner}/{*path} Files { owner: u32, path: String }
//! ```
//!
//! A variant without a template routes as its own name when it has no fields
//! (`/About`), or as one placeholder per field otherwise.
//!
//! Types describe themselves through the [`Routable`] trait. Compilation
//! validates every template, builds one segment codec per reachable type,
//! and merges all templates into a decision trie. Configuration mistakes
//! such as two variants with identical paths are reported as
//! [`InvalidRouter`] when the router is built, never at parse time.
//!
//! # Quick Start
//!
//! ```rust
//! use endpoint_router::{EndpointCodec, Routable, Schema, Shape, Value, VariantShape};
//!
//! #[derive(Debug, PartialEq)]
//! enum Page {
//!     Home,
//!     Book { isbn: String },
//!     Files { owner: u32, path: String },
//! }
//!
//! impl Routable for Page {
//!     fn describe(schema: &mut Schema) -> Shape {
//!         Shape::Union(vec![
//!             VariantShape::new("Home").path("/"),
//!             VariantShape::new("Book")
//!                 .path("/book/{isbn}")
//!                 .field(schema.field::<String>("isbn")),
//!             VariantShape::new("Files")
//!                 .path("/files/{owner}/{*path}")
//!                 .field(schema.field::<u32>("owner"))
//!                 .field(schema.field::<String>("path")),
//!         ])
//!     }
//!
//!     fn to_value(&self) -> Value {
//!         match self {
//!             Self::Home => Value::variant(0, vec![]),
//!             Self::Book { isbn } => Value::variant(1, vec![isbn.to_value()]),
//!             Self::Files { owner, path } => {
//!                 Value::variant(2, vec![owner.to_value(), path.to_value()])
//!             }
//!         }
//!     }
//!
//!     fn from_value(value: Value) -> Option<Self> {
//!         let (tag, mut fields) = value.into_variant()?;
//!         match tag {
//!             0 => Some(Self::Home),
//!             1 => Some(Self::Book { isbn: fields.read()? }),
//!             2 => Some(Self::Files { owner: fields.read()?, path: fields.read()? }),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let codec = EndpointCodec::<Page>::shared().unwrap();
//!
//! let files = Page::Files { owner: 7, path: "docs/read me.txt".into() };
//! assert_eq!(codec.write(&files), "/files/7/docs/read%20me.txt");
//! assert_eq!(codec.parse("/files/7/docs/read%20me.txt"), Some(files));
//! assert_eq!(codec.parse("/book/x/extra"), None);
//! ```
//!
//! # Encoding
//!
//! | Type | Fragments |
//! |------|-----------|
//! | `String` | one, percent-encoded |
//! | `bool` | one, `true` or `false` (parsed in any case) |
//! | integers, floats | one, invariant decimal text |
//! | `Uuid` | one, hyphenated |
//! | tuples | each element in order |
//! | `Vec`, `VecDeque`, `Box<[T]>` | a count, then each element |
//! | `Option<T>` | `None`, or the value's fragments |
//! | rest `String` | every remaining fragment, joined with `/` |
//! | rest sequence | every remaining fragment, one element each |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod cache;
mod case;
mod codec;
mod config;
mod constants;
mod endpoint;
mod error;
mod page_model;
mod path;
mod primitive;
mod routable;
mod router;
mod shape;
mod template;
mod trie;
mod value;

pub mod prelude;

pub use cache::RouterCache;
pub use config::RouterConfig;
pub use constants::{
    FALSE_FRAGMENT, HASH_DELIMITER, MAX_NESTING_DEPTH, MAX_PARSE_DEPTH, MAX_SEQUENCE_LENGTH,
    PATH_SEPARATOR, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, QUERY_DELIMITER, REST_MARKER,
    TRUE_FRAGMENT,
};
pub use endpoint::EndpointCodec;
pub use error::{InvalidRouter, InvalidRouterKind, TemplateError};
pub use page_model::PageModel;
pub use routable::Routable;
pub use router::{NavigationRouter, Router};
pub use shape::{
    FieldKind, FieldShape, Primitive, Schema, SequenceKind, Shape, TypeKey, VariantShape,
};
pub use template::{Modifier, PathTemplate, TemplateFragment};
pub use value::{FieldReader, Value};
