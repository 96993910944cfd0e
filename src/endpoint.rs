//! Compiled endpoint types and their typed parse/write handle.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cache::RouterCache;
use crate::codec::{CodecBuilder, CodecId, CodecTable, Nesting};
use crate::config::RouterConfig;
use crate::error::{InvalidRouter, InvalidRouterKind};
use crate::path;
use crate::routable::Routable;
use crate::shape::{Schema, Shape};
use crate::template::PathTemplate;
use crate::trie::UnionCodec;
use crate::value::Value;

/// The immutable codec graph of one endpoint type.
#[derive(Debug)]
pub(crate) struct CompiledEndpoint {
    name: &'static str,
    table: CodecTable,
    root: CodecId,
}

impl CompiledEndpoint {
    /// Describes `E` and compiles codecs for every type it reaches.
    pub(crate) fn compile<E: Routable>() -> Result<Self, InvalidRouter> {
        let (schema, key) = Schema::of::<E>();
        let name = key.name();

        if !matches!(schema.shape(key), Some(Shape::Union(_))) {
            return Err(InvalidRouter::new(
                name,
                InvalidRouterKind::NotAUnion { ty: name.to_string() },
            ));
        }

        let mut builder = CodecBuilder::new(&schema, name);
        let root = builder.codec_for(key)?;
        let compiled = Self {
            name,
            table: builder.finish(),
            root,
        };

        tracing::debug!(
            endpoint = name,
            variants = compiled.union().map_or(0, UnionCodec::variant_count),
            trie_nodes = compiled.union().map_or(0, UnionCodec::node_count),
            codecs = compiled.table.len(),
            "compiled endpoint router"
        );

        Ok(compiled)
    }

    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    fn union(&self) -> Option<&UnionCodec> {
        self.table.union(self.root)
    }

    /// Parses a whole path; leftover fragments mean no match.
    pub(crate) fn parse(&self, fragments: &[String]) -> Option<Value> {
        match self.table.parse(self.root, fragments, Nesting::new())? {
            (value, []) => Some(value),
            (_, rest) => {
                tracing::trace!(
                    endpoint = self.name,
                    leftover = rest.len(),
                    "path has fragments past the matched variant"
                );
                None
            }
        }
    }

    pub(crate) fn write(&self, value: &Value) -> Vec<String> {
        let mut out = Vec::new();
        self.table.write(self.root, value, &mut out);
        out
    }
}

/// Typed parser and writer for the endpoint type `E`.
///
/// Obtained with [`EndpointCodec::shared`], which compiles `E` once per
/// process, or [`EndpointCodec::compile`], which always compiles afresh.
///
/// # Examples
///
/// ```
/// use endpoint_router::{EndpointCodec, Routable, Schema, Shape, Value, VariantShape};
///
/// #[derive(Debug, PartialEq)]
/// enum Page {
///     Home,
///     Post { id: u32 },
/// }
///
/// impl Routable for Page {
///     fn describe(schema: &mut Schema) -> Shape {
///         Shape::Union(vec![
///             VariantShape::new("Home").path("/"),
///             VariantShape::new("Post").path("/post/{id}").field(schema.field::<u32>("id")),
///         ])
///     }
///
///     fn to_value(&self) -> Value {
///         match self {
///             Self::Home => Value::variant(0, vec![]),
///             Self::Post { id } => Value::variant(1, vec![id.to_value()]),
///         }
///     }
///
///     fn from_value(value: Value) -> Option<Self> {
///         let (tag, mut fields) = value.into_variant()?;
///         match tag {
///             0 => Some(Self::Home),
///             1 => Some(Self::Post { id: fields.read()? }),
///             _ => None,
///         }
///     }
/// }
///
/// let codec = EndpointCodec::<Page>::shared().unwrap();
/// assert_eq!(codec.write(&Page::Post { id: 3 }), "/post/3");
/// assert_eq!(codec.parse("/post/3"), Some(Page::Post { id: 3 }));
/// assert_eq!(codec.parse("/"), Some(Page::Home));
/// assert_eq!(codec.parse("/post/x"), None);
/// ```
pub struct EndpointCodec<E> {
    compiled: Arc<CompiledEndpoint>,
    config: RouterConfig,
    endpoint: PhantomData<fn() -> E>,
}

impl<E: Routable> EndpointCodec<E> {
    /// Compiles `E` without consulting any cache.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRouter` if `E` is not a valid endpoint type.
    pub fn compile() -> Result<Self, InvalidRouter> {
        Ok(Self::from_compiled(Arc::new(CompiledEndpoint::compile::<E>()?)))
    }

    /// Returns the codec for `E` from the process-wide cache, compiling it on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRouter` if `E` is not a valid endpoint type.
    pub fn shared() -> Result<Self, InvalidRouter> {
        RouterCache::global().codec::<E>()
    }

    pub(crate) fn from_compiled(compiled: Arc<CompiledEndpoint>) -> Self {
        Self {
            compiled,
            config: RouterConfig::default(),
            endpoint: PhantomData,
        }
    }

    /// Replaces the path-string configuration.
    #[must_use]
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the path-string configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns the Rust name of the endpoint type.
    #[must_use]
    pub fn endpoint_name(&self) -> &'static str {
        self.compiled.name()
    }

    /// Parses a path string.
    ///
    /// Returns `None` if no variant matches the whole path.
    #[must_use]
    pub fn parse(&self, path: &str) -> Option<E> {
        let parsed = path::split(path, &self.config).and_then(|f| self.parse_fragments(&f));
        if parsed.is_none() {
            tracing::trace!(endpoint = self.endpoint_name(), path, "no endpoint matched");
        }
        parsed
    }

    /// Parses a path that is already split into raw fragments.
    #[must_use]
    pub fn parse_fragments(&self, fragments: &[String]) -> Option<E> {
        self.compiled.parse(fragments).and_then(E::from_value)
    }

    /// Writes the path of an endpoint value.
    #[must_use]
    pub fn write(&self, endpoint: &E) -> String {
        path::join(&self.write_fragments(endpoint), &self.config)
    }

    /// Writes the raw fragments of an endpoint value.
    #[must_use]
    pub fn write_fragments(&self, endpoint: &E) -> Vec<String> {
        self.compiled.write(&endpoint.to_value())
    }

    /// Returns the variant names in declaration order.
    #[must_use]
    pub fn variant_names(&self) -> Vec<&str> {
        self.compiled
            .union()
            .map(|union| union.variant_names().collect())
            .unwrap_or_default()
    }

    /// Returns each variant's name with its resolved template.
    #[must_use]
    pub fn templates(&self) -> Vec<(&str, &PathTemplate)> {
        self.compiled
            .union()
            .map(|union| union.templates().collect())
            .unwrap_or_default()
    }
}

impl<E> Clone for EndpointCodec<E> {
    fn clone(&self) -> Self {
        Self {
            compiled: Arc::clone(&self.compiled),
            config: self.config.clone(),
            endpoint: PhantomData,
        }
    }
}

impl<E> fmt::Debug for EndpointCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointCodec")
            .field("endpoint", &self.compiled.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_union_endpoint_is_rejected() {
        let err = EndpointCodec::<i32>::compile().unwrap_err();
        assert!(matches!(*err.kind, InvalidRouterKind::NotAUnion { .. }));
        assert_eq!(err.endpoint, "i32");
    }

    #[test]
    fn option_is_a_union_endpoint() {
        let codec = EndpointCodec::<Option<u8>>::compile().unwrap();
        assert_eq!(codec.variant_names(), vec!["None", "Some"]);
        assert_eq!(codec.write(&Some(4)), "/4");
        assert_eq!(codec.write(&None), "/None");
        assert_eq!(codec.parse("/4"), Some(Some(4)));
        assert_eq!(codec.parse("/None"), Some(None));
        assert_eq!(codec.parse("/4/4"), None);
    }

    #[test]
    fn clone_shares_compiled_graph() {
        let codec = EndpointCodec::<Option<bool>>::compile().unwrap();
        let copy = codec.clone();
        assert!(Arc::ptr_eq(&codec.compiled, &copy.compiled));
    }
}
