//! Segment codecs derived from type shapes.
//!
//! Codecs live in an arena indexed by [`CodecId`]. A type's slot is reserved
//! before its body is built, so recursive types refer to their own slot, and
//! every type in the closure gets exactly one codec.

use std::collections::HashMap;

use crate::constants::{
    MAX_NESTING_DEPTH, MAX_PARSE_DEPTH, MAX_SEQUENCE_LENGTH, PATH_SEPARATOR,
};
use crate::error::{InvalidRouter, InvalidRouterKind};
use crate::primitive::{decode, encode};
use crate::shape::{FieldKind, Primitive, Schema, Shape, TypeKey};
use crate::trie::UnionCodec;
use crate::value::Value;

/// Index of a codec in a [`CodecTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CodecId(usize);

#[derive(Debug)]
enum Codec {
    /// Slot reserved while the type's body is being compiled.
    Pending,
    Primitive(Primitive),
    /// Records and tuples: fields concatenated in order.
    Composite(Vec<CodecId>),
    /// Arrays and lists: a count fragment followed by the elements.
    ///
    /// `dense` is set when every element consumes at least one fragment.
    Sequence { element: CodecId, dense: bool },
    Union(UnionCodec),
}

/// How a trie parameter reads and writes its fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamCodec {
    /// The field type's own codec.
    Segment(CodecId),
    /// Every remaining fragment, decoded and joined with `/`.
    RestString,
    /// Every remaining fragment, read as repeated elements without a count.
    RestSequence(CodecId),
}

/// Recursion bookkeeping for one parse.
///
/// `idle` counts codecs entered since a fragment was last consumed and
/// restarts whenever the remaining path gets shorter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Nesting {
    total: usize,
    idle: usize,
    remaining: usize,
}

impl Nesting {
    pub(crate) fn new() -> Self {
        Self {
            total: 0,
            idle: 0,
            remaining: usize::MAX,
        }
    }

    /// Enters a codec with `remaining` fragments left, or returns `None`
    /// once a nesting limit is exceeded.
    fn enter(self, remaining: usize) -> Option<Self> {
        let idle = if remaining < self.remaining {
            0
        } else {
            self.idle + 1
        };
        let total = self.total + 1;
        (idle <= MAX_NESTING_DEPTH && total <= MAX_PARSE_DEPTH).then_some(Self {
            total,
            idle,
            remaining,
        })
    }
}

/// Immutable set of compiled codecs for one endpoint type.
#[derive(Debug, Default)]
pub(crate) struct CodecTable {
    codecs: Vec<Codec>,
}

impl CodecTable {
    pub(crate) fn len(&self) -> usize {
        self.codecs.len()
    }

    pub(crate) fn union(&self, id: CodecId) -> Option<&UnionCodec> {
        match self.codecs.get(id.0)? {
            Codec::Union(union) => Some(union),
            _ => None,
        }
    }

    /// Parses a value from the front of `path`, returning it with the
    /// unconsumed fragments.
    pub(crate) fn parse<'p>(
        &self,
        id: CodecId,
        path: &'p [String],
        nesting: Nesting,
    ) -> Option<(Value, &'p [String])> {
        let nesting = nesting.enter(path.len())?;
        match self.codecs.get(id.0)? {
            Codec::Pending => None,
            Codec::Primitive(primitive) => {
                let (head, rest) = path.split_first()?;
                primitive.parse_fragment(head).map(|value| (value, rest))
            }
            Codec::Composite(fields) => {
                let mut values = Vec::with_capacity(fields.len());
                let mut rest = path;
                for &field in fields {
                    let (value, next) = self.parse(field, rest, nesting)?;
                    values.push(value);
                    rest = next;
                }
                Some((Value::Tuple(values), rest))
            }
            Codec::Sequence { element, dense } => {
                let (head, mut rest) = path.split_first()?;
                let count: usize = head.parse().ok()?;
                let limit = if *dense {
                    rest.len()
                } else {
                    MAX_SEQUENCE_LENGTH
                };
                if count > limit {
                    return None;
                }
                let mut items = Vec::with_capacity(count.min(rest.len()));
                for _ in 0..count {
                    let (value, next) = self.parse(*element, rest, nesting)?;
                    items.push(value);
                    rest = next;
                }
                Some((Value::Seq(items), rest))
            }
            Codec::Union(union) => union.parse(self, path, nesting),
        }
    }

    /// Appends the fragments of `value` to `out`.
    ///
    /// Parts of `value` that disagree with the compiled shape are logged and
    /// skipped.
    pub(crate) fn write(&self, id: CodecId, value: &Value, out: &mut Vec<String>) {
        let Some(codec) = self.codecs.get(id.0) else {
            return;
        };
        match (codec, value) {
            (Codec::Primitive(primitive), _) => match primitive.write_fragment(value) {
                Some(fragment) => out.push(fragment),
                None => mismatch("primitive", value),
            },
            (Codec::Composite(fields), Value::Tuple(values)) if fields.len() == values.len() => {
                for (&field, value) in fields.iter().zip(values) {
                    self.write(field, value, out);
                }
            }
            (Codec::Sequence { element, .. }, Value::Seq(items)) => {
                out.push(items.len().to_string());
                for item in items {
                    self.write(*element, item, out);
                }
            }
            (Codec::Union(union), _) => union.write(self, value, out),
            (Codec::Composite(_), _) => mismatch("tuple", value),
            (Codec::Sequence { .. }, _) => mismatch("sequence", value),
            (Codec::Pending, _) => {}
        }
    }

    pub(crate) fn parse_param<'p>(
        &self,
        codec: ParamCodec,
        path: &'p [String],
        nesting: Nesting,
    ) -> Option<(Value, &'p [String])> {
        match codec {
            ParamCodec::Segment(id) => self.parse(id, path, nesting),
            ParamCodec::RestString => {
                let pieces = path
                    .iter()
                    .map(|fragment| decode(fragment))
                    .collect::<Option<Vec<_>>>()?;
                let separator = PATH_SEPARATOR.to_string();
                let joined = pieces.join(separator.as_str());
                Some((Value::String(joined), &path[path.len()..]))
            }
            ParamCodec::RestSequence(element) => {
                let mut items = Vec::new();
                let mut rest = path;
                while !rest.is_empty() {
                    let (value, next) = self.parse(element, rest, nesting)?;
                    if next.len() == rest.len() {
                        return None;
                    }
                    items.push(value);
                    rest = next;
                }
                Some((Value::Seq(items), rest))
            }
        }
    }

    pub(crate) fn write_param(&self, codec: ParamCodec, value: &Value, out: &mut Vec<String>) {
        match (codec, value) {
            (ParamCodec::Segment(id), _) => self.write(id, value, out),
            (ParamCodec::RestString, Value::String(text)) => {
                if !text.is_empty() {
                    out.extend(
                        text.split(PATH_SEPARATOR)
                            .map(|piece| encode(piece).into_owned()),
                    );
                }
            }
            (ParamCodec::RestSequence(element), Value::Seq(items)) => {
                for item in items {
                    self.write(element, item, out);
                }
            }
            (ParamCodec::RestString, _) => mismatch("rest string", value),
            (ParamCodec::RestSequence(_), _) => mismatch("rest sequence", value),
        }
    }
}

fn mismatch(expected: &'static str, value: &Value) {
    tracing::warn!(
        expected,
        found = value.kind_name(),
        "value does not match the compiled endpoint shape; skipping it"
    );
}

/// Compiles codecs for the closure of types reachable from an endpoint.
pub(crate) struct CodecBuilder<'s> {
    schema: &'s Schema,
    endpoint: &'static str,
    codecs: Vec<Codec>,
    by_type: HashMap<TypeKey, CodecId>,
}

impl<'s> CodecBuilder<'s> {
    pub(crate) fn new(schema: &'s Schema, endpoint: &'static str) -> Self {
        Self {
            schema,
            endpoint,
            codecs: Vec::new(),
            by_type: HashMap::new(),
        }
    }

    pub(crate) fn error(&self, kind: InvalidRouterKind) -> InvalidRouter {
        InvalidRouter::new(self.endpoint, kind)
    }

    /// Returns the shape of a described type.
    pub(crate) fn shape(&self, key: TypeKey) -> Result<&'s Shape, InvalidRouter> {
        let schema = self.schema;
        schema.shape(key).ok_or_else(|| {
            self.error(InvalidRouterKind::UnresolvedType {
                ty: key.name().to_string(),
            })
        })
    }

    /// Returns the codec for `key`, compiling it on first request.
    pub(crate) fn codec_for(&mut self, key: TypeKey) -> Result<CodecId, InvalidRouter> {
        if let Some(&id) = self.by_type.get(&key) {
            return Ok(id);
        }

        let shape = self.shape(key)?;
        let id = CodecId(self.codecs.len());
        self.codecs.push(Codec::Pending);
        self.by_type.insert(key, id);

        let codec = match shape {
            Shape::Primitive(primitive) => Codec::Primitive(*primitive),
            Shape::Tuple(items) => Codec::Composite(
                items
                    .iter()
                    .map(|&item| self.codec_for(item))
                    .collect::<Result<_, _>>()?,
            ),
            Shape::Record(fields) => {
                let mut ids = Vec::with_capacity(fields.len());
                for field in fields {
                    match field.kind() {
                        FieldKind::Value(ty) => ids.push(self.codec_for(ty)?),
                        FieldKind::PageModel => return Err(self.unsupported(key)),
                    }
                }
                Codec::Composite(ids)
            }
            Shape::Sequence { element, .. } => Codec::Sequence {
                element: self.codec_for(*element)?,
                dense: true,
            },
            Shape::Union(variants) => Codec::Union(UnionCodec::compile(self, variants)?),
            Shape::Opaque => return Err(self.unsupported(key)),
        };

        self.codecs[id.0] = codec;
        Ok(id)
    }

    fn unsupported(&self, key: TypeKey) -> InvalidRouter {
        self.error(InvalidRouterKind::UnsupportedType {
            ty: key.name().to_string(),
        })
    }

    pub(crate) fn finish(mut self) -> CodecTable {
        let nullable = self.nullable();
        for codec in &mut self.codecs {
            if let Codec::Sequence { element, dense } = codec {
                *dense = !nullable[element.0];
            }
        }
        CodecTable {
            codecs: self.codecs,
        }
    }

    /// Marks the codecs that can parse a value without consuming a fragment.
    fn nullable(&self) -> Vec<bool> {
        let mut nullable = vec![false; self.codecs.len()];
        let mut changed = true;
        while changed {
            changed = false;
            for (index, codec) in self.codecs.iter().enumerate() {
                if nullable[index] {
                    continue;
                }
                let empty = match codec {
                    Codec::Pending | Codec::Primitive(_) | Codec::Sequence { .. } => false,
                    Codec::Composite(fields) => fields.iter().all(|field| nullable[field.0]),
                    Codec::Union(union) => union.may_consume_nothing(&|id| nullable[id.0]),
                };
                if empty {
                    nullable[index] = true;
                    changed = true;
                }
            }
        }
        nullable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routable::Routable;

    fn table_for<T: Routable>() -> (CodecTable, CodecId) {
        let (schema, key) = Schema::of::<T>();
        let mut builder = CodecBuilder::new(&schema, key.name());
        let id = builder.codec_for(key).unwrap();
        (builder.finish(), id)
    }

    fn fragments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn list_writes_count_then_elements() {
        let (table, id) = table_for::<Vec<String>>();
        let mut out = Vec::new();
        table.write(id, &vec!["x".to_string(), "y".to_string()].to_value(), &mut out);
        assert_eq!(out, fragments(&["2", "x", "y"]));
    }

    #[test]
    fn list_parses_exact_count() {
        let (table, id) = table_for::<Vec<String>>();
        let path = fragments(&["2", "x", "y"]);
        let (value, rest) = table.parse(id, &path, Nesting::new()).unwrap();
        assert_eq!(Vec::<String>::from_value(value), Some(vec!["x".into(), "y".into()]));
        assert!(rest.is_empty());
    }

    #[test]
    fn list_leaves_following_fragments() {
        let (table, id) = table_for::<Vec<i32>>();
        let path = fragments(&["1", "7", "more"]);
        let (value, rest) = table.parse(id, &path, Nesting::new()).unwrap();
        assert_eq!(value, Value::Seq(vec![Value::Int(7)]));
        assert_eq!(rest, &path[2..]);
    }

    #[test]
    fn list_fails_when_input_runs_out() {
        let (table, id) = table_for::<Vec<i32>>();
        for parts in [&["3", "1", "2"][..], &["-1"], &["2", "1", "x"]] {
            assert!(table.parse(id, &fragments(parts), Nesting::new()).is_none());
        }
    }

    struct Unit;

    impl Routable for Unit {
        fn describe(_: &mut Schema) -> Shape {
            Shape::Tuple(Vec::new())
        }
        fn to_value(&self) -> Value {
            Value::Tuple(Vec::new())
        }
        fn from_value(_: Value) -> Option<Self> {
            Some(Self)
        }
    }

    #[test]
    fn list_of_empty_elements_parses_its_count() {
        let (table, id) = table_for::<Vec<Unit>>();
        let mut out = Vec::new();
        table.write(id, &vec![Unit, Unit, Unit].to_value(), &mut out);
        assert_eq!(out, fragments(&["3"]));

        let (value, rest) = table.parse(id, &out, Nesting::new()).unwrap();
        assert_eq!(value, Value::Seq(vec![Value::Tuple(Vec::new()); 3]));
        assert!(rest.is_empty());

        let huge = vec![(MAX_SEQUENCE_LENGTH + 1).to_string()];
        assert!(table.parse(id, &huge, Nesting::new()).is_none());
    }

    #[test]
    fn nesting_limits_idle_recursion_only() {
        let mut idle = Nesting::new();
        for _ in 0..=MAX_NESTING_DEPTH {
            idle = idle.enter(5).unwrap();
        }
        assert!(idle.enter(5).is_none());
        assert!(idle.enter(4).is_some());

        let mut consuming = Nesting::new();
        for remaining in (0..MAX_PARSE_DEPTH).rev() {
            consuming = consuming.enter(remaining).unwrap();
        }
        assert!(consuming.enter(0).is_none());
    }

    #[test]
    fn tuple_threads_fragments_in_order() {
        let (table, id) = table_for::<(i32, String, bool)>();
        let path = fragments(&["4", "a%20b", "false"]);
        let (value, rest) = table.parse(id, &path, Nesting::new()).unwrap();
        assert_eq!(
            <(i32, String, bool)>::from_value(value),
            Some((4, "a b".to_string(), false))
        );
        assert!(rest.is_empty());
    }

    #[test]
    fn tuple_fails_if_any_field_fails() {
        let (table, id) = table_for::<(i32, bool)>();
        for parts in [&["4", "maybe"][..], &["4"]] {
            assert!(table.parse(id, &fragments(parts), Nesting::new()).is_none());
        }
    }

    #[test]
    fn shared_types_get_one_codec() {
        let (table, _) = table_for::<(i32, i32, Vec<i32>)>();
        // tuple, i32, Vec<i32>
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn rest_string_joins_decoded_fragments() {
        let table = CodecTable::default();
        let path = fragments(&["docs", "a%20b", "c"]);
        let (value, rest) = table
            .parse_param(ParamCodec::RestString, &path, Nesting::new())
            .unwrap();
        assert_eq!(value, Value::from("docs/a b/c"));
        assert!(rest.is_empty());
    }

    #[test]
    fn rest_string_empty_writes_nothing() {
        let table = CodecTable::default();
        let mut out = Vec::new();
        table.write_param(ParamCodec::RestString, &Value::from(""), &mut out);
        assert!(out.is_empty());

        let (value, _) = table
            .parse_param(ParamCodec::RestString, &[], Nesting::new())
            .unwrap();
        assert_eq!(value, Value::from(""));
    }

    #[test]
    fn rest_sequence_reads_every_fragment() {
        let (table, id) = table_for::<i64>();
        let path = fragments(&["1", "2", "3"]);
        let (value, rest) = table
            .parse_param(ParamCodec::RestSequence(id), &path, Nesting::new())
            .unwrap();
        assert_eq!(value, Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        assert!(rest.is_empty());

        let mut out = Vec::new();
        table.write_param(ParamCodec::RestSequence(id), &value, &mut out);
        assert_eq!(out, path);
    }

    #[test]
    fn rest_sequence_fails_on_bad_element() {
        let (table, id) = table_for::<i64>();
        let path = fragments(&["1", "x"]);
        assert!(
            table
                .parse_param(ParamCodec::RestSequence(id), &path, Nesting::new())
                .is_none()
        );
    }

    #[test]
    fn opaque_type_is_rejected() {
        struct Handle;
        impl Routable for Handle {
            fn describe(_: &mut Schema) -> Shape {
                Shape::Opaque
            }
            fn to_value(&self) -> Value {
                Value::Tuple(Vec::new())
            }
            fn from_value(_: Value) -> Option<Self> {
                None
            }
        }

        let (schema, key) = Schema::of::<Vec<Handle>>();
        let mut builder = CodecBuilder::new(&schema, "test");
        let err = builder.codec_for(key).unwrap_err();
        assert!(matches!(
            *err.kind,
            InvalidRouterKind::UnsupportedType { ref ty } if ty.contains("Handle")
        ));
    }
}
