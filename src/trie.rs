//! Decision trie merging the templates of every variant of a union.
//!
//! Each node has literal branches keyed by encoded fragment text, at most one
//! parametric branch shared by every variant with a placeholder at that
//! position, and at most one variant that finalizes there.

use std::collections::BTreeMap;

use crate::case::{ParamSlot, Segment, VariantEntry};
use crate::codec::{CodecBuilder, CodecId, CodecTable, Nesting, ParamCodec};
use crate::error::{InvalidRouter, InvalidRouterKind};
use crate::shape::{TypeKey, VariantShape};
use crate::template::{Modifier, PathTemplate};
use crate::value::Value;

/// A placeholder position merged across variants.
#[derive(Debug)]
struct ParamDescriptor {
    ty: TypeKey,
    modifier: Modifier,
    codec: ParamCodec,
    /// `(variant tag, field index)` of every field filled by this parameter.
    targets: Vec<(usize, usize)>,
    variant: String,
    field: String,
}

impl ParamDescriptor {
    fn new(entry: &VariantEntry, slot: &ParamSlot) -> Self {
        Self {
            ty: slot.ty,
            modifier: slot.modifier,
            codec: slot.codec,
            targets: Vec::new(),
            variant: entry.name.clone(),
            field: slot.field_name.clone(),
        }
    }

    fn merge(&mut self, entry: &VariantEntry, slot: &ParamSlot) -> Result<(), InvalidRouterKind> {
        if self.ty != slot.ty {
            return Err(InvalidRouterKind::ConflictingParameterType {
                variant: entry.name.clone(),
                field: slot.field_name.clone(),
                ty: slot.ty.name().to_string(),
                other_variant: self.variant.clone(),
                other_field: self.field.clone(),
                other_ty: self.ty.name().to_string(),
            });
        }
        if self.modifier != slot.modifier {
            return Err(InvalidRouterKind::ConflictingModifier {
                variant: entry.name.clone(),
                field: slot.field_name.clone(),
                other_variant: self.variant.clone(),
                other_field: self.field.clone(),
            });
        }
        self.targets.push((entry.tag, slot.field));
        Ok(())
    }
}

/// A node of the decision trie.
#[derive(Debug, Default)]
struct RouteTrie {
    literals: BTreeMap<String, RouteTrie>,
    parameter: Option<(ParamDescriptor, Box<RouteTrie>)>,
    finalize: Option<usize>,
}

impl RouteTrie {
    /// Inserts the segments of `entry`, returning the tag of a variant that
    /// already finalizes at the same node.
    fn insert(&mut self, entry: &VariantEntry) -> Result<Option<usize>, InvalidRouterKind> {
        let mut node = self;
        for segment in &entry.segments {
            node = match segment {
                Segment::Literal(text) => node.literals.entry(text.clone()).or_default(),
                Segment::Param(slot) => {
                    let (param, next) = node
                        .parameter
                        .get_or_insert_with(|| (ParamDescriptor::new(entry, slot), Box::default()));
                    param.merge(entry, slot)?;
                    next.as_mut()
                }
            };
        }
        Ok(node.finalize.replace(entry.tag))
    }

    fn node_count(&self) -> usize {
        1 + self.literals.values().map(Self::node_count).sum::<usize>()
            + self
                .parameter
                .as_ref()
                .map_or(0, |(_, next)| next.node_count())
    }
}

/// Codec of a union type: its compiled variants and their merged trie.
#[derive(Debug)]
pub(crate) struct UnionCodec {
    entries: Vec<VariantEntry>,
    trie: RouteTrie,
}

impl UnionCodec {
    /// Compiles every variant and merges their templates.
    pub(crate) fn compile(
        builder: &mut CodecBuilder<'_>,
        variants: &[VariantShape],
    ) -> Result<Self, InvalidRouter> {
        let entries = variants
            .iter()
            .enumerate()
            .map(|(tag, shape)| VariantEntry::compile(builder, tag, shape))
            .collect::<Result<Vec<_>, _>>()?;

        let mut trie = RouteTrie::default();
        for entry in &entries {
            let existing = trie.insert(entry).map_err(|kind| builder.error(kind))?;
            if let Some(other) = existing {
                return Err(builder.error(InvalidRouterKind::IdenticalPath {
                    variant: entries[other].name.clone(),
                    other_variant: entry.name.clone(),
                }));
            }
        }

        Ok(Self { entries, trie })
    }

    pub(crate) fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub(crate) fn templates(&self) -> impl Iterator<Item = (&str, &PathTemplate)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.template))
    }

    pub(crate) fn variant_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Returns true if some variant can match without consuming a fragment.
    pub(crate) fn may_consume_nothing(&self, nullable: &impl Fn(CodecId) -> bool) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.may_consume_nothing(nullable))
    }

    /// Walks the trie from the root.
    ///
    /// At each node a matching literal is taken, else the parameter if its
    /// codec parses, else the variant finalizing there. Branches are
    /// committed once taken. Returns the value with the unconsumed
    /// fragments.
    pub(crate) fn parse<'p>(
        &self,
        table: &CodecTable,
        path: &'p [String],
        nesting: Nesting,
    ) -> Option<(Value, &'p [String])> {
        let mut args: Vec<Vec<Option<Value>>> = self
            .entries
            .iter()
            .map(|entry| vec![None; entry.arity])
            .collect();
        let mut node = &self.trie;
        let mut rest = path;

        loop {
            if let Some((head, tail)) = rest.split_first()
                && let Some(child) = node.literals.get(head.as_str())
            {
                node = child;
                rest = tail;
                continue;
            }

            // An exhausted path stops at a finalizing node rather than
            // feeding an empty remainder to a parameter.
            if rest.is_empty() && node.finalize.is_some() {
                break;
            }

            let Some((param, next)) = &node.parameter else {
                break;
            };
            let Some((value, remaining)) = table.parse_param(param.codec, rest, nesting) else {
                break;
            };
            for &(tag, field) in &param.targets {
                args[tag][field] = Some(value.clone());
            }
            node = &**next;
            rest = remaining;
        }

        let tag = node.finalize?;
        let entry = &self.entries[tag];
        let value = entry.construct(std::mem::take(&mut args[tag]))?;
        Some((value, rest))
    }

    /// Appends the path of a variant value to `out`.
    pub(crate) fn write(&self, table: &CodecTable, value: &Value, out: &mut Vec<String>) {
        let Value::Variant { tag, fields } = value else {
            tracing::warn!(
                found = value.kind_name(),
                "expected a variant value; writing nothing"
            );
            return;
        };
        let Some(entry) = self.entries.get(*tag) else {
            tracing::warn!(tag, "variant tag out of range; writing nothing");
            return;
        };
        entry.write(table, fields, out);
    }
}
