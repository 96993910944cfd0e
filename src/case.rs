//! Compilation of one union variant into a routable entry.

use crate::codec::{CodecBuilder, CodecId, CodecTable, ParamCodec};
use crate::error::{InvalidRouter, InvalidRouterKind};
use crate::primitive::encode;
use crate::shape::{FieldKind, FieldShape, Primitive, Shape, TypeKey, VariantShape};
use crate::template::{Modifier, PathTemplate, TemplateFragment};
use crate::value::Value;

/// A compiled fragment of a variant's template.
#[derive(Debug)]
pub(crate) enum Segment {
    /// Percent-encoded literal text, compared with raw incoming fragments.
    Literal(String),
    Param(ParamSlot),
}

/// A placeholder resolved to the field it fills.
#[derive(Debug, Clone)]
pub(crate) struct ParamSlot {
    pub(crate) field: usize,
    pub(crate) field_name: String,
    pub(crate) ty: TypeKey,
    pub(crate) modifier: Modifier,
    pub(crate) codec: ParamCodec,
}

/// A compiled union variant.
#[derive(Debug)]
pub(crate) struct VariantEntry {
    pub(crate) tag: usize,
    pub(crate) name: String,
    pub(crate) arity: usize,
    pub(crate) template: PathTemplate,
    pub(crate) segments: Vec<Segment>,
    page_model: Option<usize>,
}

impl VariantEntry {
    /// Resolves and validates the template of `shape`.
    pub(crate) fn compile(
        builder: &mut CodecBuilder<'_>,
        tag: usize,
        shape: &VariantShape,
    ) -> Result<Self, InvalidRouter> {
        let variant = shape.name();
        let fields = shape.fields();
        let page_model = Self::page_model_field(builder, shape)?;
        let template = Self::resolve_template(builder, shape)?;

        let mut seen = vec![false; fields.len()];
        let mut segments = Vec::with_capacity(template.fragments().len());
        let last = template.fragments().len().saturating_sub(1);

        for (position, fragment) in template.fragments().iter().enumerate() {
            let (name, modifier) = match fragment {
                TemplateFragment::Literal(text) => {
                    segments.push(Segment::Literal(encode(text).into_owned()));
                    continue;
                }
                TemplateFragment::Placeholder { name, modifier } => (name, *modifier),
            };

            let field = fields
                .iter()
                .position(|f| f.name() == name)
                .ok_or_else(|| {
                    builder.error(InvalidRouterKind::UnknownField {
                        variant: variant.to_string(),
                        name: name.clone(),
                    })
                })?;

            let ty = match fields[field].kind() {
                FieldKind::Value(ty) => ty,
                FieldKind::PageModel => {
                    return Err(builder.error(InvalidRouterKind::PageModelInPath {
                        variant: variant.to_string(),
                        field: name.clone(),
                    }));
                }
            };

            if seen[field] {
                return Err(builder.error(InvalidRouterKind::DuplicateField {
                    variant: variant.to_string(),
                    field: name.clone(),
                }));
            }
            seen[field] = true;

            let codec = match modifier {
                Modifier::Single => ParamCodec::Segment(builder.codec_for(ty)?),
                Modifier::Rest if position != last => {
                    return Err(builder.error(InvalidRouterKind::RestNotLast {
                        variant: variant.to_string(),
                        field: name.clone(),
                    }));
                }
                Modifier::Rest => Self::rest_codec(builder, variant, name, ty)?,
            };

            segments.push(Segment::Param(ParamSlot {
                field,
                field_name: name.clone(),
                ty,
                modifier,
                codec,
            }));
        }

        if let Some(missing) = fields
            .iter()
            .zip(&seen)
            .find(|(f, seen)| !**seen && !f.is_page_model())
            .map(|(f, _)| f)
        {
            return Err(builder.error(InvalidRouterKind::MissingField {
                variant: variant.to_string(),
                field: missing.name().to_string(),
            }));
        }

        Ok(Self {
            tag,
            name: variant.to_string(),
            arity: fields.len(),
            template,
            segments,
            page_model,
        })
    }

    fn page_model_field(
        builder: &CodecBuilder<'_>,
        shape: &VariantShape,
    ) -> Result<Option<usize>, InvalidRouter> {
        let mut found: Option<usize> = None;
        for (index, field) in shape.fields().iter().enumerate() {
            if !field.is_page_model() {
                continue;
            }
            if let Some(first) = found {
                return Err(builder.error(InvalidRouterKind::MultiplePageModels {
                    variant: shape.name().to_string(),
                    first: shape.fields()[first].name().to_string(),
                    second: field.name().to_string(),
                }));
            }
            found = Some(index);
        }
        Ok(found)
    }

    /// Explicit annotation, else the variant name for a variant without
    /// value fields, else one placeholder per value field.
    fn resolve_template(
        builder: &CodecBuilder<'_>,
        shape: &VariantShape,
    ) -> Result<PathTemplate, InvalidRouter> {
        if let Some(annotation) = shape.annotation() {
            return PathTemplate::parse(annotation).map_err(|e| {
                builder.error(InvalidRouterKind::InvalidPlaceholder {
                    variant: shape.name().to_string(),
                    fragment: e.fragment,
                })
            });
        }

        let value_fields: Vec<&str> = shape
            .fields()
            .iter()
            .filter(|f| !f.is_page_model())
            .map(FieldShape::name)
            .collect();

        if value_fields.is_empty() {
            Ok(PathTemplate::literal(shape.name()))
        } else {
            Ok(PathTemplate::placeholders(value_fields))
        }
    }

    fn rest_codec(
        builder: &mut CodecBuilder<'_>,
        variant: &str,
        field: &str,
        ty: TypeKey,
    ) -> Result<ParamCodec, InvalidRouter> {
        let element = match builder.shape(ty)? {
            Shape::Primitive(Primitive::String) => return Ok(ParamCodec::RestString),
            Shape::Sequence { element, .. } => Some(*element),
            _ => None,
        };

        if let Some(element) = element
            && !matches!(builder.shape(element)?, Shape::Sequence { .. })
        {
            return Ok(ParamCodec::RestSequence(builder.codec_for(element)?));
        }

        Err(builder.error(InvalidRouterKind::InvalidRestType {
            variant: variant.to_string(),
            field: field.to_string(),
            ty: ty.name().to_string(),
        }))
    }

    /// Builds the variant value from parsed arguments, filling the page-model
    /// slot. Returns `None` if an argument is missing.
    pub(crate) fn construct(&self, args: Vec<Option<Value>>) -> Option<Value> {
        let fields = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| {
                if Some(index) == self.page_model {
                    Some(Value::PageModel)
                } else {
                    arg
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Value::variant(self.tag, fields))
    }

    /// Appends the path of a value of this variant to `out`.
    pub(crate) fn write(&self, table: &CodecTable, fields: &[Value], out: &mut Vec<String>) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push(text.clone()),
                Segment::Param(slot) => {
                    if let Some(value) = fields.get(slot.field) {
                        table.write_param(slot.codec, value, out);
                    } else {
                        tracing::warn!(
                            variant = %self.name,
                            field = %slot.field_name,
                            "variant value is missing a field; skipping it"
                        );
                    }
                }
            }
        }
    }

    /// Returns true if every segment can match without consuming a fragment.
    pub(crate) fn may_consume_nothing(&self, nullable: &impl Fn(CodecId) -> bool) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Literal(_) => false,
            Segment::Param(slot) => match slot.codec {
                ParamCodec::Segment(id) => nullable(id),
                ParamCodec::RestString | ParamCodec::RestSequence(_) => true,
            },
        })
    }
}
