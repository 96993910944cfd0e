//! Error types for router construction.

use std::fmt;

/// Error raised when a path template string is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateError {
    /// The template that failed to parse
    pub template: String,
    /// The offending fragment
    pub fragment: String,
    /// Reason the fragment is invalid
    pub reason: &'static str,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid fragment '{}' in path template '{}': {}",
            self.fragment, self.template, self.reason
        )
    }
}

impl std::error::Error for TemplateError {}

/// Error raised when a router cannot be built for an endpoint type.
///
/// These are configuration errors in the endpoint type definition. They are
/// raised once, at construction, and name the variant and fields involved.
/// The kind is boxed to keep `Result<_, InvalidRouter>` small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRouter {
    /// The endpoint type the router was being built for
    pub endpoint: String,
    /// The specific problem
    pub kind: Box<InvalidRouterKind>,
}

/// Specific router construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRouterKind {
    /// The endpoint type is not a union of variants
    NotAUnion {
        /// Name of the type
        ty: String,
    },
    /// A type reachable from the endpoint cannot appear in a path
    UnsupportedType {
        /// Name of the offending type
        ty: String,
    },
    /// A type was referenced but never described
    UnresolvedType {
        /// Name of the type
        ty: String,
    },
    /// A template fragment opens a placeholder but is not `{name}` or `{*name}`
    InvalidPlaceholder {
        /// Variant declaring the template
        variant: String,
        /// The raw fragment text
        fragment: String,
    },
    /// A placeholder names no field of its variant
    UnknownField {
        /// Variant declaring the template
        variant: String,
        /// The placeholder name
        name: String,
    },
    /// A field is referenced by more than one placeholder
    DuplicateField {
        /// Variant declaring the template
        variant: String,
        /// The repeated field
        field: String,
    },
    /// A field is never referenced by the template
    MissingField {
        /// Variant declaring the template
        variant: String,
        /// The unreferenced field
        field: String,
    },
    /// A placeholder names the page-model field
    PageModelInPath {
        /// Variant declaring the template
        variant: String,
        /// The page-model field
        field: String,
    },
    /// A variant declares more than one page-model field
    MultiplePageModels {
        /// The variant
        variant: String,
        /// First page-model field
        first: String,
        /// Second page-model field
        second: String,
    },
    /// A rest placeholder is not the final fragment
    RestNotLast {
        /// Variant declaring the template
        variant: String,
        /// Field bound to the rest placeholder
        field: String,
    },
    /// A rest placeholder is bound to a field that is neither a string nor a
    /// one-dimensional sequence
    InvalidRestType {
        /// Variant declaring the template
        variant: String,
        /// Field bound to the rest placeholder
        field: String,
        /// Name of the field's type
        ty: String,
    },
    /// Two variants share a parameter position with different types
    ConflictingParameterType {
        /// First variant
        variant: String,
        /// Field of the first variant
        field: String,
        /// Type of the first field
        ty: String,
        /// Second variant
        other_variant: String,
        /// Field of the second variant
        other_field: String,
        /// Type of the second field
        other_ty: String,
    },
    /// Two variants share a parameter position where only one is a rest
    /// placeholder
    ConflictingModifier {
        /// First variant
        variant: String,
        /// Field of the first variant
        field: String,
        /// Second variant
        other_variant: String,
        /// Field of the second variant
        other_field: String,
    },
    /// Two variants match exactly the same paths
    IdenticalPath {
        /// First variant
        variant: String,
        /// Second variant
        other_variant: String,
    },
}

impl fmt::Display for InvalidRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid router for '{}': ", self.endpoint)?;
        match self.kind.as_ref() {
            InvalidRouterKind::NotAUnion { ty } => {
                write!(f, "endpoint type '{ty}' must be a union of variants")
            }
            InvalidRouterKind::UnsupportedType { ty } => {
                write!(f, "type '{ty}' cannot be represented in a path")
            }
            InvalidRouterKind::UnresolvedType { ty } => {
                write!(f, "type '{ty}' was referenced but never described")
            }
            InvalidRouterKind::InvalidPlaceholder { variant, fragment } => {
                write!(
                    f,
                    "variant '{variant}' has malformed placeholder '{fragment}'; expected '{{name}}' or '{{*name}}'"
                )
            }
            InvalidRouterKind::UnknownField { variant, name } => {
                write!(f, "variant '{variant}' has no field named '{name}'")
            }
            InvalidRouterKind::DuplicateField { variant, field } => {
                write!(
                    f,
                    "field '{field}' of variant '{variant}' is referenced more than once"
                )
            }
            InvalidRouterKind::MissingField { variant, field } => {
                write!(
                    f,
                    "field '{field}' of variant '{variant}' is not referenced by its path"
                )
            }
            InvalidRouterKind::PageModelInPath { variant, field } => {
                write!(
                    f,
                    "page-model field '{field}' of variant '{variant}' cannot appear in its path"
                )
            }
            InvalidRouterKind::MultiplePageModels {
                variant,
                first,
                second,
            } => {
                write!(
                    f,
                    "variant '{variant}' has more than one page-model field ('{first}' and '{second}')"
                )
            }
            InvalidRouterKind::RestNotLast { variant, field } => {
                write!(
                    f,
                    "rest placeholder '{{*{field}}}' of variant '{variant}' must be the last fragment"
                )
            }
            InvalidRouterKind::InvalidRestType { variant, field, ty } => {
                write!(
                    f,
                    "rest placeholder '{{*{field}}}' of variant '{variant}' has type '{ty}'; expected a string or a one-dimensional sequence"
                )
            }
            InvalidRouterKind::ConflictingParameterType {
                variant,
                field,
                ty,
                other_variant,
                other_field,
                other_ty,
            } => {
                write!(
                    f,
                    "field '{field}' of variant '{variant}' has type '{ty}' but field '{other_field}' of variant '{other_variant}' at the same position has type '{other_ty}'"
                )
            }
            InvalidRouterKind::ConflictingModifier {
                variant,
                field,
                other_variant,
                other_field,
            } => {
                write!(
                    f,
                    "field '{field}' of variant '{variant}' and field '{other_field}' of variant '{other_variant}' share a position but disagree on being a rest placeholder"
                )
            }
            InvalidRouterKind::IdenticalPath {
                variant,
                other_variant,
            } => {
                write!(
                    f,
                    "variants '{variant}' and '{other_variant}' have identical paths"
                )
            }
        }
    }
}

impl std::error::Error for InvalidRouter {}

impl InvalidRouter {
    /// Creates an error for the given endpoint type.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, kind: InvalidRouterKind) -> Self {
        Self {
            endpoint: endpoint.into(),
            kind: Box::new(kind),
        }
    }
}
