//! Path template mini-language.
//!
//! A template is a `/`-separated list of fragments. A fragment is either a
//! literal (any text without `{`), a placeholder `{name}` bound to one field,
//! or a rest placeholder `{*name}` that consumes every remaining fragment.

use std::fmt;
use std::str::FromStr;

use crate::constants::{PATH_SEPARATOR, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, REST_MARKER};
use crate::error::TemplateError;

/// How a placeholder consumes path fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    /// The field's own codec decides how many fragments it reads.
    Single,
    /// The field takes every remaining fragment.
    Rest,
}

/// One fragment of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateFragment {
    /// Text written percent-encoded and matched against raw fragments.
    Literal(String),
    /// A field reference.
    Placeholder {
        /// Name of the referenced field.
        name: String,
        /// Single or rest.
        modifier: Modifier,
    },
}

impl fmt::Display for TemplateFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Placeholder {
                name,
                modifier: Modifier::Single,
            } => write!(f, "{{{name}}}"),
            Self::Placeholder {
                name,
                modifier: Modifier::Rest,
            } => write!(f, "{{*{name}}}"),
        }
    }
}

/// A parsed path template.
///
/// Empty fragments are dropped, so `"/"` is the empty template and
/// `"/a//b"` equals `"/a/b"`.
///
/// # Examples
///
/// ```
/// use endpoint_router::{Modifier, PathTemplate, TemplateFragment};
///
/// let template = PathTemplate::parse("/files/{owner}/{*path}").unwrap();
/// assert_eq!(template.fragments().len(), 3);
/// assert_eq!(
///     template.fragments()[2],
///     TemplateFragment::Placeholder { name: "path".into(), modifier: Modifier::Rest }
/// );
/// assert_eq!(template.to_string(), "/files/{owner}/{*path}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathTemplate {
    fragments: Vec<TemplateFragment>,
}

impl PathTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if a fragment containing `{` is not exactly
    /// `{name}` or `{*name}`.
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        let fragments = input
            .split(PATH_SEPARATOR)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Self::parse_fragment(raw).map_err(|reason| TemplateError {
                    template: input.to_string(),
                    fragment: raw.to_string(),
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fragments })
    }

    /// Creates a template of a single literal fragment.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![TemplateFragment::Literal(text.into())],
        }
    }

    /// Creates a template of one single-fragment placeholder per name.
    #[must_use]
    pub fn placeholders<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: names
                .into_iter()
                .map(|name| TemplateFragment::Placeholder {
                    name: name.into(),
                    modifier: Modifier::Single,
                })
                .collect(),
        }
    }

    /// Returns the fragments in order.
    #[must_use]
    pub fn fragments(&self) -> &[TemplateFragment] {
        &self.fragments
    }

    /// Returns true if the template has no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn parse_fragment(raw: &str) -> Result<TemplateFragment, &'static str> {
        if !raw.contains(PLACEHOLDER_OPEN) {
            return Ok(TemplateFragment::Literal(raw.to_string()));
        }

        let inner = raw
            .strip_prefix(PLACEHOLDER_OPEN)
            .ok_or("placeholder must span the whole fragment")?
            .strip_suffix(PLACEHOLDER_CLOSE)
            .ok_or("unclosed placeholder")?;

        let (name, modifier) = match inner.strip_prefix(REST_MARKER) {
            Some(name) => (name, Modifier::Rest),
            None => (inner, Modifier::Single),
        };

        if name.is_empty() {
            return Err("placeholder name cannot be empty");
        }

        if name.contains([PLACEHOLDER_OPEN, PLACEHOLDER_CLOSE, REST_MARKER]) {
            return Err("placeholder name cannot contain '{', '}' or '*'");
        }

        Ok(TemplateFragment::Placeholder {
            name: name.to_string(),
            modifier,
        })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragments.is_empty() {
            return write!(f, "{PATH_SEPARATOR}");
        }
        for fragment in &self.fragments {
            write!(f, "{PATH_SEPARATOR}{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for PathTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathTemplate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathTemplate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
