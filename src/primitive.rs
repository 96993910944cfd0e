//! Single-fragment codecs for base types.

use std::borrow::Cow;

use uuid::Uuid;

use crate::constants::{FALSE_FRAGMENT, TRUE_FRAGMENT};
use crate::shape::Primitive;
use crate::value::Value;

impl Primitive {
    /// Parses one path fragment.
    ///
    /// Strings are percent-decoded. Booleans accept `true` and `false` in any
    /// ASCII case. Numbers use Rust's locale-independent syntax. Returns
    /// `None` when the fragment is not a valid value of this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use endpoint_router::{Primitive, Value};
    ///
    /// assert_eq!(Primitive::String.parse_fragment("a%20b"), Some(Value::from("a b")));
    /// assert_eq!(Primitive::Bool.parse_fragment("True"), Some(Value::Bool(true)));
    /// assert_eq!(Primitive::U8.parse_fragment("256"), None);
    /// ```
    #[must_use]
    pub fn parse_fragment(self, fragment: &str) -> Option<Value> {
        match self {
            Self::String => decode(fragment).map(Value::String),
            Self::Bool => parse_bool(fragment).map(Value::Bool),
            Self::I8 => fragment.parse::<i8>().ok().map(|n| Value::Int(n.into())),
            Self::I16 => fragment.parse::<i16>().ok().map(|n| Value::Int(n.into())),
            Self::I32 => fragment.parse::<i32>().ok().map(|n| Value::Int(n.into())),
            Self::I64 => fragment.parse::<i64>().ok().map(Value::Int),
            Self::Isize => fragment
                .parse::<isize>()
                .ok()
                .and_then(|n| i64::try_from(n).ok())
                .map(Value::Int),
            Self::U8 => fragment.parse::<u8>().ok().map(|n| Value::UInt(n.into())),
            Self::U16 => fragment.parse::<u16>().ok().map(|n| Value::UInt(n.into())),
            Self::U32 => fragment.parse::<u32>().ok().map(|n| Value::UInt(n.into())),
            Self::U64 => fragment.parse::<u64>().ok().map(Value::UInt),
            Self::Usize => fragment
                .parse::<usize>()
                .ok()
                .and_then(|n| u64::try_from(n).ok())
                .map(Value::UInt),
            Self::F32 => fragment.parse::<f32>().ok().map(|f| Value::Float(f.into())),
            Self::F64 => fragment.parse::<f64>().ok().map(Value::Float),
            Self::Uuid => Uuid::parse_str(fragment).ok().map(Value::Uuid),
        }
    }

    /// Writes a value of this type as one path fragment.
    ///
    /// Returns `None` if the value is not of this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use endpoint_router::{Primitive, Value};
    ///
    /// assert_eq!(Primitive::Bool.write_fragment(&Value::Bool(true)).as_deref(), Some("true"));
    /// assert_eq!(Primitive::String.write_fragment(&Value::from("a/b")).as_deref(), Some("a%2Fb"));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_fragment(self, value: &Value) -> Option<String> {
        match (self, value) {
            (Self::String, Value::String(s)) => Some(encode(s).into_owned()),
            (Self::Bool, Value::Bool(b)) => Some(write_bool(*b).to_string()),
            (
                Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize | Self::U8 | Self::U16
                | Self::U32 | Self::U64 | Self::Usize,
                Value::Int(n),
            ) => Some(n.to_string()),
            (
                Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize | Self::U8 | Self::U16
                | Self::U32 | Self::U64 | Self::Usize,
                Value::UInt(n),
            ) => Some(n.to_string()),
            (Self::F32, Value::Float(f)) => Some((*f as f32).to_string()),
            (Self::F64, Value::Float(f)) => Some(f.to_string()),
            (Self::Uuid, Value::Uuid(id)) => Some(id.hyphenated().to_string()),
            _ => None,
        }
    }
}

/// Percent-encodes text for use as one path fragment.
pub(crate) fn encode(text: &str) -> Cow<'_, str> {
    urlencoding::encode(text)
}

/// Percent-decodes one path fragment.
pub(crate) fn decode(fragment: &str) -> Option<String> {
    urlencoding::decode(fragment).ok().map(Cow::into_owned)
}

fn parse_bool(fragment: &str) -> Option<bool> {
    if fragment.eq_ignore_ascii_case(TRUE_FRAGMENT) {
        Some(true)
    } else if fragment.eq_ignore_ascii_case(FALSE_FRAGMENT) {
        Some(false)
    } else {
        None
    }
}

const fn write_bool(b: bool) -> &'static str {
    if b { TRUE_FRAGMENT } else { FALSE_FRAGMENT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_decodes_percent_escapes() {
        assert_eq!(
            Primitive::String.parse_fragment("caf%C3%A9"),
            Some(Value::from("café"))
        );
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        assert_eq!(Primitive::String.parse_fragment("%FF"), None);
    }

    #[test]
    fn string_encodes_reserved_characters() {
        let written = Primitive::String
            .write_fragment(&Value::from("a b/c?d"))
            .unwrap();
        assert_eq!(written, "a%20b%2Fc%3Fd");
        assert_eq!(
            Primitive::String.parse_fragment(&written),
            Some(Value::from("a b/c?d"))
        );
    }

    #[test]
    fn bool_writes_lowercase() {
        assert_eq!(
            Primitive::Bool.write_fragment(&Value::Bool(true)).as_deref(),
            Some("true")
        );
        assert_eq!(
            Primitive::Bool.write_fragment(&Value::Bool(false)).as_deref(),
            Some("false")
        );
    }

    #[test]
    fn bool_parses_any_case() {
        assert_eq!(Primitive::Bool.parse_fragment("true"), Some(Value::Bool(true)));
        assert_eq!(Primitive::Bool.parse_fragment("True"), Some(Value::Bool(true)));
        assert_eq!(Primitive::Bool.parse_fragment("FALSE"), Some(Value::Bool(false)));
        assert_eq!(Primitive::Bool.parse_fragment("yes"), None);
        assert_eq!(Primitive::Bool.parse_fragment("1"), None);
    }

    #[test]
    fn integers_respect_width() {
        assert_eq!(Primitive::I8.parse_fragment("-128"), Some(Value::Int(-128)));
        assert_eq!(Primitive::I8.parse_fragment("128"), None);
        assert_eq!(Primitive::U16.parse_fragment("-1"), None);
        assert_eq!(
            Primitive::U64.parse_fragment("18446744073709551615"),
            Some(Value::UInt(u64::MAX))
        );
        assert_eq!(Primitive::I32.parse_fragment("not-a-number"), None);
        assert_eq!(Primitive::I32.parse_fragment(""), None);
    }

    #[test]
    fn floats_use_invariant_text() {
        assert_eq!(Primitive::F64.parse_fragment("1.5"), Some(Value::Float(1.5)));
        assert_eq!(Primitive::F64.parse_fragment("1,5"), None);
        assert_eq!(
            Primitive::F64.write_fragment(&Value::Float(0.1)).as_deref(),
            Some("0.1")
        );
        assert_eq!(
            Primitive::F32.write_fragment(&Value::Float(f64::from(0.1f32))).as_deref(),
            Some("0.1")
        );
    }

    #[test]
    fn uuid_writes_hyphenated() {
        let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let written = Primitive::Uuid.write_fragment(&Value::Uuid(id)).unwrap();
        assert_eq!(written, "01234567-89ab-cdef-0123-456789abcdef");
        assert_eq!(Primitive::Uuid.parse_fragment(&written), Some(Value::Uuid(id)));
    }

    #[test]
    fn write_rejects_mismatched_value() {
        assert_eq!(Primitive::Bool.write_fragment(&Value::Int(1)), None);
        assert_eq!(Primitive::I32.write_fragment(&Value::from("1")), None);
    }
}
