//! Constants for the path template mini-language.

/// Separator between path fragments.
pub const PATH_SEPARATOR: char = '/';

/// Opening delimiter of a placeholder fragment.
pub const PLACEHOLDER_OPEN: char = '{';

/// Closing delimiter of a placeholder fragment.
pub const PLACEHOLDER_CLOSE: char = '}';

/// Prefix marking a placeholder as consuming the rest of the path.
pub const REST_MARKER: char = '*';

/// Fragment written for `true`.
pub const TRUE_FRAGMENT: &str = "true";

/// Fragment written for `false`.
pub const FALSE_FRAGMENT: &str = "false";

/// Start of the query component of an incoming path.
pub const QUERY_DELIMITER: char = '?';

/// Start of the fragment component of an incoming path.
pub const HASH_DELIMITER: char = '#';

/// Deepest nesting of codecs a parse may enter without consuming a fragment.
///
/// Bounds left recursion through types that refer to themselves. The count
/// restarts whenever a fragment is consumed.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Deepest nesting of codecs a single parse may enter in total.
///
/// Keeps the parser's stack bounded on very long paths.
pub const MAX_PARSE_DEPTH: usize = 1024;

/// Largest count accepted for a sequence whose elements may consume no
/// fragments.
pub const MAX_SEQUENCE_LENGTH: usize = 4096;
