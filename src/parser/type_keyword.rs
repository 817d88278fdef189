//! Type keyword resolution
//!
//! Maps the short type keywords of a descriptor's type slot to column types.
//! A keyword may carry a size suffix after `=`, e.g. `s=64` or `de=10`.

use crate::model::{ColumnType, ColumnTypeSpec, SizeArg};

/// Keyword lookup table, searched in order.
///
/// The second `bi` and `d` entries are shadowed by the earlier ones and never
/// match; `d` always resolves to DOUBLE.
const TYPE_KEYWORDS: &[(&str, ColumnType)] = &[
    ("s", ColumnType::String),
    ("sb", ColumnType::StringBinary),
    ("t", ColumnType::Text),
    ("ct", ColumnType::CiText),
    ("ts", ColumnType::TsVector),
    ("i", ColumnType::Integer),
    ("bi", ColumnType::BigInt),
    ("r", ColumnType::Real),
    ("d", ColumnType::Double),
    ("de", ColumnType::Decimal),
    ("bi", ColumnType::BigInt),
    ("f", ColumnType::Float),
    ("d", ColumnType::Date),
    ("b", ColumnType::Boolean),
    ("u", ColumnType::Uuid),
];

/// Keyword outside the table that marks a boolean column. Its nullability
/// slot is read as the default value.
pub const BOOLEAN_KEYWORD: &str = "Boolean";

/// Look up a bare keyword (no size suffix). First match wins.
pub fn lookup_keyword(keyword: &str) -> Option<ColumnType> {
    TYPE_KEYWORDS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, column_type)| *column_type)
}

/// A type slot string split into keyword and optional size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeKeyword {
    pub keyword: String,
    pub size: Option<SizeArg>,
}

impl TypeKeyword {
    /// Split `keyword=size`. Only the first two `=`-separated parts are used.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split('=');
        let keyword = parts.next().unwrap_or_default().to_string();
        let size = if raw.contains('=') {
            parts.next().map(parse_size)
        } else {
            None
        };
        Self { keyword, size }
    }

    /// Bare `Boolean`, with no size suffix
    pub fn is_boolean(&self) -> bool {
        self.keyword == BOOLEAN_KEYWORD && self.size.is_none()
    }

    /// Resolve against the keyword table.
    pub fn resolve(&self) -> ColumnTypeSpec {
        match (lookup_keyword(&self.keyword), &self.size) {
            (Some(base), None) => ColumnTypeSpec::Plain(base),
            (Some(base), Some(size)) => ColumnTypeSpec::Sized {
                base,
                size: size.clone(),
            },
            (None, size) => ColumnTypeSpec::Unresolved {
                keyword: self.keyword.clone(),
                size: size.clone(),
            },
        }
    }
}

/// Parse a size suffix with leading-integer semantics: surrounding
/// whitespace, an optional sign and leading digits. Only a positive result
/// counts as a length.
fn parse_size(raw: &str) -> SizeArg {
    match leading_integer(raw) {
        Some((false, n)) if n > 0 => SizeArg::Length(n),
        _ => SizeArg::Raw(raw.to_string()),
    }
}

/// Sign and magnitude of the leading integer, `None` without digits or when
/// the digits overflow `u64`.
fn leading_integer(raw: &str) -> Option<(bool, u64)> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: u64 = digits[..end].parse().ok()?;
    Some((negative, value))
}
