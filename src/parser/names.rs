//! Column name normalization
//!
//! Converts mixed-case logical column names into lower snake case storage
//! names:
//!
//! ```ignore
//! assert_eq!(normalize("fooBar"), "foo_bar");
//! assert_eq!(normalize("ABCName"), "abc_name");
//! assert_eq!(normalize("already_snake"), "already_snake");
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// Letters used to build the case boundary tables.
///
/// `q` is absent and `g` appears twice, so a `Q`/`q` never starts or ends a
/// case run. Existing storage names depend on this, keep it as is.
const BOUNDARY_LETTERS: &str = "abcdefghijklmnopgrstuvwxyz";

static UPPER_LETTERS: LazyLock<HashSet<char>> = LazyLock::new(|| {
    BOUNDARY_LETTERS
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .collect()
});

static LOWER_LETTERS: LazyLock<HashSet<char>> =
    LazyLock::new(|| BOUNDARY_LETTERS.chars().collect());

#[inline]
fn is_upper(c: Option<char>) -> bool {
    c.is_some_and(|c| UPPER_LETTERS.contains(&c))
}

#[inline]
fn is_lower(c: Option<char>) -> bool {
    c.is_some_and(|c| LOWER_LETTERS.contains(&c))
}

/// Convert a column name into its lower snake case storage name.
///
/// An underscore is inserted before an upper case letter that follows a lower
/// case letter, and before the last letter of an upper case run when a lower
/// case letter follows it. Every other character is lowercased and emitted
/// unchanged.
pub fn normalize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        if is_upper(Some(c)) && (is_lower(prev) || (is_upper(prev) && is_lower(next))) {
            result.push('_');
            result.push(c.to_ascii_lowercase());
            continue;
        }

        result.extend(c.to_lowercase());
    }

    result
}

/// Storage field for a column name, or `None` when the name is already in
/// storage form.
pub fn storage_field(name: &str) -> Option<String> {
    let normalized = normalize(name);
    (normalized != name).then_some(normalized)
}
