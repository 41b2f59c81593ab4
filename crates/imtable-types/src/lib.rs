//! Shared types for ibus-table style mapping tables.
//!
//! A table maps a phonetic input key (for example `ab` in Quick/Cangjie) to a
//! single Chinese character and carries an integer weight. Larger weights mean
//! *lower* selection priority in this convention, so demoting a spelling means
//! raising or fixing its number rather than lowering it.
//!
//! Use [`RecordKey`] to address a row, [`Record`] for its mutable attributes and
//! the helpers [`is_x_prefixed`] / [`is_alpha_spelling`] to classify input keys.
//!
//! ```rust
//! use imtable_types::{RecordKey, is_alpha_spelling, is_x_prefixed, parse_character};
//!
//! let key = RecordKey::new("xa", parse_character("中").unwrap());
//! assert!(is_x_prefixed(&key.input));
//! assert!(is_alpha_spelling("ab"));
//! assert!(!is_alpha_spelling("xa"));
//! ```

use std::fmt;

/// Row priority; a larger number ranks the row lower.
pub type Weight = i64;

/// Input letters used to build canonical spellings. `x` is reserved for
/// alternate spellings and is therefore absent.
pub const ALPHA: &str = "abcdefghijklmnopqrstuvwyz";

/// `(input key, character)` pair uniquely identifying a row in a table.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RecordKey {
    pub input: String,
    pub character: char,
}

impl RecordKey {
    pub fn new(input: impl Into<String>, character: char) -> Self {
        Self {
            input: input.into(),
            character,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.input, self.character)
    }
}

/// Mutable attributes of a row.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    pub weight: Weight,
    /// Trailing free-text field; empty when the row had only three fields.
    pub comment: String,
}

impl Record {
    pub fn new(weight: Weight, comment: impl Into<String>) -> Self {
        Self {
            weight,
            comment: comment.into(),
        }
    }
}

/// Whether `input` is an alternate spelling (starts with a literal `x`).
pub fn is_x_prefixed(input: &str) -> bool {
    input.starts_with('x')
}

/// Whether `input` is a one- or two-letter spelling made only of [`ALPHA`]
/// letters.
pub fn is_alpha_spelling(input: &str) -> bool {
    (1..=2).contains(&input.len()) && input.chars().all(is_alpha)
}

/// Membership test for [`ALPHA`].
pub fn is_alpha(c: char) -> bool {
    c.is_ascii_lowercase() && c != 'x'
}

/// Parse a character field, accepting exactly one Unicode scalar value.
pub fn parse_character(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
