//! Column definition parsing
//!
//! ## Supported Syntax
//!
//! ```sql
//! name TYPE[(params)][[]] [PRIMARY KEY] [NOT NULL] [UNIQUE]
//!     [DEFAULT value] [CHECK (expr)] [REFERENCES table (column)]
//! ```
//!
//! Modifiers may appear in any order. The name and type are matched at the
//! start of the fragment; every modifier is then searched for in the rest of
//! the fragment with string literal contents masked out, so a column named
//! `unique_code` or a default of `'NOT NULL'` is not mistaken for a keyword.

use std::sync::LazyLock;

use regex::Regex;

use super::depth_scan::{find_closing_paren, mask_literals, scan_value_token};
use super::identifier_utils::{normalize_identifier, IDENT, QUALIFIED_IDENT};
use crate::model::Column;
use crate::util::starts_with_ci;

/// Type names, including the multi-word PostgreSQL spellings, an optional
/// parameter list, and array suffixes.
const DATA_TYPE: &str = r"(?:double\s+precision|character\s+varying|bit\s+varying|(?:timestamp|time)(?:\s*\(\s*\d+\s*\))?\s+with(?:out)?\s+time\s+zone|[\p{L}_][\p{L}\p{N}_]*(?:\.[\p{L}_][\p{L}\p{N}_]*)?)(?:\s*\([^)]*\))?(?:\s*\[\s*\d*\s*\])*";

static COLUMN_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^({})\s+({})", IDENT, DATA_TYPE)).unwrap());
static PRIMARY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap());
static NOT_NULL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap());
static UNIQUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bUNIQUE\b").unwrap());
static DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bDEFAULT\s+").unwrap());
static CHECK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bCHECK\s*\(").unwrap());
static REFERENCES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bREFERENCES\s+({})\s*\(\s*({})\s*\)",
        QUALIFIED_IDENT, IDENT
    ))
    .unwrap()
});

/// Target of an inline `REFERENCES table (column)` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineReference {
    pub table: String,
    pub column: String,
}

/// Result of parsing one column fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColumn {
    pub column: Column,
    /// Inline foreign key, turned into a table foreign key by the caller
    pub inline_reference: Option<InlineReference>,
}

/// Parse one column declaration, e.g. `price NUMERIC(10,2) NOT NULL DEFAULT 0`.
///
/// Returns `None` when the fragment does not start with `name type`.
pub fn parse_column_definition(fragment: &str) -> Option<ParsedColumn> {
    let fragment = fragment.trim();
    let head = COLUMN_HEAD_RE.captures(fragment)?;

    let name = normalize_identifier(&head[1]);
    let data_type = head[2].trim().to_string();

    let tail = &fragment[head.get(0)?.end()..];
    let masked = mask_literals(tail);

    let mut column = Column::new(name, data_type);
    column.is_primary_key = PRIMARY_KEY_RE.is_match(&masked);
    column.is_not_null = NOT_NULL_RE.is_match(&masked);
    column.default_value = DEFAULT_RE
        .find(&masked)
        .map(|m| scan_value_token(tail, m.end()))
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    if UNIQUE_RE.is_match(&masked) {
        column.constraints.push("UNIQUE".to_string());
    }
    if let Some(check) = extract_check(tail, &masked) {
        column.constraints.push(check.to_string());
    }

    let inline_reference = REFERENCES_RE
        .captures_iter(tail)
        .find(|caps| {
            caps.get(0)
                .is_some_and(|m| starts_with_ci(&masked[m.start()..], "REFERENCES"))
        })
        .map(|caps| InlineReference {
            table: normalize_identifier(&caps[1]),
            column: normalize_identifier(&caps[2]),
        });

    Some(ParsedColumn {
        column,
        inline_reference,
    })
}

/// The first `CHECK (...)` clause with its balanced parenthesis group.
fn extract_check<'a>(tail: &'a str, masked: &str) -> Option<&'a str> {
    let m = CHECK_RE.find(masked)?;
    let close = find_closing_paren(tail, m.end() - 1)?;
    Some(&tail[m.start()..=close])
}
