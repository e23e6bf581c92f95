//! Table-level constraint parsing
//!
//! ## Supported Syntax
//!
//! ```sql
//! CONSTRAINT name FOREIGN KEY (col [, ...]) REFERENCES table (col [, ...]) [actions]
//! CONSTRAINT name PRIMARY KEY (col [, ...])
//! CONSTRAINT name <anything else>          -- kept as raw text
//! FOREIGN KEY (...) REFERENCES table (...)  -- unnamed, name synthesized
//! PRIMARY KEY (...) | UNIQUE (...) | CHECK (...) | EXCLUDE ...
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::{
    normalize_identifier, split_column_list, synthesize_fk_name, IDENT, QUALIFIED_IDENT,
};
use crate::model::ForeignKey;

static NAMED_CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)^CONSTRAINT\s+({})\s+(.+)$", IDENT)).unwrap()
});
static FOREIGN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^FOREIGN\s+KEY\s*\(([^)]*)\)\s*REFERENCES\s+({})\s*\(([^)]*)\)",
        QUALIFIED_IDENT
    ))
    .unwrap()
});
static PRIMARY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^PRIMARY\s+KEY\s*\(([^)]*)\)").unwrap());
static UNNAMED_CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:PRIMARY\s+KEY|FOREIGN\s+KEY|UNIQUE|CHECK|EXCLUDE)\b").unwrap()
});

/// A recognized table-level constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraint {
    /// One entry per referencing column; composite keys share a name
    ForeignKeys(Vec<ForeignKey>),
    /// Primary key columns plus the raw clause, which is kept as a constraint
    PrimaryKey { columns: Vec<String>, raw: String },
    /// Any other constraint, kept verbatim
    Other(String),
}

/// Parse a table-level constraint fragment.
///
/// Returns `None` when the fragment is not a constraint this parser
/// recognizes (usually because it is a column declaration).
pub fn parse_table_constraint(table_name: &str, fragment: &str) -> Option<TableConstraint> {
    let fragment = fragment.trim();

    if let Some(caps) = NAMED_CONSTRAINT_RE.captures(fragment) {
        let name = normalize_identifier(&caps[1]);
        let definition = caps[2].trim();
        let raw = format!("CONSTRAINT {} {}", name, definition);
        return Some(classify_definition(definition, Some(&name), table_name, raw));
    }

    if UNNAMED_CONSTRAINT_RE.is_match(fragment) {
        return Some(classify_definition(
            fragment,
            None,
            table_name,
            fragment.to_string(),
        ));
    }

    None
}

fn classify_definition(
    definition: &str,
    name: Option<&str>,
    table_name: &str,
    raw: String,
) -> TableConstraint {
    if let Some(keys) = parse_foreign_key(definition, name, table_name) {
        return TableConstraint::ForeignKeys(keys);
    }

    if let Some(caps) = PRIMARY_KEY_RE.captures(definition) {
        let columns = split_column_list(&caps[1]);
        if !columns.is_empty() {
            return TableConstraint::PrimaryKey { columns, raw };
        }
    }

    TableConstraint::Other(raw)
}

/// `FOREIGN KEY (a, b) REFERENCES t (x, y)` becomes one key per column pair.
/// Column lists of different lengths are not recognized.
fn parse_foreign_key(
    definition: &str,
    name: Option<&str>,
    table_name: &str,
) -> Option<Vec<ForeignKey>> {
    let caps = FOREIGN_KEY_RE.captures(definition)?;
    let columns = split_column_list(&caps[1]);
    let referenced_table = normalize_identifier(&caps[2]);
    let referenced_columns = split_column_list(&caps[3]);

    if columns.is_empty() || columns.len() != referenced_columns.len() {
        return None;
    }

    let constraint_name = match name {
        Some(name) => name.to_string(),
        None => synthesize_fk_name(table_name, &columns),
    };

    Some(
        columns
            .into_iter()
            .zip(referenced_columns)
            .map(|(column, references_column)| ForeignKey {
                column,
                references_table: referenced_table.clone(),
                references_column,
                constraint_name: constraint_name.clone(),
            })
            .collect(),
    )
}
