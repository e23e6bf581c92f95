//! Locate `CREATE TABLE` and `CREATE INDEX` statements in comment-free SQL
//!
//! Only the statement headers are matched with regexes. The parenthesized
//! body that follows is found with a quote-aware depth scan, so bodies with
//! nested groups (`NUMERIC(10, 2)`, `CHECK (a IN (1, 2))`, function-call
//! defaults) are captured whole without parsing their interior.

use std::sync::LazyLock;

use regex::Regex;

use super::depth_scan::{collapse_whitespace, find_closing_paren};
use super::identifier_utils::{normalize_identifier, IDENT, QUALIFIED_IDENT};

static CREATE_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bCREATE\s+(?:(?:GLOBAL|LOCAL)\s+)?(?:(?:TEMP|TEMPORARY|UNLOGGED)\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?({})\s*\(",
        QUALIFIED_IDENT
    ))
    .unwrap()
});

static CREATE_INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bCREATE\s+INDEX\s+(?:CONCURRENTLY\s+)?(?:IF\s+NOT\s+EXISTS\s+)?(?:({})\s+)?ON\s+(?:ONLY\s+)?({})\s*(?:USING\s+\w+\s*)?\(",
        IDENT, QUALIFIED_IDENT
    ))
    .unwrap()
});

/// A `CREATE TABLE <name> ( <body> );` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatement<'a> {
    /// Table name without quotes
    pub name: String,
    /// Text between the outermost parentheses, trimmed
    pub body: &'a str,
}

/// A `CREATE INDEX [<name>] ON <table> ( <columns> )` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatement {
    pub name: Option<String>,
    pub table: String,
    /// Raw column list, whitespace collapsed
    pub columns: String,
}

/// Result of matching one statement header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<'a, T> {
    Statement(T),
    /// Header matched but the parenthesized part did not close properly.
    /// Carries the matched header text.
    Unterminated(&'a str),
}

/// Find every `CREATE TABLE` statement, in source order.
pub fn extract_create_tables(sql: &str) -> Vec<Extracted<'_, TableStatement<'_>>> {
    let mut results = Vec::new();
    let mut pos = 0;

    while let Some(caps) = CREATE_TABLE_RE.captures_at(sql, pos) {
        let Some(header) = caps.get(0) else { break };
        let name = normalize_identifier(&caps[1]);
        let open = header.end() - 1;

        match find_closing_paren(sql, open).filter(|&close| is_statement_end(&sql[close + 1..]))
        {
            Some(close) => {
                results.push(Extracted::Statement(TableStatement {
                    name,
                    body: sql[open + 1..close].trim(),
                }));
                pos = close + 1;
            }
            None => {
                results.push(Extracted::Unterminated(header.as_str()));
                pos = header.end();
            }
        }
    }

    results
}

/// Find every `CREATE INDEX` statement, in source order.
pub fn extract_create_indexes(sql: &str) -> Vec<Extracted<'_, IndexStatement>> {
    let mut results = Vec::new();
    let mut pos = 0;

    while let Some(caps) = CREATE_INDEX_RE.captures_at(sql, pos) {
        let Some(header) = caps.get(0) else { break };
        let open = header.end() - 1;

        match find_closing_paren(sql, open) {
            Some(close) => {
                results.push(Extracted::Statement(IndexStatement {
                    name: caps.get(1).map(|m| normalize_identifier(m.as_str())),
                    table: normalize_identifier(&caps[2]),
                    columns: collapse_whitespace(&sql[open + 1..close]),
                }));
                pos = close + 1;
            }
            None => {
                results.push(Extracted::Unterminated(header.as_str()));
                pos = header.end();
            }
        }
    }

    results
}

/// A table body must be followed by `;`, or be the last thing in the input.
fn is_statement_end(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with(';')
}
