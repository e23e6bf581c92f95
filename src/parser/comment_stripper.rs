//! SQL comment removal
//!
//! Comments may contain parentheses, commas, and keywords that would confuse
//! statement and column splitting, so they are removed before any other step.
//!
//! Comments are located with the sqlparser tokenizer so that `--` or `/*`
//! inside a string literal is left alone. Each comment token's location is
//! mapped back to a byte range of the input and only that range is removed;
//! everything else, line breaks included, is copied through unchanged. When
//! the input cannot be tokenized (an unterminated literal, for example) a
//! plain regex pass is used instead.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Location, Token, Tokenizer, Whitespace};

static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)--.*$").unwrap());
static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Remove `-- ...` line comments and `/* ... */` block comments.
///
/// Never fails; empty input yields empty output.
pub fn strip_comments(sql: &str) -> String {
    if !sql.contains("--") && !sql.contains("/*") {
        return sql.to_string();
    }

    match comment_ranges(sql) {
        Some(ranges) => remove_ranges(sql, &ranges),
        None => strip_comments_regex(sql),
    }
}

/// Regex-only comment removal, used when tokenizing fails.
///
/// Line comments go first, then block comments, so a `--` inside a block
/// comment truncates that line only.
pub fn strip_comments_regex(sql: &str) -> String {
    let without_lines = LINE_COMMENT_RE.replace_all(sql, "");
    BLOCK_COMMENT_RE.replace_all(&without_lines, "").into_owned()
}

/// Byte ranges of every comment token, or `None` if the tokenizer rejects the
/// input or a token cannot be mapped back onto the source text.
fn comment_ranges(sql: &str) -> Option<Vec<Range<usize>>> {
    let dialect = PostgreSqlDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .tokenize_with_location()
        .ok()?;

    let index = LineIndex::new(sql);
    let mut ranges = Vec::new();

    for token in &tokens {
        let text = match &token.token {
            Token::Whitespace(Whitespace::SingleLineComment { comment, prefix }) => {
                // The terminating line break belongs to the surrounding text
                let body = comment.trim_end_matches(|c| c == '\n' || c == '\r');
                format!("{}{}", prefix, body)
            }
            Token::Whitespace(Whitespace::MultiLineComment(body)) => format!("/*{}*/", body),
            _ => continue,
        };

        let start = index.offset(token.span.start)?;
        let end = start + text.len();
        if sql.get(start..end)? != text {
            return None;
        }
        ranges.push(start..end);
    }

    Some(ranges)
}

fn remove_ranges(sql: &str, ranges: &[Range<usize>]) -> String {
    let mut result = String::with_capacity(sql.len());
    let mut last_end = 0;
    for range in ranges {
        result.push_str(&sql[last_end..range.start]);
        last_end = range.end;
    }
    result.push_str(&sql[last_end..]);
    result
}

/// Maps tokenizer locations (1-based line, 1-based character column) to byte
/// offsets.
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    fn offset(&self, location: Location) -> Option<usize> {
        let line = usize::try_from(location.line).ok()?.checked_sub(1)?;
        let column = usize::try_from(location.column).ok()?.checked_sub(1)?;
        let line_start = *self.line_starts.get(line)?;
        self.text[line_start..]
            .char_indices()
            .nth(column)
            .map(|(i, _)| line_start + i)
    }
}
