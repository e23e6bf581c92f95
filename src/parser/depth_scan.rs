//! Quote-aware parenthesis depth scanning
//!
//! Splitting a table body on commas needs to know the nesting depth: the comma
//! in `NUMERIC(10, 2)` or `CHECK (a IN (1, 2))` is not a separator. Every scan
//! here walks the text once, tracking depth and whether it is inside a
//! single-quoted literal or a double-quoted identifier. Parentheses and commas
//! inside quotes never count.

/// Tracks quoting state while walking characters.
///
/// Escape-string literals (`E'it\'s'`) treat a backslash as escaping the
/// next character; ordinary literals only know the doubled quote.
#[derive(Debug, Default, Clone, Copy)]
struct QuoteState {
    quote: Option<char>,
    backslash_escapes: bool,
    escaped: bool,
    prev: Option<char>,
    before_prev: Option<char>,
}

impl QuoteState {
    /// Feed one character. Returns true when the character is part of a
    /// quoted span (including its delimiters).
    #[inline]
    fn feed(&mut self, ch: char) -> bool {
        let quoted = match self.quote {
            Some(_) if self.escaped => {
                self.escaped = false;
                true
            }
            Some(_) if self.backslash_escapes && ch == '\\' => {
                self.escaped = true;
                true
            }
            Some(q) => {
                // A doubled quote ('') closes and immediately reopens
                if ch == q {
                    self.quote = None;
                }
                true
            }
            None if ch == '\'' || ch == '"' => {
                let reopened = self.prev == Some(ch) && self.backslash_escapes;
                self.quote = Some(ch);
                self.backslash_escapes = ch == '\'' && (reopened || self.escape_prefix());
                true
            }
            None => false,
        };
        self.before_prev = self.prev;
        self.prev = Some(ch);
        quoted
    }

    /// True when the previous character is a standalone `E` / `e` prefix.
    fn escape_prefix(&self) -> bool {
        matches!(self.prev, Some('E' | 'e'))
            && !self
                .before_prev
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }
}

/// Split on commas at parenthesis depth 0.
///
/// Fragments are trimmed; empty fragments are dropped.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quotes = QuoteState::default();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if quotes.feed(ch) {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let part = text[start..i].trim();
                if !part.is_empty() {
                    parts.push(part);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = text[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }

    parts
}

/// Find the `)` matching the `(` at byte offset `open`.
///
/// Returns `None` if `open` is not a `(` or the group never closes.
pub fn find_closing_paren(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }

    let mut quotes = QuoteState::default();
    let mut depth: usize = 0;

    for (i, ch) in text[open..].char_indices() {
        if quotes.feed(ch) {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Read one value token starting at byte offset `start`.
///
/// The token ends at the first whitespace or comma outside quotes and
/// parentheses, or at a `)` that closes a group opened before `start`.
/// Quoted literals and parenthesized groups are therefore captured whole:
/// `'hello world'`, `nextval('seq', 1)`, `(now() + interval '1 day')`.
pub fn scan_value_token(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let mut quotes = QuoteState::default();
    let mut depth: usize = 0;
    let mut end = rest.len();

    for (i, ch) in rest.char_indices() {
        if quotes.feed(ch) {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => {
                end = i;
                break;
            }
            ')' => depth -= 1,
            ',' if depth == 0 => {
                end = i;
                break;
            }
            c if c.is_whitespace() && depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    &rest[..end]
}

/// Blank out the contents of quoted literals and identifiers.
///
/// The result has the same byte length as the input, so offsets found by
/// matching keywords in the masked text index the original text. Quote
/// characters themselves are kept.
pub fn mask_literals(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut quotes = QuoteState::default();

    for ch in text.chars() {
        let was_quoted = quotes.quote.is_some();
        let quoted = quotes.feed(ch);
        if quoted && was_quoted && quotes.quote.is_some() {
            // Inside the literal: keep byte length, drop the content
            for _ in 0..ch.len_utf8() {
                masked.push(' ');
            }
        } else {
            masked.push(ch);
        }
    }

    masked
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
