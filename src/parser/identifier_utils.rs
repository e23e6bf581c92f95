//! Identifier handling for PostgreSQL names.
//!
//! Identifiers may be bare (`orders`), double-quoted (`"Order Items"`), or
//! schema-qualified (`public.orders`). The model stores them without quotes;
//! qualification is kept as written.

/// Regex fragment matching one bare or double-quoted identifier.
///
/// Bare identifiers may use any Unicode letter, as PostgreSQL allows
/// (`khách_hàng`).
pub const IDENT: &str = r#"(?:"[^"]+"|[\p{L}_][\p{L}\p{N}_$]*)"#;

/// Regex fragment matching an optionally schema-qualified identifier.
pub const QUALIFIED_IDENT: &str =
    r#"(?:"[^"]+"|[\p{L}_][\p{L}\p{N}_$]*)(?:\s*\.\s*(?:"[^"]+"|[\p{L}_][\p{L}\p{N}_$]*))?"#;

/// Strips surrounding whitespace and double quotes from an identifier.
///
/// Qualified names have each part unquoted: `"public"."Orders"` becomes
/// `public.Orders`.
pub fn normalize_identifier(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| part.trim().trim_matches('"'))
        .collect::<Vec<_>>()
        .join(".")
}

/// The last part of a possibly qualified name: `public.orders` -> `orders`.
pub fn unqualified_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Split a parenthesized column list body (`a, "B", c`) into normalized names.
pub fn split_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(normalize_identifier)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Synthesized name for a foreign key declared without `CONSTRAINT <name>`.
///
/// Matches PostgreSQL's default: `<table>_<col>[_<col>...]_fkey`.
pub fn synthesize_fk_name(table: &str, columns: &[String]) -> String {
    format!("{}_{}_fkey", unqualified_name(table), columns.join("_"))
}
