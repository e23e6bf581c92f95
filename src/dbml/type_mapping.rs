//! PostgreSQL type names and default expressions rendered as DBML

/// Known PostgreSQL base types and their DBML spelling
const TYPE_MAPPING: &[(&str, &str)] = &[
    ("SERIAL", "int"),
    ("INTEGER", "int"),
    ("BIGINT", "bigint"),
    ("SMALLINT", "smallint"),
    ("DECIMAL", "decimal"),
    ("NUMERIC", "decimal"),
    ("REAL", "float"),
    ("DOUBLE PRECISION", "double"),
    ("BOOLEAN", "boolean"),
    ("CHAR", "char"),
    ("VARCHAR", "varchar"),
    ("CHARACTER VARYING", "varchar"),
    ("TEXT", "text"),
    ("DATE", "date"),
    ("TIME", "time"),
    ("TIMESTAMP", "timestamp"),
    ("TIMESTAMPTZ", "timestamptz"),
    ("JSON", "json"),
    ("JSONB", "jsonb"),
];

/// Convert a declared PostgreSQL type to its DBML form.
///
/// The base type (text before `(`) is looked up case-insensitively; its
/// parameters are kept, so `VARCHAR(100)` becomes `varchar(100)`. Unknown
/// types are lowercased. A base type containing whitespace is double-quoted,
/// since DBML type names are single tokens.
pub fn convert_data_type(pg_type: &str) -> String {
    let pg_type = pg_type.trim();
    let split = pg_type.find(['(', '[']).unwrap_or(pg_type.len());
    let (base, suffix) = pg_type.split_at(split);
    let base = base.trim_end();
    let upper = base.to_uppercase();

    let mapped = TYPE_MAPPING
        .iter()
        .find(|(pg, _)| *pg == upper)
        .map(|(_, dbml)| (*dbml).to_string())
        .unwrap_or_else(|| base.to_lowercase());

    let converted = format!("{}{}", mapped, suffix.to_lowercase());
    // Whitespace inside the parameter list is fine; anywhere else it is not
    let trailing = suffix.rsplit(')').next().unwrap_or_default();
    if mapped.contains(char::is_whitespace) || trailing.contains(char::is_whitespace) {
        format!("\"{}\"", converted)
    } else {
        converted
    }
}

/// Format a raw default expression for a DBML column note.
///
/// `CURRENT_TIMESTAMP`, `CURRENT_DATE` and `now()` become `` `now()` ``,
/// booleans are lowercased, plain digit strings pass through, and anything
/// else is double-quoted.
pub fn format_default_value(default_value: &str) -> String {
    let value = default_value.trim();
    let upper = value.to_uppercase();

    match upper.as_str() {
        "CURRENT_TIMESTAMP" | "CURRENT_DATE" | "NOW()" => "`now()`".to_string(),
        "TRUE" | "FALSE" => value.to_lowercase(),
        _ if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => value.to_string(),
        _ => quote_string(value),
    }
}

/// Double-quote text, escaping embedded quotes and backslashes.
pub(crate) fn quote_string(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
