//! Unit tests for the PostgreSQL schema parser
//!
//! These tests drive the parser through its public API, either from SQL text
//! or from temporary schema files.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use pg2dbml::model::SkipReason;
use pg2dbml::parser::{
    extract_create_indexes, parse_schema, parse_schema_file, strip_comments, Extracted,
    ParseMode,
};

/// Helper to create a temp SQL file with content
fn create_sql_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn parse(sql: &str) -> pg2dbml::model::SchemaModel {
    parse_schema(sql, ParseMode::Lenient).unwrap()
}

// ============================================================================
// Comment Stripping Tests
// ============================================================================

#[test]
fn test_strip_line_and_block_comments() {
    let sql = "CREATE TABLE a ( -- trailing\n  id INT /* inline, ( */\n);";
    let stripped = strip_comments(sql);
    assert!(!stripped.contains("trailing"));
    assert!(!stripped.contains("inline"));
    assert!(stripped.contains("id INT"));
}

#[test]
fn test_comment_markers_inside_literals_survive() {
    let sql = "CREATE TABLE a (url TEXT DEFAULT 'http://x--y', note TEXT DEFAULT '/* keep */');";
    let model = parse(sql);
    let table = model.table("a").unwrap();
    assert_eq!(
        table.column("url").unwrap().default_value.as_deref(),
        Some("'http://x--y'")
    );
    assert_eq!(
        table.column("note").unwrap().default_value.as_deref(),
        Some("'/* keep */'")
    );
}

#[test]
fn test_commented_out_table_is_ignored() {
    let sql = "/* CREATE TABLE ghost (id INT); */\n-- CREATE TABLE ghost2 (id INT);\nCREATE TABLE real (id INT);";
    let model = parse(sql);
    let names: Vec<_> = model.table_names().collect();
    assert_eq!(names, vec!["real"]);
}

// ============================================================================
// CREATE TABLE Header Tests
// ============================================================================

#[test]
fn test_table_header_variants() {
    let sql = r#"
CREATE TABLE IF NOT EXISTS a (id INT);
CREATE TEMP TABLE b (id INT);
create unlogged table c (id int);
CREATE TABLE public.d (id INT);
CREATE TABLE "Order Items" (id INT);
"#;
    let model = parse(sql);
    let names: Vec<_> = model.table_names().collect();
    assert_eq!(names, vec!["a", "b", "c", "public.d", "Order Items"]);
}

#[test]
fn test_other_statements_are_inert() {
    let sql = r#"
CREATE EXTENSION IF NOT EXISTS "uuid-ossp";
CREATE TABLE a (id INT);
ALTER TABLE a ADD COLUMN name TEXT;
INSERT INTO a (id) VALUES (1);
CREATE VIEW v AS SELECT id FROM a;
CREATE SEQUENCE s START 1;
"#;
    let model = parse(sql);
    assert_eq!(model.len(), 1);
    assert_eq!(model.table("a").unwrap().columns.len(), 1);
    assert!(model.skipped().is_empty());
}

#[test]
fn test_unterminated_table_does_not_swallow_next() {
    let sql = "CREATE TABLE broken (id INT\nCREATE TABLE ok (id INT);";
    let model = parse(sql);
    let names: Vec<_> = model.table_names().collect();
    assert_eq!(names, vec!["ok"]);
    assert_eq!(model.skipped().len(), 1);
    assert_eq!(model.skipped()[0].reason, SkipReason::UnterminatedTable);
}

#[test]
fn test_no_tables() {
    let model = parse("SELECT 1;");
    assert!(model.is_empty());
    assert_eq!(model.relationships(), vec![]);
}

// ============================================================================
// Column Tests
// ============================================================================

#[test]
fn test_multi_word_and_array_types() {
    let sql = r#"
CREATE TABLE readings (
    id BIGSERIAL PRIMARY KEY,
    value DOUBLE PRECISION NOT NULL,
    taken_at TIMESTAMP WITH TIME ZONE DEFAULT now(),
    label CHARACTER VARYING(40),
    tags TEXT[],
    payload JSONB
);
"#;
    let model = parse(sql);
    let table = model.table("readings").unwrap();
    let types: Vec<_> = table.columns.iter().map(|c| c.data_type.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "BIGSERIAL",
            "DOUBLE PRECISION",
            "TIMESTAMP WITH TIME ZONE",
            "CHARACTER VARYING(40)",
            "TEXT[]",
            "JSONB"
        ]
    );
    assert_eq!(
        table.column("taken_at").unwrap().default_value.as_deref(),
        Some("now()")
    );
}

#[test]
fn test_column_names_resembling_keywords() {
    let sql = "CREATE TABLE t (constraint_type TEXT, likes INTEGER, unique_code TEXT, primary_key_hint TEXT);";
    let model = parse(sql);
    let table = model.table("t").unwrap();
    assert_eq!(table.columns.len(), 4);
    assert!(table.constraints.is_empty());
    assert!(table.primary_keys.is_empty());
    assert!(table.columns.iter().all(|c| c.constraints.is_empty()));
}

#[test]
fn test_unicode_identifiers() {
    let sql = r#"
CREATE TABLE khách_hàng (
    mã_kh SERIAL PRIMARY KEY,
    tên VARCHAR(100) NOT NULL
);
CREATE TABLE sản_phẩm (
    id SERIAL PRIMARY KEY,
    giá NUMERIC(10,2),
    mã_kh INTEGER REFERENCES khách_hàng(mã_kh)
);
CREATE INDEX idx_giá ON sản_phẩm (giá);
"#;
    let model = parse_schema(sql, ParseMode::Strict).unwrap();
    let names: Vec<_> = model.table_names().collect();
    assert_eq!(names, vec!["khách_hàng", "sản_phẩm"]);

    let customers = model.table("khách_hàng").unwrap();
    assert!(customers.column("mã_kh").unwrap().is_primary_key);
    assert!(customers.column("tên").unwrap().is_not_null);

    let products = model.table("sản_phẩm").unwrap();
    assert_eq!(products.column("giá").unwrap().data_type, "NUMERIC(10,2)");
    assert!(products.column("mã_kh").unwrap().is_foreign_key());
    assert_eq!(products.indexes, vec!["giá"]);
    assert!(model.skipped().is_empty());
}

#[test]
fn test_escape_string_default_keeps_table() {
    let sql = r"CREATE TABLE t (a TEXT DEFAULT E'it\'s', b INT, c INT);";
    let model = parse_schema(sql, ParseMode::Strict).unwrap();
    let table = model.table("t").unwrap();
    let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(
        table.column("a").unwrap().default_value.as_deref(),
        Some(r"E'it\'s'")
    );
}

#[test]
fn test_quoted_column_names() {
    let model = parse("CREATE TABLE t (\"Line No\" INTEGER NOT NULL, \"select\" TEXT);");
    let table = model.table("t").unwrap();
    assert!(table.column("Line No").unwrap().is_not_null);
    assert!(table.column("select").is_some());
}

// ============================================================================
// Key Tests
// ============================================================================

#[test]
fn test_inline_reference_becomes_foreign_key() {
    let model = parse(
        "CREATE TABLE a (id INT PRIMARY KEY); CREATE TABLE b (a_id INT NOT NULL REFERENCES a(id) ON DELETE CASCADE);",
    );
    let b = model.table("b").unwrap();
    assert_eq!(b.foreign_keys.len(), 1);
    assert_eq!(b.foreign_keys[0].constraint_name, "b_a_id_fkey");
    let column = b.column("a_id").unwrap();
    assert!(column.is_foreign_key());
    assert!(column.is_not_null);
}

#[test]
fn test_inline_reference_without_column_is_ignored() {
    let model = parse("CREATE TABLE b (a_id INT REFERENCES a);");
    let b = model.table("b").unwrap();
    assert!(b.foreign_keys.is_empty());
    assert!(!b.column("a_id").unwrap().is_foreign_key());
}

#[test]
fn test_composite_foreign_key_split_per_column() {
    let sql = r#"
CREATE TABLE shipments (
    order_id INT,
    line_no INT,
    CONSTRAINT fk_line FOREIGN KEY (order_id, line_no) REFERENCES order_lines (order_id, line_no)
);
"#;
    let model = parse(sql);
    let table = model.table("shipments").unwrap();
    let pairs: Vec<_> = table
        .foreign_keys
        .iter()
        .map(|fk| (fk.column.as_str(), fk.references_column.as_str(), fk.constraint_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("order_id", "order_id", "fk_line"), ("line_no", "line_no", "fk_line")]
    );
    assert!(table.column("line_no").unwrap().is_foreign_key());
}

#[test]
fn test_foreign_key_before_its_column() {
    let sql = "CREATE TABLE b (CONSTRAINT fk_a FOREIGN KEY (a_id) REFERENCES a(id), a_id INT);";
    let model = parse(sql);
    assert!(model.table("b").unwrap().column("a_id").unwrap().is_foreign_key());
}

#[test]
fn test_foreign_key_to_missing_column_stays_on_table() {
    let sql = "CREATE TABLE b (id INT, CONSTRAINT fk_x FOREIGN KEY (ghost) REFERENCES a(id));";
    let model = parse(sql);
    let b = model.table("b").unwrap();
    assert_eq!(b.foreign_keys.len(), 1);
    assert!(b.columns.iter().all(|c| !c.is_foreign_key()));
    assert_eq!(model.relationships().len(), 1);
}

#[test]
fn test_relationships_name_existing_source_columns() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/supermarket/schema.sql");
    let model = parse_schema_file(&path, ParseMode::Lenient).unwrap();
    let relationships = model.relationships();
    assert!(!relationships.is_empty());

    for rel in &relationships {
        let table = model
            .table(&rel.from_table)
            .unwrap_or_else(|| panic!("missing table {}", rel.from_table));
        assert!(
            table.column(&rel.from_column).is_some(),
            "{}.{} is not a column",
            rel.from_table,
            rel.from_column
        );
    }
}

#[test]
fn test_table_level_primary_key_flags_columns() {
    let sql = "CREATE TABLE items (order_id INT, product_id INT, CONSTRAINT pk_items PRIMARY KEY (order_id, product_id));";
    let model = parse(sql);
    let items = model.table("items").unwrap();
    assert_eq!(items.primary_keys, vec!["order_id", "product_id"]);
    assert!(items.columns.iter().all(|c| c.is_primary_key));
    assert_eq!(
        items.constraints,
        vec!["CONSTRAINT pk_items PRIMARY KEY (order_id, product_id)"]
    );
}

// ============================================================================
// Index Tests
// ============================================================================

#[test]
fn test_index_variants() {
    let sql = r#"
CREATE INDEX CONCURRENTLY IF NOT EXISTS idx_a ON t (a);
CREATE INDEX ON t USING btree (b, c);
CREATE INDEX idx_only ON ONLY t (d);
CREATE UNIQUE INDEX idx_u ON t (e);
"#;
    let indexes: Vec<_> = extract_create_indexes(sql)
        .into_iter()
        .map(|e| match e {
            Extracted::Statement(index) => (index.name, index.table, index.columns),
            Extracted::Unterminated(h) => panic!("unexpected unterminated index: {}", h),
        })
        .collect();
    assert_eq!(
        indexes,
        vec![
            (Some("idx_a".to_string()), "t".to_string(), "a".to_string()),
            (None, "t".to_string(), "b, c".to_string()),
            (Some("idx_only".to_string()), "t".to_string(), "d".to_string()),
        ]
    );
}

#[test]
fn test_index_on_unknown_table_recorded() {
    let model = parse("CREATE TABLE t (id INT);\nCREATE INDEX idx ON ghosts (id);");
    assert!(model.table("t").unwrap().indexes.is_empty());
    assert_eq!(model.skipped()[0].reason, SkipReason::UnknownIndexTable);
}

#[test]
fn test_strict_mode_allows_unknown_index_table() {
    let result = parse_schema(
        "CREATE TABLE t (id INT);\nCREATE INDEX idx ON ghosts (id);",
        ParseMode::Strict,
    );
    assert!(result.is_ok());
}

// ============================================================================
// Lenient / Strict Tests
// ============================================================================

#[test]
fn test_lenient_records_skipped_fragments() {
    let model = parse("CREATE TABLE t (id INT, LIKE base INCLUDING ALL, 42);");
    let reasons: Vec<_> = model.skipped().iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![SkipReason::UnsupportedClause, SkipReason::UnrecognizedColumn]
    );
    assert_eq!(model.skipped()[0].context, "table t");
}

#[test]
fn test_strict_error_names_fragment() {
    let err = parse_schema("CREATE TABLE t (id INT, 42);", ParseMode::Strict).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("table t"), "{}", message);
    assert!(message.contains("`42`"), "{}", message);
}

// ============================================================================
// File Input Tests
// ============================================================================

#[test]
fn test_parse_file() {
    let file = create_sql_file(b"CREATE TABLE a (id SERIAL PRIMARY KEY);\n");
    let model = parse_schema_file(file.path(), ParseMode::Lenient).unwrap();
    assert_eq!(model.len(), 1);
}

#[test]
fn test_parse_windows_1252_file() {
    let file = create_sql_file(b"CREATE TABLE a (name TEXT DEFAULT 'caf\xE9');\n");
    let model = parse_schema_file(file.path(), ParseMode::Lenient).unwrap();
    assert_eq!(
        model.table("a").unwrap().column("name").unwrap().default_value.as_deref(),
        Some("'café'")
    );
}

#[test]
fn test_parse_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = parse_schema_file(&dir.path().join("missing.sql"), ParseMode::Lenient);
    assert!(result.is_err());
}
