//! PostgreSQL schema parsing
//!
//! Lexical recovery of tables, columns, keys, and indexes from DDL text. Only
//! `CREATE TABLE` and `CREATE INDEX` statements are recognized; everything
//! else in the input is inert.

mod column_parser;
mod comment_stripper;
mod constraint_parser;
mod depth_scan;
mod identifier_utils;
mod parse_mode;
mod schema_parser;
mod statement_extractor;
mod table_parser;

pub use column_parser::{parse_column_definition, InlineReference, ParsedColumn};
pub use comment_stripper::{strip_comments, strip_comments_regex};
pub use constraint_parser::{parse_table_constraint, TableConstraint};
pub use depth_scan::split_top_level;
pub use parse_mode::ParseMode;
pub use schema_parser::{parse_schema, parse_schema_file, SchemaParser};
pub use statement_extractor::{
    extract_create_indexes, extract_create_tables, Extracted, IndexStatement, TableStatement,
};

pub(crate) use parse_mode::SkipLog;
