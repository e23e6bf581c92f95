//! Schema parser: SQL text to `SchemaModel`
//!
//! Pipeline: comment stripping, `CREATE TABLE` extraction, per-table body
//! parsing, key back-fill, `CREATE INDEX` extraction.

use std::path::Path;

use anyhow::Result;

use super::comment_stripper::strip_comments;
use super::statement_extractor::{extract_create_indexes, extract_create_tables, Extracted};
use super::table_parser::parse_table_definition;
use super::{ParseMode, SkipLog};
use crate::error::Pg2DbmlError;
use crate::model::{backfill_keys, SchemaModel, SkipReason};
use crate::util::read_file_with_encoding_fallback;

/// One-shot parser for a single SQL document.
///
/// Parsing consumes the parser, so an instance cannot accumulate results
/// from unrelated documents.
#[derive(Debug)]
pub struct SchemaParser {
    model: SchemaModel,
    skip_log: SkipLog,
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new(ParseMode::default())
    }
}

impl SchemaParser {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            model: SchemaModel::new(),
            skip_log: SkipLog::new(mode),
        }
    }

    /// Read and parse a schema file.
    ///
    /// A missing or unreadable file is an error; nothing is parsed.
    pub fn parse_file(self, path: &Path) -> Result<SchemaModel> {
        let content = read_file_with_encoding_fallback(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                Pg2DbmlError::InputDecodeError {
                    path: path.to_path_buf(),
                }
            } else {
                Pg2DbmlError::InputReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        self.parse_content(&content)
    }

    /// Parse SQL text.
    pub fn parse_content(mut self, content: &str) -> Result<SchemaModel> {
        let sql = strip_comments(content);

        for extracted in extract_create_tables(&sql) {
            match extracted {
                Extracted::Statement(statement) => {
                    let table =
                        parse_table_definition(&statement.name, statement.body, &mut self.skip_log)?;
                    self.model.insert_table(table);
                }
                Extracted::Unterminated(header) => {
                    self.skip_log
                        .skip("CREATE TABLE", header, SkipReason::UnterminatedTable)?;
                }
            }
        }

        backfill_keys(&mut self.model);
        self.parse_indexes(&sql)?;

        for skipped in self.skip_log.into_skipped() {
            self.model.record_skipped(skipped);
        }

        Ok(self.model)
    }

    fn parse_indexes(&mut self, sql: &str) -> Result<()> {
        for extracted in extract_create_indexes(sql) {
            match extracted {
                Extracted::Statement(index) => match self.model.table_mut(&index.table) {
                    Some(table) => table.indexes.push(index.columns),
                    None => {
                        let fragment = format!("{} ({})", index.table, index.columns);
                        self.skip_log
                            .skip("CREATE INDEX", &fragment, SkipReason::UnknownIndexTable)?;
                    }
                },
                Extracted::Unterminated(header) => {
                    self.skip_log
                        .skip("CREATE INDEX", header, SkipReason::UnterminatedIndex)?;
                }
            }
        }
        Ok(())
    }
}

/// Parse a schema file with a fresh parser.
pub fn parse_schema_file(path: &Path, mode: ParseMode) -> Result<SchemaModel> {
    SchemaParser::new(mode).parse_file(path)
}

/// Parse SQL text with a fresh parser.
pub fn parse_schema(content: &str, mode: ParseMode) -> Result<SchemaModel> {
    SchemaParser::new(mode).parse_content(content)
}
