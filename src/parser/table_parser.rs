//! `CREATE TABLE` body parsing
//!
//! The body is split at depth-0 commas, then handled in two phases:
//!
//! 1. **Constraint extraction**: fragments that are table-level constraints
//!    (`CONSTRAINT name ...`, or unnamed `PRIMARY KEY (...)`,
//!    `FOREIGN KEY (...)`, `UNIQUE (...)`, `CHECK (...)`, `EXCLUDE ...`) are
//!    classified and removed.
//! 2. **Column split**: every remaining fragment is parsed as one column.
//!
//! Foreign keys and raw constraints keep their source order, wherever they
//! appear between the columns.

use anyhow::Result;

use super::column_parser::parse_column_definition;
use super::constraint_parser::{parse_table_constraint, TableConstraint};
use super::depth_scan::{collapse_whitespace, split_top_level};
use super::identifier_utils::synthesize_fk_name;
use super::parse_mode::SkipLog;
use crate::model::{ForeignKey, SkipReason, Table};
use crate::util::starts_with_keyword;

/// Parse the body of `CREATE TABLE <name> ( <body> )` into a table.
///
/// Fragments that are neither constraints nor columns go to `skip_log`,
/// which fails in strict mode.
pub(crate) fn parse_table_definition(
    name: &str,
    body: &str,
    skip_log: &mut SkipLog,
) -> Result<Table> {
    let context = format!("table {}", name);
    let definition = collapse_whitespace(body);
    let fragments = split_top_level(&definition);

    // Phase 1: constraint extraction
    let mut constraints: Vec<(usize, TableConstraint)> = Vec::new();
    let mut column_fragments: Vec<(usize, &str)> = Vec::new();
    for (position, fragment) in fragments.into_iter().enumerate() {
        match parse_table_constraint(name, fragment) {
            Some(constraint) => constraints.push((position, constraint)),
            None => column_fragments.push((position, fragment)),
        }
    }

    // Phase 2: column split
    let mut table = Table::new(name);
    let mut foreign_keys: Vec<(usize, ForeignKey)> = Vec::new();

    for (position, fragment) in column_fragments {
        if starts_with_keyword(fragment, "CONSTRAINT") {
            skip_log.skip(&context, fragment, SkipReason::UnrecognizedConstraint)?;
            continue;
        }
        if starts_with_keyword(fragment, "LIKE") {
            skip_log.skip(&context, fragment, SkipReason::UnsupportedClause)?;
            continue;
        }

        let Some(parsed) = parse_column_definition(fragment) else {
            skip_log.skip(&context, fragment, SkipReason::UnrecognizedColumn)?;
            continue;
        };

        if let Some(reference) = parsed.inline_reference {
            let columns = [parsed.column.name.clone()];
            foreign_keys.push((
                position,
                ForeignKey {
                    column: parsed.column.name.clone(),
                    references_table: reference.table,
                    references_column: reference.column,
                    constraint_name: synthesize_fk_name(name, &columns),
                },
            ));
        }
        if parsed.column.is_primary_key {
            table.primary_keys.push(parsed.column.name.clone());
        }
        table.columns.push(parsed.column);
    }

    let mut table_primary_keys = Vec::new();
    for (position, constraint) in constraints {
        match constraint {
            TableConstraint::ForeignKeys(keys) => {
                foreign_keys.extend(keys.into_iter().map(|fk| (position, fk)));
            }
            TableConstraint::PrimaryKey { columns, raw } => {
                table_primary_keys.extend(columns);
                table.constraints.push(raw);
            }
            TableConstraint::Other(raw) => table.constraints.push(raw),
        }
    }

    for key in table_primary_keys {
        if !table.primary_keys.contains(&key) {
            table.primary_keys.push(key);
        }
    }

    // Stable: keys from one composite constraint stay in column order
    foreign_keys.sort_by_key(|(position, _)| *position);
    table.foreign_keys = foreign_keys.into_iter().map(|(_, fk)| fk).collect();

    Ok(table)
}
