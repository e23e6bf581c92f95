//! Second pass over parsed tables: resolve key declarations onto columns
//!
//! Table bodies are parsed as plain records first. A `CONSTRAINT ... FOREIGN
//! KEY` clause may appear before, between, or after the column it names, so
//! column annotations are applied here once every table is complete.

use super::{ColumnReference, SchemaModel};

/// Annotate columns with foreign-key targets and table-level primary keys.
///
/// A foreign key naming a column that does not exist stays on its table and
/// annotates nothing.
pub fn backfill_keys(model: &mut SchemaModel) {
    for table in model.tables_mut() {
        let references: Vec<(String, ColumnReference)> = table
            .foreign_keys
            .iter()
            .map(|fk| {
                (
                    fk.column.clone(),
                    ColumnReference {
                        table: fk.references_table.clone(),
                        column: fk.references_column.clone(),
                    },
                )
            })
            .collect();

        for (column_name, reference) in references {
            if let Some(column) = table.column_mut(&column_name) {
                column.references = Some(reference);
            }
        }

        let primary_keys = table.primary_keys.clone();
        for key in &primary_keys {
            if let Some(column) = table.column_mut(key) {
                column.is_primary_key = true;
            }
        }
    }
}
