//! Schema model representation

use super::{Relationship, SkippedFragment, Table};

/// All tables parsed from one document, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    tables: Vec<Table>,
    /// Fragments lenient parsing left out
    skipped: Vec<SkippedFragment>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. A table with the same name replaces the earlier one in
    /// its original position.
    pub fn insert_table(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub(crate) fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub(crate) fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedFragment] {
        &self.skipped
    }

    pub(crate) fn record_skipped(&mut self, skipped: SkippedFragment) {
        self.skipped.push(skipped);
    }

    /// Total foreign keys across all tables
    pub fn foreign_key_count(&self) -> usize {
        self.tables.iter().map(|t| t.foreign_keys.len()).sum()
    }

    /// Flat list of relationships, one per foreign key, in table order
    pub fn relationships(&self) -> Vec<Relationship> {
        self.tables
            .iter()
            .flat_map(|table| {
                table.foreign_keys.iter().map(move |fk| Relationship {
                    from_table: table.name.clone(),
                    from_column: fk.column.clone(),
                    to_table: fk.references_table.clone(),
                    to_column: fk.references_column.clone(),
                    constraint_name: fk.constraint_name.clone(),
                })
            })
            .collect()
    }
}
