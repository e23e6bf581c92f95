//! Schema model element types

use serde::Serialize;

use crate::util::starts_with_ci;

/// A table parsed from a `CREATE TABLE` statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
    /// Primary-key column names: inline `PRIMARY KEY` columns first, then
    /// columns from a table-level `PRIMARY KEY (...)`
    pub primary_keys: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
    /// Raw column lists from `CREATE INDEX ... ON <table> (<columns>)`
    pub indexes: Vec<String>,
    /// Raw table-level constraint fragments that are not foreign keys
    pub constraints: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }
}

/// A column declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Declared type as written, e.g. `VARCHAR(100)`
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_not_null: bool,
    /// Raw default expression, uninterpreted
    pub default_value: Option<String>,
    /// Extra inline constraints in the order `UNIQUE`, `CHECK (...)`
    pub constraints: Vec<String>,
    /// Reference target, set by the key back-fill pass
    pub references: Option<ColumnReference>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    /// A column is a foreign key exactly when it carries a reference target.
    pub fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }

    pub fn is_unique(&self) -> bool {
        self.constraints.iter().any(|c| c == "UNIQUE")
    }

    pub fn has_check(&self) -> bool {
        self.constraints.iter().any(|c| starts_with_ci(c, "CHECK"))
    }
}

/// Target of a foreign-key column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
    pub table: String,
    pub column: String,
}

/// A single-column foreign key declared on a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Owning column name
    pub column: String,
    pub references_table: String,
    pub references_column: String,
    /// Declared constraint name, or `<table>_<columns>_fkey` when unnamed
    pub constraint_name: String,
}

/// Flat view of one foreign key, as consumed by the generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub constraint_name: String,
}

/// Why a fragment was left out of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `CREATE TABLE` header without a balanced body terminated by `;`
    UnterminatedTable,
    /// `CREATE INDEX` header whose column list never closes
    UnterminatedIndex,
    /// Fragment did not match the `name type` column pattern
    UnrecognizedColumn,
    /// Fragment starts with `CONSTRAINT` but has no recognizable shape
    UnrecognizedConstraint,
    /// Clause that is valid SQL but carries no column, e.g. `LIKE other`
    UnsupportedClause,
    /// `CREATE INDEX` on a table that was never declared
    UnknownIndexTable,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnterminatedTable => "CREATE TABLE body is not terminated by ');'",
            SkipReason::UnterminatedIndex => "CREATE INDEX column list is not closed",
            SkipReason::UnrecognizedColumn => "not a `name type` column declaration",
            SkipReason::UnrecognizedConstraint => "unrecognized CONSTRAINT clause",
            SkipReason::UnsupportedClause => "unsupported table clause",
            SkipReason::UnknownIndexTable => "index references an unknown table",
        }
    }

    /// Structural misses are rejected in strict mode; referential ones never are.
    pub fn is_structural(&self) -> bool {
        !matches!(self, SkipReason::UnknownIndexTable)
    }
}

/// A fragment that lenient parsing left out of the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFragment {
    /// Where the fragment was found, e.g. `table orders` or `CREATE INDEX`
    pub context: String,
    pub fragment: String,
    pub reason: SkipReason,
}
