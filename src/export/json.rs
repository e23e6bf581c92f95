//! JSON export of the parsed schema

use serde::{Serialize, Serializer};

use crate::error::Pg2DbmlError;
use crate::model::{Column, ForeignKey, Relationship, SchemaModel, Table};

/// Top-level JSON document: tables keyed by name, plus the flat
/// relationship list
#[derive(Serialize)]
struct SchemaRecord<'a> {
    tables: TablesRecord<'a>,
    relationships: Vec<Relationship>,
}

/// Serializes as an object keyed by table name, in declaration order
struct TablesRecord<'a>(&'a [Table]);

impl Serialize for TablesRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|table| (table.name.as_str(), TableRecord::from(table))),
        )
    }
}

#[derive(Serialize)]
struct TableRecord<'a> {
    name: &'a str,
    columns: Vec<ColumnRecord<'a>>,
    primary_keys: &'a [String],
    foreign_keys: &'a [ForeignKey],
    indexes: &'a [String],
    constraints: &'a [String],
}

impl<'a> From<&'a Table> for TableRecord<'a> {
    fn from(table: &'a Table) -> Self {
        Self {
            name: &table.name,
            columns: table.columns.iter().map(ColumnRecord::from).collect(),
            primary_keys: &table.primary_keys,
            foreign_keys: &table.foreign_keys,
            indexes: &table.indexes,
            constraints: &table.constraints,
        }
    }
}

#[derive(Serialize)]
struct ColumnRecord<'a> {
    name: &'a str,
    data_type: &'a str,
    is_primary_key: bool,
    is_foreign_key: bool,
    is_not_null: bool,
    default_value: Option<&'a str>,
    constraints: &'a [String],
    references_table: Option<&'a str>,
    references_column: Option<&'a str>,
}

impl<'a> From<&'a Column> for ColumnRecord<'a> {
    fn from(column: &'a Column) -> Self {
        Self {
            name: &column.name,
            data_type: &column.data_type,
            is_primary_key: column.is_primary_key,
            is_foreign_key: column.is_foreign_key(),
            is_not_null: column.is_not_null,
            default_value: column.default_value.as_deref(),
            constraints: &column.constraints,
            references_table: column.references.as_ref().map(|r| r.table.as_str()),
            references_column: column.references.as_ref().map(|r| r.column.as_str()),
        }
    }
}

/// Serialize the model as pretty-printed JSON (two-space indentation,
/// non-ASCII text unescaped).
pub fn to_json(model: &SchemaModel) -> Result<String, Pg2DbmlError> {
    let record = SchemaRecord {
        tables: TablesRecord(model.tables()),
        relationships: model.relationships(),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}
