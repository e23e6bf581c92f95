//! DBML document generation

use crate::model::{Column, SchemaModel, Table};
use crate::project::{DbmlProject, TableGroup, TableNote, DEFAULT_DATABASE_TYPE};

use super::type_mapping::{convert_data_type, format_default_value, quote_string};

/// Project-level settings rendered into the DBML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbmlSettings {
    pub project_name: String,
    pub database_type: String,
    pub note: Option<String>,
    pub table_notes: Vec<TableNote>,
    pub table_groups: Vec<TableGroup>,
}

impl Default for DbmlSettings {
    fn default() -> Self {
        Self {
            project_name: "Database".to_string(),
            database_type: DEFAULT_DATABASE_TYPE.to_string(),
            note: None,
            table_notes: Vec::new(),
            table_groups: Vec::new(),
        }
    }
}

impl DbmlSettings {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    fn table_note(&self, table: &str) -> Option<&str> {
        self.table_notes
            .iter()
            .find(|n| n.table == table)
            .map(|n| n.note.as_str())
            .filter(|note| !note.is_empty())
    }
}

impl From<&DbmlProject> for DbmlSettings {
    fn from(project: &DbmlProject) -> Self {
        Self {
            project_name: project.name.clone(),
            database_type: project.database_type.clone(),
            note: project.note.clone(),
            table_notes: project.table_notes.clone(),
            table_groups: project.table_groups.clone(),
        }
    }
}

/// Generate the basic DBML document: project header, tables, relationships.
pub fn generate_dbml(model: &SchemaModel, settings: &DbmlSettings) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Project {} {{", quote_string(&settings.project_name)));
    lines.push(format!(
        "  database_type: {}",
        quote_string(&settings.database_type)
    ));
    if let Some(note) = &settings.note {
        lines.push(format!("  Note: {}", quote_string(note)));
    }
    lines.push("}".to_string());
    lines.push(String::new());

    for table in model.tables() {
        lines.push(generate_table(table, settings));
        lines.push(String::new());
    }

    lines.push("// Relationships".to_string());
    for rel in model.relationships() {
        lines.push(format!(
            "Ref: {}.{} > {}.{}",
            dbml_name(&rel.from_table),
            dbml_name(&rel.from_column),
            dbml_name(&rel.to_table),
            dbml_name(&rel.to_column)
        ));
    }

    lines.join("\n")
}

/// Generate one `TableGroup` block per configured group.
///
/// Members not present in the model are dropped, and a group left with no
/// members is omitted entirely.
pub fn generate_table_groups(model: &SchemaModel, settings: &DbmlSettings) -> String {
    let mut lines = Vec::new();

    for group in &settings.table_groups {
        let members: Vec<&String> = group
            .tables
            .iter()
            .filter(|t| model.contains_table(t))
            .collect();
        if members.is_empty() {
            continue;
        }

        lines.push(format!("TableGroup {} {{", quote_string(&group.name)));
        for table in members {
            lines.push(format!("  {}", dbml_name(table)));
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// The basic document followed by the table groups section.
pub fn generate_full_dbml(model: &SchemaModel, settings: &DbmlSettings) -> String {
    format!(
        "{}\n\n// Table Groups\n{}",
        generate_dbml(model, settings),
        generate_table_groups(model, settings)
    )
}

fn generate_table(table: &Table, settings: &DbmlSettings) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Table {} {{", dbml_name(&table.name)));
    if let Some(note) = settings.table_note(&table.name) {
        lines.push(format!("  Note: {}", quote_string(note)));
    }

    for column in &table.columns {
        lines.push(format!("  {}", generate_column(column)));
    }

    if !table.constraints.is_empty() {
        lines.push(String::new());
        lines.push("  // Table constraints".to_string());
        for constraint in &table.constraints {
            lines.push(format!("  // {}", constraint));
        }
    }

    if !table.indexes.is_empty() {
        lines.push(String::new());
        lines.push("  Indexes {".to_string());
        for index in &table.indexes {
            lines.push(format!("    {}", index_entry(index)));
        }
        lines.push("  }".to_string());
    }

    lines.push("}".to_string());
    lines.join("\n")
}

fn generate_column(column: &Column) -> String {
    let mut line = format!(
        "{} {}",
        dbml_name(&column.name),
        convert_data_type(&column.data_type)
    );

    // Only settings DBML understands go in brackets; the rest is a comment
    let mut attributes = Vec::new();
    if column.is_primary_key {
        attributes.push("pk");
    }
    if column.is_unique() {
        attributes.push("unique");
    }
    if !attributes.is_empty() {
        line.push_str(&format!(" [{}]", attributes.join(", ")));
    }

    let mut notes = Vec::new();
    if let Some(reference) = &column.references {
        notes.push(format!("FK -> {}.{}", reference.table, reference.column));
    }
    if column.is_not_null && !column.is_primary_key {
        notes.push("NOT NULL".to_string());
    }
    if let Some(default) = &column.default_value {
        notes.push(format!("default: {}", format_default_value(default)));
    }
    if column.has_check() {
        notes.push("has constraints".to_string());
    }
    if !notes.is_empty() {
        line.push_str(&format!(" // {}", notes.join(", ")));
    }

    line
}

/// Index column list as a DBML index entry: a bare column, a composite
/// `(a, b)`, or a backtick expression.
fn index_entry(columns: &str) -> String {
    if columns.contains('(') {
        format!("`{}`", columns)
    } else if columns.contains(',') {
        format!("({})", columns)
    } else {
        columns.to_string()
    }
}

/// Table or column name as a DBML identifier. Parts that are not plain
/// identifiers are double-quoted; schema qualification is kept.
fn dbml_name(name: &str) -> String {
    name.split('.')
        .map(|part| {
            let plain = part
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if plain {
                part.to_string()
            } else {
                quote_string(part)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}
