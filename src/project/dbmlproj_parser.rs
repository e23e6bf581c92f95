//! Parser for .dbmlproj files

use std::path::{Path, PathBuf};

use anyhow::Result;
use roxmltree::{Document, Node};

use crate::error::Pg2DbmlError;
use crate::parser::ParseMode;

/// Database type written into the DBML `Project` header when none is set
pub const DEFAULT_DATABASE_TYPE: &str = "PostgreSQL";

/// Note attached to one table in the DBML output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNote {
    pub table: String,
    pub note: String,
}

/// Named group of tables, emitted as a DBML `TableGroup`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGroup {
    pub name: String,
    /// Member table names in declaration order
    pub tables: Vec<String>,
}

/// Parsed DBML project
#[derive(Debug, Clone)]
pub struct DbmlProject {
    /// Project name for the DBML `Project` header
    pub name: String,
    /// Database type for the DBML `Project` header (default: "PostgreSQL")
    pub database_type: String,
    /// Project note
    pub note: Option<String>,
    /// Schema SQL file, resolved against the project directory
    pub schema_file: Option<PathBuf>,
    /// Output directory, resolved against the project directory
    pub output_dir: Option<PathBuf>,
    /// Base name for the `.dbml` outputs
    pub output_name: Option<String>,
    pub parse_mode: ParseMode,
    pub table_notes: Vec<TableNote>,
    pub table_groups: Vec<TableGroup>,
    /// Project directory
    pub project_dir: PathBuf,
}

/// Parse a .dbmlproj file
pub fn parse_dbmlproj(path: &Path) -> Result<DbmlProject> {
    let content = std::fs::read_to_string(path).map_err(|e| Pg2DbmlError::ProjectReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc = Document::parse(&content).map_err(|e| Pg2DbmlError::ProjectParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    let root = doc.root_element();

    if root.tag_name().name() != "Project" {
        return Err(Pg2DbmlError::InvalidProjectFormat {
            message: format!(
                "expected <Project> root element, found <{}>",
                root.tag_name().name()
            ),
        }
        .into());
    }

    // Project name falls back to the file stem
    let name = find_property_value(&root, "Name").unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Database")
            .to_string()
    });

    let database_type = find_property_value(&root, "DatabaseType")
        .unwrap_or_else(|| DEFAULT_DATABASE_TYPE.to_string());

    let note = find_property_value(&root, "Note");

    let schema_file = find_property_value(&root, "Schema").map(|p| resolve_path(&project_dir, &p));
    let output_dir =
        find_property_value(&root, "OutputDir").map(|p| resolve_path(&project_dir, &p));
    let output_name = find_property_value(&root, "OutputName");

    let parse_mode = match find_property_value(&root, "ParseMode") {
        Some(value) => value
            .parse::<ParseMode>()
            .map_err(|message| Pg2DbmlError::InvalidProjectFormat { message })?,
        None => ParseMode::default(),
    };

    let table_notes = find_table_notes(&root)?;
    let table_groups = find_table_groups(&root)?;

    Ok(DbmlProject {
        name,
        database_type,
        note,
        schema_file,
        output_dir,
        output_name,
        parse_mode,
        table_notes,
        table_groups,
        project_dir,
    })
}

/// Value of the first `PropertyGroup` child element named `property_name`.
/// Blank values count as absent.
fn find_property_value(root: &Node, property_name: &str) -> Option<String> {
    root.children()
        .filter(|n| n.tag_name().name() == "PropertyGroup")
        .flat_map(|group| group.children())
        .find(|n| n.tag_name().name() == property_name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn item_nodes<'a, 'input>(
    root: &Node<'a, 'input>,
    item_name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    root.children()
        .filter(|n| n.tag_name().name() == "ItemGroup")
        .flat_map(|group| group.children())
        .filter(move |n| n.tag_name().name() == item_name)
}

fn required_include(node: &Node, item_name: &str) -> Result<String> {
    node.attribute("Include")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Pg2DbmlError::InvalidProjectFormat {
                message: format!("<{}> is missing its Include attribute", item_name),
            }
            .into()
        })
}

fn find_table_notes(root: &Node) -> Result<Vec<TableNote>> {
    let mut notes = Vec::new();
    for node in item_nodes(root, "TableNote") {
        let table = required_include(&node, "TableNote")?;
        let note = node.text().map(str::trim).unwrap_or_default().to_string();
        notes.push(TableNote { table, note });
    }
    Ok(notes)
}

fn find_table_groups(root: &Node) -> Result<Vec<TableGroup>> {
    let mut groups = Vec::new();
    for node in item_nodes(root, "TableGroup") {
        let name = required_include(&node, "TableGroup")?;
        let mut tables = Vec::new();
        for member in node.children().filter(|n| n.tag_name().name() == "Table") {
            tables.push(required_include(&member, "Table")?);
        }
        groups.push(TableGroup { name, tables });
    }
    Ok(groups)
}

fn resolve_path(project_dir: &Path, value: &str) -> PathBuf {
    // Normalize path separators (Windows-style paths in project files)
    let normalized = value.replace('\\', "/");
    let path = Path::new(&normalized);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
