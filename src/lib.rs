//! pg2dbml: Convert PostgreSQL schemas to DBML
//!
//! This library reads `CREATE TABLE` / `CREATE INDEX` DDL, builds a model of
//! tables, columns, and keys, and writes it out as DBML documents (for
//! dbdiagram.io and similar tools) plus a JSON dump of the parsed structure.

pub mod dbml;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod project;
pub mod util;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use error::Pg2DbmlError;
pub use parser::ParseMode;

/// File name of the JSON dump written next to the DBML outputs
pub const JSON_OUTPUT_NAME: &str = "parsed_schema.json";

/// Options for converting a schema
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Path to the schema SQL file (falls back to the project's `Schema`)
    pub input_path: Option<PathBuf>,
    /// Output directory (defaults to the project's `OutputDir`, then `./output`)
    pub output_dir: Option<PathBuf>,
    /// Optional .dbmlproj project file
    pub project_path: Option<PathBuf>,
    /// Base name for the .dbml files (defaults to the schema file stem)
    pub output_name: Option<String>,
    /// Name for the DBML `Project` header
    pub project_name: Option<String>,
    /// Overrides the project's parse mode when set
    pub parse_mode: Option<ParseMode>,
    /// Write `parsed_schema.json` alongside the DBML files
    pub write_json: bool,
    /// Enable verbose output
    pub verbose: bool,
}

/// Files written by a conversion, plus summary counts
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    pub dbml_path: PathBuf,
    pub full_dbml_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub table_count: usize,
    pub relationship_count: usize,
    pub skipped_count: usize,
}

/// Convert a schema file to DBML (and optionally JSON)
pub fn convert_schema(options: ConvertOptions) -> Result<ConvertOutput> {
    // Step 1: Load the project file, if any
    let project = match &options.project_path {
        Some(path) => {
            if options.verbose {
                println!("Loading project: {}", path.display());
            }
            Some(project::parse_dbmlproj(path)?)
        }
        None => None,
    };

    let input_path = options
        .input_path
        .clone()
        .or_else(|| project.as_ref().and_then(|p| p.schema_file.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!("No schema file given: pass a SCHEMA path or set <Schema> in the project")
        })?;

    let parse_mode = options
        .parse_mode
        .or(project.as_ref().map(|p| p.parse_mode))
        .unwrap_or_default();

    // Step 2: Parse the schema
    if options.verbose {
        println!(
            "Parsing schema: {} ({:?} mode)",
            input_path.display(),
            parse_mode
        );
    }

    let model = parser::parse_schema_file(&input_path, parse_mode)?;

    if model.is_empty() {
        return Err(Pg2DbmlError::NoTablesFound { path: input_path }.into());
    }

    let relationship_count = model.foreign_key_count();
    if options.verbose {
        println!("Parsed {} tables", model.len());
        println!("Found {} relationships", relationship_count);
        for skipped in model.skipped() {
            println!(
                "Skipped in {}: {} (`{}`)",
                skipped.context,
                skipped.reason.as_str(),
                skipped.fragment
            );
        }
    }

    // Step 3: Determine output locations
    let schema_stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("schema")
        .to_string();

    let output_dir = options
        .output_dir
        .clone()
        .or_else(|| project.as_ref().and_then(|p| p.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("output"));

    let output_name = options
        .output_name
        .clone()
        .or_else(|| project.as_ref().and_then(|p| p.output_name.clone()))
        .unwrap_or_else(|| schema_stem.clone());

    let mut settings = match &project {
        Some(project) => dbml::DbmlSettings::from(project),
        None => dbml::DbmlSettings::new(schema_stem),
    };
    if let Some(name) = &options.project_name {
        settings.project_name = name.clone();
    }

    std::fs::create_dir_all(&output_dir).map_err(|e| Pg2DbmlError::OutputWriteError {
        path: output_dir.clone(),
        source: e,
    })?;

    // Step 4: Generate and write the DBML documents
    let dbml_path = output_dir.join(format!("{}.dbml", output_name));
    write_output(&dbml_path, &dbml::generate_dbml(&model, &settings))?;
    if options.verbose {
        println!("Wrote DBML: {}", dbml_path.display());
    }

    let full_dbml_path = output_dir.join(format!("{}_full.dbml", output_name));
    write_output(&full_dbml_path, &dbml::generate_full_dbml(&model, &settings))?;
    if options.verbose {
        println!("Wrote full DBML: {}", full_dbml_path.display());
    }

    // Step 5: Write the JSON dump
    let json_path = if options.write_json {
        let path = output_dir.join(JSON_OUTPUT_NAME);
        write_output(&path, &export::to_json(&model)?)?;
        if options.verbose {
            println!("Wrote JSON schema: {}", path.display());
        }
        Some(path)
    } else {
        None
    };

    Ok(ConvertOutput {
        dbml_path,
        full_dbml_path,
        json_path,
        table_count: model.len(),
        relationship_count,
        skipped_count: model.skipped().len(),
    })
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Pg2DbmlError::OutputWriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
