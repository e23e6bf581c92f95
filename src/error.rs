//! Error types for pg2dbml

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a schema
#[derive(Error, Debug)]
pub enum Pg2DbmlError {
    #[error("Failed to read schema file: {path}")]
    InputReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema file is not valid UTF-8 or Windows-1252 text: {path}")]
    InputDecodeError { path: PathBuf },

    #[error("Failed to read project file: {path}")]
    ProjectReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project file: {path}")]
    ProjectParseError {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Invalid project file format: {message}")]
    InvalidProjectFormat { message: String },

    #[error("Could not parse {context}: {reason} (fragment: `{fragment}`)")]
    StructuralParseError {
        context: String,
        fragment: String,
        reason: String,
    },

    #[error("No CREATE TABLE statements found in {path}")]
    NoTablesFound { path: PathBuf },

    #[error("Failed to write output file: {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize schema to JSON")]
    JsonExportError {
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for Pg2DbmlError {
    fn from(err: serde_json::Error) -> Self {
        Pg2DbmlError::JsonExportError { source: err }
    }
}
